//! Fire-once tasks on the simulation clock
//!
//! Tasks fire in due-time order, ties broken by scheduling order. A handle
//! can cancel a task any time before it fires.

/// Identifies one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TaskHandle,
    due: f64,
    task: T,
}

/// One-shot task queue keyed on game time (seconds)
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Schedule `task` to fire `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: now + delay,
            task,
        });
        handle
    }

    /// Drop a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task due at or before `now`
    pub fn take_due(&mut self, now: f64) -> Vec<(TaskHandle, T)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = rest;
        due.sort_by(|a, b| {
            a.due
                .partial_cmp(&b.due)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|p| (p.handle, p.task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = Scheduler::new();
        timers.schedule(0.0, 6.0, "miss");
        assert!(timers.take_due(5.9).is_empty());
        let fired = timers.take_due(6.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, "miss");
        assert!(timers.take_due(100.0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut timers = Scheduler::new();
        timers.schedule(1.0, 6.0, 'b');
        timers.schedule(0.0, 6.0, 'a');
        timers.schedule(0.0, 8.0, 'd');
        timers.schedule(0.0, 7.0, 'c');
        let order: Vec<char> = timers.take_due(10.0).into_iter().map(|(_, t)| t).collect();
        // 'b' and 'c' are both due at 7.0; 'b' was scheduled first
        assert_eq!(order, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_late_deadline_keeps_precision() {
        let mut timers = Scheduler::new();
        let start = 300_000.0;
        timers.schedule(start, 6.0, ());
        assert!(timers.take_due(start + 5.99).is_empty());
        assert_eq!(timers.take_due(start + 6.0).len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Scheduler::new();
        let first = timers.schedule(0.0, 1.0, 1);
        let second = timers.schedule(0.0, 1.0, 2);
        assert!(timers.cancel(first));
        assert!(!timers.cancel(first));
        assert!(!timers.is_pending(first));
        assert!(timers.is_pending(second));
        let fired = timers.take_due(2.0);
        assert_eq!(fired, vec![(second, 2)]);
        assert!(timers.is_empty());
    }
}
