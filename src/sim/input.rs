//! Player input for a frame
//!
//! Held keys stay set between frames; one-shot commands are queued and the
//! host clears them after each `advance`.

use glam::Vec3;

/// Keys that act while held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PowerUp,
    PowerDown,
}

/// Single-press actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shoot,
    Reset,
    ToggleDemo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    Held(Key),
    Press(Command),
}

/// Map a lower-cased DOM `KeyboardEvent.key` to its binding
fn binding(key: &str) -> Option<Binding> {
    let binding = match key {
        "arrowleft" => Binding::Held(Key::Left),
        "arrowright" => Binding::Held(Key::Right),
        "arrowup" => Binding::Held(Key::Up),
        "arrowdown" => Binding::Held(Key::Down),
        "w" => Binding::Held(Key::PowerUp),
        "s" => Binding::Held(Key::PowerDown),
        " " => Binding::Press(Command::Shoot),
        "r" => Binding::Press(Command::Reset),
        "i" => Binding::Press(Command::ToggleDemo),
        _ => return None,
    };
    Some(binding)
}

/// Camera orientation used to make movement screen-relative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// View direction
    pub forward: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            forward: (target - eye).normalize_or_zero(),
            up,
        }
    }

    /// Screen right, zero for a degenerate basis
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or_zero()
    }

    /// View direction flattened onto the court
    pub fn planar_forward(&self) -> Vec3 {
        Vec3::new(self.forward.x, 0.0, self.forward.z).normalize_or_zero()
    }
}

impl Default for CameraBasis {
    /// Default broadcast view from (0, 15, 25) at court center
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 15.0, 25.0), Vec3::ZERO, Vec3::Y)
    }
}

/// Input state for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub power_up: bool,
    pub power_down: bool,
    pub camera: CameraBasis,
    /// Commands to run at the start of the next frame, in order
    pub commands: Vec<Command>,
}

impl InputState {
    pub fn set_held(&mut self, key: Key, pressed: bool) {
        let flag = match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::PowerUp => &mut self.power_up,
            Key::PowerDown => &mut self.power_down,
        };
        *flag = pressed;
    }

    /// Handle a key press; returns true if the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        match binding(&key.to_lowercase()) {
            Some(Binding::Held(k)) => self.set_held(k, true),
            Some(Binding::Press(command)) => self.commands.push(command),
            None => return false,
        }
        true
    }

    /// Handle a key release
    pub fn key_up(&mut self, key: &str) {
        if let Some(Binding::Held(k)) = binding(&key.to_lowercase()) {
            self.set_held(k, false);
        }
    }

    /// Drop every held key (window lost focus)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.power_up = false;
        self.power_down = false;
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}
