//! Shot lifecycle
//!
//! Idle -> InFlight on a shot, then Made (from the scoring check) or Missed
//! (from the deferred miss check), and back to Idle on the next shot or a
//! reset. Attempts are counted on launch; only makes add to the score.

use glam::Vec3;

use super::state::{DeferredTask, GameEvent, GameState, ShotPower, ShotResult, ShotSession, Side};
use super::trajectory::{ShotError, ShotPlan, nearest_hoop, plan_shot};

/// Launch the ball at the nearest hoop with the current power
pub fn initiate_shot(state: &mut GameState) -> Result<ShotPlan, ShotError> {
    if state.ball.in_flight {
        return Err(ShotError::AlreadyInFlight);
    }

    let hoop = *nearest_hoop(state.ball.pos, &state.hoops);
    let plan = plan_shot(
        state.ball.pos,
        &hoop,
        state.power.normalized(),
        &state.tuning.physics,
        &state.tuning.shot,
    )?;

    if state.settings.miss_timer.cancels_stale_checks() {
        cancel_pending_check(state);
    }

    state.stats.shot_attempts += 1;
    let shot = state.stats.shot_attempts;
    state.ball.in_flight = true;
    state.ball.vel = plan.velocity;

    let miss_check = state.timers.schedule(
        state.clock,
        f64::from(state.tuning.shot.miss_check_delay),
        DeferredTask::MissCheck { shot },
    );
    state.session = ShotSession {
        shot_number: shot,
        result: None,
        target: Some(hoop.side),
        miss_check: Some(miss_check),
    };

    log::info!(
        "Shot {} at {:?} hoop: power {:.0}%, {:.1}m out, {:.1}° at {:.2}m/s",
        shot,
        hoop.side,
        state.power.percent(),
        plan.horizontal_distance,
        plan.angle.to_degrees(),
        plan.speed
    );
    state.events.push(GameEvent::ShotStarted {
        shot,
        target: hoop.side,
        power: state.power.percent(),
    });

    Ok(plan)
}

/// Latch a made shot and award points; no-op if this flight already scored
pub fn record_make(state: &mut GameState, side: Side) {
    if state.session.is_made() {
        return;
    }
    state.session.result = Some(ShotResult::Made);
    state.stats.score += state.tuning.shot.shot_points;
    state.stats.shots_made += 1;

    log::info!(
        "Shot {} made at {:?} hoop, score {}",
        state.session.shot_number,
        side,
        state.stats.score
    );
    state.events.push(GameEvent::ShotMade {
        shot: state.session.shot_number,
        target: side,
        score: state.stats.score,
    });
}

/// Miss determination, run when a shot's deferred check fires
pub fn resolve_miss_check(state: &mut GameState, shot: u32) {
    if shot != state.session.shot_number {
        log::debug!(
            "Miss check for shot {} fired during shot {}",
            shot,
            state.session.shot_number
        );
    }
    if !state.ball.in_flight || state.session.is_made() {
        return;
    }

    state.session.result = Some(ShotResult::Missed);
    log::info!("Shot {} missed", state.session.shot_number);
    state.events.push(GameEvent::ShotMissed {
        shot: state.session.shot_number,
    });
}

/// Run every deferred task due at the current clock
pub fn fire_due_tasks(state: &mut GameState) {
    for (handle, task) in state.timers.take_due(state.clock) {
        if state.session.miss_check == Some(handle) {
            state.session.miss_check = None;
        }
        match task {
            DeferredTask::MissCheck { shot } => resolve_miss_check(state, shot),
        }
    }
}

/// Force the ball back to court center, idle, at default power
pub fn reset_ball(state: &mut GameState) {
    if state.settings.miss_timer.cancels_stale_checks() {
        cancel_pending_check(state);
    }

    let ground = state.tuning.physics.ground_level;
    state.ball.pos = Vec3::new(0.0, ground, 0.0);
    state.ball.vel = Vec3::ZERO;
    state.ball.in_flight = false;
    state.power = ShotPower::new(state.tuning.movement.default_power);
    state.demo.clear_target();
    // The attempt number stays so a late parity check can still be traced
    state.session.result = None;
    state.session.target = None;

    log::info!("Ball reset");
    state.events.push(GameEvent::BallReset);
}

fn cancel_pending_check(state: &mut GameState) {
    if let Some(handle) = state.session.miss_check.take() {
        if state.timers.cancel(handle) {
            log::debug!(
                "Cancelled miss check for shot {}",
                state.session.shot_number
            );
        }
    }
}
