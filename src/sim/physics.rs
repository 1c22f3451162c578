//! Ball flight integration
//!
//! Explicit Euler with gravity, an inelastic floor and the court walls.
//! Only the floor can end a flight.

use glam::Vec3;

use super::scoring::{ScoringOutcome, check_scoring};
use super::session::record_make;
use super::state::{Ball, GameEvent, GameState};
use crate::planar;
use crate::tuning::PhysicsTuning;

/// Roll rate per m/s of ball speed (rad/s)
const SPIN_PER_SPEED: f32 = 0.1;
/// z-axis roll relative to x-axis roll while flying
const SPIN_Z_RATIO: f32 = 0.7;

/// What happened during one integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub ground_bounce: bool,
    pub wall_bounce: bool,
    /// Flight ended on this step
    pub came_to_rest: bool,
    pub scored: bool,
}

/// Reflect one velocity component off a wall and clamp the position into [min, max]
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32, loss: f32) -> bool {
    if *pos < min || *pos > max {
        *vel = -*vel * loss;
        *pos = pos.clamp(min, max);
        true
    } else {
        false
    }
}

/// Advance a flying ball by `dt` seconds
pub fn integrate(ball: &mut Ball, dt: f32, physics: &PhysicsTuning) -> StepReport {
    let mut report = StepReport::default();
    if !ball.in_flight {
        return report;
    }

    ball.vel.y += physics.gravity * dt;
    ball.pos += ball.vel * dt;

    // Floor
    if ball.pos.y <= physics.ground_level {
        report.ground_bounce = true;
        let loss = physics.bounce_energy_loss;
        ball.pos.y = physics.ground_level;
        ball.vel.y = -ball.vel.y * loss;
        ball.vel.x *= loss;
        ball.vel.z *= loss;

        let rest = physics.rest_threshold;
        if ball.vel.x.abs() < rest && ball.vel.y.abs() < rest && ball.vel.z.abs() < rest {
            ball.vel = Vec3::ZERO;
            ball.in_flight = false;
            report.came_to_rest = true;
        }
        log::debug!(
            "Floor bounce at ({:.2}, {:.2}), vel now {:.2}",
            ball.pos.x,
            ball.pos.z,
            ball.vel.length()
        );
    }

    // Court walls
    let court = physics.court;
    let loss = physics.bounce_energy_loss;
    let hit_x = bounce_axis(&mut ball.pos.x, &mut ball.vel.x, court.min_x, court.max_x, loss);
    let hit_z = bounce_axis(&mut ball.pos.z, &mut ball.vel.z, court.min_z, court.max_z, loss);
    if hit_x || hit_z {
        report.wall_bounce = true;
        log::debug!("Wall bounce at ({:.2}, {:.2})", ball.pos.x, ball.pos.z);
    }

    report
}

/// Roll the ball proportionally to its speed
fn spin(ball: &mut Ball, dt: f32) {
    let rate = ball.vel.length() * SPIN_PER_SPEED;
    ball.rotation.x += rate * dt;
    ball.rotation.z += rate * dt * SPIN_Z_RATIO;
}

/// One physics step of the game: integrate, then run the scoring check once
pub fn step(state: &mut GameState, dt: f32) -> StepReport {
    if !state.ball.in_flight {
        return StepReport::default();
    }

    let mut report = integrate(&mut state.ball, dt, &state.tuning.physics);

    let outcome = check_scoring(
        &state.ball,
        &state.hoops,
        state.session.result,
        &state.tuning.hoops,
    );
    if let ScoringOutcome::Made(side) = outcome {
        record_make(state, side);
        report.scored = true;
    }

    spin(&mut state.ball, dt);

    if report.came_to_rest {
        let pos = planar(state.ball.pos);
        log::debug!("Ball at rest at ({:.2}, {:.2})", pos.x, pos.y);
        state.events.push(GameEvent::CameToRest { pos });
    }

    report
}
