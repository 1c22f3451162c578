//! Per-frame simulation step
//!
//! The host calls [`advance`] once per rendered frame with the elapsed time.

use super::input::{Command, InputState};
use super::physics::{self, StepReport};
use super::session::{fire_due_tasks, initiate_shot, reset_ball};
use super::state::GameState;
use super::{demo, movement};

/// Advance the game state by one frame of `dt` seconds
pub fn advance(state: &mut GameState, input: &InputState, dt: f32) -> StepReport {
    for command in &input.commands {
        match command {
            Command::Shoot => {
                if let Err(e) = initiate_shot(state) {
                    log::warn!("Shot rejected: {}", e);
                }
            }
            Command::Reset => reset_ball(state),
            Command::ToggleDemo => {
                state.settings.demo_mode = !state.settings.demo_mode;
                state.demo.clear_target();
                log::info!("Demo mode: {}", state.settings.demo_mode);
            }
        }
    }

    // A flying ball belongs to the physics step alone
    if !state.ball.in_flight {
        if state.settings.demo_mode {
            if let Some(Err(e)) = demo::drive(state, dt) {
                log::warn!("Demo shot rejected: {}", e);
            }
        } else {
            movement::update_grounded(state, input, dt);
        }
    }

    let report = physics::step(state, dt);

    // Deferred work runs after the frame's own update
    state.clock += f64::from(dt);
    fire_due_tasks(state);

    report
}
