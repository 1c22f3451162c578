//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through [`advance`]
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod demo;
pub mod input;
pub mod movement;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod state;
pub mod tick;
pub mod timer;
pub mod trajectory;

pub use demo::{DemoDriver, DemoTarget};
pub use input::{CameraBasis, Command, InputState, Key};
pub use physics::{StepReport, integrate};
pub use scoring::{ScoringOutcome, check_scoring};
pub use session::{initiate_shot, record_make, reset_ball};
pub use state::{
    Ball, GameEvent, GameState, GameStats, Hoop, ShotPower, ShotResult, ShotSession, Side,
};
pub use tick::advance;
pub use timer::{Scheduler, TaskHandle};
pub use trajectory::{ShotError, ShotPlan, nearest_hoop, plan_shot};
