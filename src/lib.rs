//! Hoopshot - An arcade basketball shooting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball flight, scoring, shot sessions)
//! - `tuning`: Data-driven physics and shot constants
//! - `settings`: Gameplay preferences (miss timer policy, demo mode)
//! - `hud`: Presentation data for the score/power display

pub mod hud;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use hud::{Feedback, HudSnapshot};
pub use settings::{MissTimerPolicy, Settings};
pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Gravity (m/s², negative is down)
    pub const GRAVITY: f32 = -9.8;
    /// Ball radius (m)
    pub const BALL_RADIUS: f32 = 0.15;
    /// Ball center height when resting on the floor
    pub const GROUND_LEVEL: f32 = BALL_RADIUS;
    /// Velocity retained after a floor or wall bounce
    pub const BOUNCE_ENERGY_LOSS: f32 = 0.7;
    /// Per-axis speed below which a grounded ball stops (m/s)
    pub const REST_THRESHOLD: f32 = 0.5;

    /// Court bounds - 28m x 15m court with a 0.5m buffer
    pub const COURT_MIN_X: f32 = -13.5;
    pub const COURT_MAX_X: f32 = 13.5;
    pub const COURT_MIN_Z: f32 = -7.0;
    pub const COURT_MAX_Z: f32 = 7.0;

    /// Rim height: 10 feet
    pub const RIM_HEIGHT: f32 = 3.05;
    pub const RIM_RADIUS: f32 = 0.45;
    /// Hoops sit at x = ±HOOP_X on the center line
    pub const HOOP_X: f32 = 13.4;
    /// Vertical window below the rim in which a descending ball can score
    pub const SCORING_BAND: f32 = 1.0;
    /// Horizontal gate as a fraction of the rim radius
    pub const SCORING_CONFIRM_FACTOR: f32 = 0.8;

    /// Launch angle at 50% power (radians)
    pub const BASE_LAUNCH_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Launch angle change across the full power range (radians)
    pub const LAUNCH_ANGLE_SPREAD: f32 = 0.3;
    /// Speed multiplier range: floor + power * range
    pub const SPEED_FLOOR: f32 = 0.7;
    pub const SPEED_RANGE: f32 = 0.8;
    /// Extra 20% on top of the ballistic speed
    pub const SPEED_BOOST: f32 = 1.2;
    /// Shots closer than this (xz plane) to the hoop have no direction
    pub const MIN_HORIZONTAL_DISTANCE: f32 = 1e-3;

    /// Seconds after launch before an unscored flight counts as a miss
    pub const MISS_CHECK_DELAY: f32 = 6.0;
    pub const SHOT_POINTS: u32 = 2;

    /// Grounded ball movement speed (m/s)
    pub const MOVE_SPEED: f32 = 8.0;
    /// Shot power ramp while a power key is held (% per second)
    pub const POWER_RAMP: f32 = 50.0;
    pub const DEFAULT_POWER: f32 = 50.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Longest frame the host will feed into a single step (s)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Project a 3D point onto the court plane (x, z)
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}
