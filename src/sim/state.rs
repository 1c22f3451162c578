//! Game state and core simulation types
//!
//! The whole session lives in one [`GameState`] value that the frame driver
//! and the deferred tasks mutate in turn.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::demo::DemoDriver;
use super::timer::{Scheduler, TaskHandle};
use crate::consts::MAX_POWER;
use crate::settings::Settings;
use crate::tuning::{HoopTuning, Tuning};

/// Court half a hoop belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Negative x half
    Left,
    /// Positive x half
    Right,
}

impl Side {
    /// -1 for the left half, +1 for the right half
    pub fn sign(&self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// The basketball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position (m)
    pub pos: Vec3,
    /// Velocity (m/s)
    pub vel: Vec3,
    /// Governed by gravity rather than player control
    pub in_flight: bool,
    /// Visual roll angles (radians) for the renderer
    pub rotation: Vec3,
}

impl Ball {
    /// Ball resting at court center
    pub fn at_center(ground_level: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, ground_level, 0.0),
            vel: Vec3::ZERO,
            in_flight: false,
            rotation: Vec3::ZERO,
        }
    }
}

/// Static hoop descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    pub side: Side,
    /// Rim center
    pub position: Vec3,
    pub rim_radius: f32,
    pub rim_height: f32,
}

impl Hoop {
    pub fn new(side: Side, tuning: &HoopTuning) -> Self {
        Self {
            side,
            position: Vec3::new(side.sign() * tuning.hoop_x, tuning.rim_height, 0.0),
            rim_radius: tuning.rim_radius,
            rim_height: tuning.rim_height,
        }
    }

    /// Both hoops in creation order (left first)
    pub fn pair(tuning: &HoopTuning) -> [Hoop; 2] {
        [Hoop::new(Side::Left, tuning), Hoop::new(Side::Right, tuning)]
    }
}

/// Outcome of a single flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    Made,
    Missed,
}

/// Per-shot state, replaced on every new shot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotSession {
    /// 1-based attempt number this session belongs to (0 before the first shot)
    pub shot_number: u32,
    /// None while the shot is unresolved
    pub result: Option<ShotResult>,
    /// Hoop the shot was aimed at
    pub target: Option<Side>,
    /// Pending miss check for this shot
    pub miss_check: Option<TaskHandle>,
}

impl ShotSession {
    pub fn is_made(&self) -> bool {
        self.result == Some(ShotResult::Made)
    }
}

/// Process-lifetime counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub shot_attempts: u32,
    pub shots_made: u32,
    pub score: u32,
}

impl GameStats {
    /// Make percentage rounded to the nearest integer (0 with no attempts)
    pub fn accuracy(&self) -> u32 {
        if self.shot_attempts == 0 {
            return 0;
        }
        (self.shots_made as f32 / self.shot_attempts as f32 * 100.0).round() as u32
    }
}

/// Shot power in percent, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ShotPower(f32);

impl ShotPower {
    pub fn new(percent: f32) -> Self {
        Self(percent.clamp(0.0, MAX_POWER))
    }

    pub fn percent(&self) -> f32 {
        self.0
    }

    /// Power mapped to [0, 1] for the launch formulas
    pub fn normalized(&self) -> f32 {
        self.0 / MAX_POWER
    }

    /// Ramp by `delta` percent, saturating at both ends
    pub fn adjust(&mut self, delta: f32) {
        self.0 = (self.0 + delta).clamp(0.0, MAX_POWER);
    }
}

impl Default for ShotPower {
    fn default() -> Self {
        Self(crate::consts::DEFAULT_POWER)
    }
}

/// Notifications for the UI collaborator, drained by the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotStarted { shot: u32, target: Side, power: f32 },
    ShotMade { shot: u32, target: Side, score: u32 },
    ShotMissed { shot: u32 },
    BallReset,
    CameToRest { pos: Vec2 },
}

/// Work scheduled on the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Miss determination for the given attempt number
    MissCheck { shot: u32 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub settings: Settings,
    pub ball: Ball,
    /// Fixed hoop pair in creation order
    pub hoops: [Hoop; 2],
    pub session: ShotSession,
    pub stats: GameStats,
    pub power: ShotPower,
    /// Seconds of simulated time since start
    pub clock: f64,
    pub timers: Scheduler<DeferredTask>,
    pub demo: DemoDriver,
    /// Pending UI notifications
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state; `seed` drives demo mode
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        Self {
            ball: Ball::at_center(tuning.physics.ground_level),
            hoops: Hoop::pair(&tuning.hoops),
            power: ShotPower::new(tuning.movement.default_power),
            session: ShotSession::default(),
            stats: GameStats::default(),
            clock: 0.0,
            timers: Scheduler::new(),
            demo: DemoDriver::new(seed),
            events: Vec::new(),
            tuning,
            settings,
        }
    }

    /// Take all pending UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default(), Settings::default(), 0)
    }
}
