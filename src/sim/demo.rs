//! Attract mode
//!
//! Walks the idle ball to a random spot and shoots with a random power.
//! Seeded, so a given seed always plays the same sequence of shots.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::initiate_shot;
use super::state::{GameState, ShotPower};
use super::trajectory::{ShotError, ShotPlan};
use crate::tuning::CourtBounds;

/// Keep demo spots this far inside the court walls (m)
const SPOT_MARGIN: f32 = 1.0;
const MIN_DEMO_POWER: f32 = 30.0;
const MAX_DEMO_POWER: f32 = 80.0;

/// Where the demo is heading and how hard it will shoot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoTarget {
    pub spot: Vec3,
    pub power: f32,
}

#[derive(Debug, Clone)]
pub struct DemoDriver {
    rng: Pcg32,
    target: Option<DemoTarget>,
}

impl DemoDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            target: None,
        }
    }

    pub fn target(&self) -> Option<DemoTarget> {
        self.target
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    fn pick_target(&mut self, court: &CourtBounds, ground_level: f32) -> DemoTarget {
        let (x_lo, x_hi) = inset(court.min_x, court.max_x);
        let (z_lo, z_hi) = inset(court.min_z, court.max_z);
        let x = self.rng.random_range(x_lo..=x_hi);
        let z = self.rng.random_range(z_lo..=z_hi);
        let power = self.rng.random_range(MIN_DEMO_POWER..MAX_DEMO_POWER);
        DemoTarget {
            spot: Vec3::new(x, ground_level, z),
            power,
        }
    }
}

/// Shrink `[min, max]` by the spot margin, or by a quarter of its width on
/// courts too small for the full margin
fn inset(min: f32, max: f32) -> (f32, f32) {
    let margin = SPOT_MARGIN.min((max - min) / 4.0);
    (min + margin, max - margin)
}

/// Drive the idle ball for one frame. Returns the shot result on the frame
/// the demo shoots.
pub fn drive(state: &mut GameState, dt: f32) -> Option<Result<ShotPlan, ShotError>> {
    if state.ball.in_flight {
        return None;
    }

    let target = match state.demo.target {
        Some(target) => target,
        None => {
            let court = state.tuning.physics.court;
            let target = state
                .demo
                .pick_target(&court, state.tuning.physics.ground_level);
            log::debug!(
                "Demo heading to ({:.1}, {:.1}) at {:.0}% power",
                target.spot.x,
                target.spot.z,
                target.power
            );
            state.demo.target = Some(target);
            target
        }
    };

    let to_spot = Vec3::new(
        target.spot.x - state.ball.pos.x,
        0.0,
        target.spot.z - state.ball.pos.z,
    );
    let distance = to_spot.length();
    let step = state.tuning.movement.move_speed * dt;

    if distance > step {
        state.ball.pos += to_spot / distance * step;
        return None;
    }

    state.ball.pos = Vec3::new(target.spot.x, state.ball.pos.y, target.spot.z);
    state.power = ShotPower::new(target.power);
    state.demo.clear_target();
    Some(initiate_shot(state))
}
