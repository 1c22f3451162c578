//! Shot trajectory planning
//!
//! Turns the ball position, a target hoop and the current shot power into a
//! launch velocity. The speed starts from the ballistic range formula and is
//! then scaled by two feel factors.

use glam::{Vec2, Vec3};

use super::state::Hoop;
use crate::consts::MIN_HORIZONTAL_DISTANCE;
use crate::planar;
use crate::tuning::{PhysicsTuning, ShotTuning};

/// Why a shot could not be started
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ShotError {
    #[error("ball is already in flight")]
    AlreadyInFlight,

    #[error("ball is {horizontal_distance:.4}m from the hoop axis, no shot direction")]
    DegenerateTrajectory { horizontal_distance: f32 },
}

/// A computed launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    pub velocity: Vec3,
    /// Elevation (radians)
    pub angle: f32,
    /// Launch speed (m/s)
    pub speed: f32,
    pub horizontal_distance: f32,
    /// Rim height above the ball center
    pub vertical_distance: f32,
}

/// Closest hoop by 3D distance; the earlier hoop wins exact ties
pub fn nearest_hoop(pos: Vec3, hoops: &[Hoop; 2]) -> &Hoop {
    let [first, second] = hoops;
    if pos.distance(second.position) < pos.distance(first.position) {
        second
    } else {
        first
    }
}

/// Elevation for a normalized power in [0, 1]
#[inline]
pub fn launch_angle(normalized_power: f32, shot: &ShotTuning) -> f32 {
    shot.base_angle + (normalized_power - 0.5) * shot.angle_spread
}

/// Feel multiplier on the ballistic speed for a normalized power
#[inline]
pub fn speed_factor(normalized_power: f32, shot: &ShotTuning) -> f32 {
    shot.speed_floor + normalized_power * shot.speed_range
}

/// Compute the launch for a shot from `ball_pos` at `hoop`
pub fn plan_shot(
    ball_pos: Vec3,
    hoop: &Hoop,
    normalized_power: f32,
    physics: &PhysicsTuning,
    shot: &ShotTuning,
) -> Result<ShotPlan, ShotError> {
    let horizontal: Vec2 = planar(hoop.position) - planar(ball_pos);
    let horizontal_distance = horizontal.length();
    let vertical_distance = hoop.position.y - ball_pos.y;

    if !(horizontal_distance >= MIN_HORIZONTAL_DISTANCE) {
        return Err(ShotError::DegenerateTrajectory {
            horizontal_distance,
        });
    }

    let angle = launch_angle(normalized_power, shot);
    let speed = (horizontal_distance * physics.gravity.abs() / (2.0 * angle).sin()).sqrt()
        * speed_factor(normalized_power, shot)
        * shot.speed_boost;

    let direction = horizontal / horizontal_distance;
    let planar_speed = speed * angle.cos();
    let velocity = Vec3::new(
        direction.x * planar_speed,
        speed * angle.sin(),
        direction.y * planar_speed,
    );

    Ok(ShotPlan {
        velocity,
        angle,
        speed,
        horizontal_distance,
        vertical_distance,
    })
}

/// Launch velocity only
pub fn launch_velocity(
    ball_pos: Vec3,
    hoop: &Hoop,
    normalized_power: f32,
    physics: &PhysicsTuning,
    shot: &ShotTuning,
) -> Result<Vec3, ShotError> {
    plan_shot(ball_pos, hoop, normalized_power, physics, shot).map(|plan| plan.velocity)
}
