//! Data-driven game balance
//!
//! Every physical constant the simulation reads lives here so a host page can
//! override them with a JSON blob. Missing fields fall back to the defaults in
//! [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading or validating tuning data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Playable court rectangle for the ball center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for CourtBounds {
    fn default() -> Self {
        Self {
            min_x: COURT_MIN_X,
            max_x: COURT_MAX_X,
            min_z: COURT_MIN_Z,
            max_z: COURT_MAX_Z,
        }
    }
}

impl CourtBounds {
    /// Clamp the horizontal components of a position into the court
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        Vec3::new(
            pos.x.clamp(self.min_x, self.max_x),
            pos.y,
            pos.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains(&self, pos: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_z..=self.max_z).contains(&pos.z)
    }
}

/// Flight and bounce constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Vertical acceleration (m/s², must be negative)
    pub gravity: f32,
    /// Ball center height at rest on the floor
    pub ground_level: f32,
    /// Fraction of velocity kept on a bounce
    pub bounce_energy_loss: f32,
    /// Per-axis speed under which a floor bounce ends the flight
    pub rest_threshold: f32,
    pub court: CourtBounds,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ground_level: GROUND_LEVEL,
            bounce_energy_loss: BOUNCE_ENERGY_LOSS,
            rest_threshold: REST_THRESHOLD,
            court: CourtBounds::default(),
        }
    }
}

/// Hoop placement and scoring gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoopTuning {
    pub rim_height: f32,
    pub rim_radius: f32,
    /// Hoops are placed at x = ±hoop_x
    pub hoop_x: f32,
    /// Depth of the scoring band below rim height
    pub scoring_band: f32,
    /// Horizontal gate as a fraction of the rim radius
    pub confirm_factor: f32,
}

impl Default for HoopTuning {
    fn default() -> Self {
        Self {
            rim_height: RIM_HEIGHT,
            rim_radius: RIM_RADIUS,
            hoop_x: HOOP_X,
            scoring_band: SCORING_BAND,
            confirm_factor: SCORING_CONFIRM_FACTOR,
        }
    }
}

/// Launch curve and shot lifecycle constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTuning {
    pub base_angle: f32,
    pub angle_spread: f32,
    pub speed_floor: f32,
    pub speed_range: f32,
    pub speed_boost: f32,
    /// Seconds from launch until the miss check fires
    pub miss_check_delay: f32,
    pub shot_points: u32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            base_angle: BASE_LAUNCH_ANGLE,
            angle_spread: LAUNCH_ANGLE_SPREAD,
            speed_floor: SPEED_FLOOR,
            speed_range: SPEED_RANGE,
            speed_boost: SPEED_BOOST,
            miss_check_delay: MISS_CHECK_DELAY,
            shot_points: SHOT_POINTS,
        }
    }
}

/// Grounded control constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    /// Percent per second while a power key is held
    pub power_ramp: f32,
    /// Power restored on reset
    pub default_power: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            power_ramp: POWER_RAMP,
            default_power: DEFAULT_POWER,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub hoops: HoopTuning,
    pub shot: ShotTuning,
    pub movement: MovementTuning,
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the values the simulation relies on to terminate and stay bounded
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> TuningError {
            TuningError::Invalid { field, reason }
        }

        let p = &self.physics;
        if !(p.gravity < 0.0) {
            return Err(invalid("physics.gravity", "must be negative"));
        }
        if !(p.bounce_energy_loss > 0.0 && p.bounce_energy_loss < 1.0) {
            return Err(invalid("physics.bounce_energy_loss", "must be in (0, 1)"));
        }
        if !(p.rest_threshold > 0.0) {
            return Err(invalid("physics.rest_threshold", "must be positive"));
        }
        if !p.ground_level.is_finite() {
            return Err(invalid("physics.ground_level", "must be finite"));
        }
        if !(p.court.min_x < p.court.max_x) {
            return Err(invalid("physics.court", "min_x must be below max_x"));
        }
        if !(p.court.min_z < p.court.max_z) {
            return Err(invalid("physics.court", "min_z must be below max_z"));
        }

        let h = &self.hoops;
        if !(h.rim_radius > 0.0) {
            return Err(invalid("hoops.rim_radius", "must be positive"));
        }
        if !(h.rim_height > p.ground_level) {
            return Err(invalid("hoops.rim_height", "must be above the ground level"));
        }
        if !(h.scoring_band > 0.0) {
            return Err(invalid("hoops.scoring_band", "must be positive"));
        }
        if !(h.confirm_factor > 0.0 && h.confirm_factor <= 1.0) {
            return Err(invalid("hoops.confirm_factor", "must be in (0, 1]"));
        }

        let s = &self.shot;
        if !(s.miss_check_delay > 0.0) {
            return Err(invalid("shot.miss_check_delay", "must be positive"));
        }
        if !(s.speed_floor > 0.0 && s.speed_range >= 0.0 && s.speed_boost > 0.0) {
            return Err(invalid("shot", "speed factors must be positive"));
        }
        // sin(2θ) must stay positive across the whole power range
        let low = s.base_angle - s.angle_spread / 2.0;
        let high = s.base_angle + s.angle_spread / 2.0;
        if !(low > 0.0 && high < std::f32::consts::FRAC_PI_2) {
            return Err(invalid("shot.base_angle", "launch angles must stay within (0, π/2)"));
        }

        let m = &self.movement;
        if !(m.move_speed >= 0.0 && m.power_ramp >= 0.0) {
            return Err(invalid("movement", "speeds must not be negative"));
        }
        if !(0.0..=MAX_POWER).contains(&m.default_power) {
            return Err(invalid("movement.default_power", "must be within 0-100"));
        }

        Ok(())
    }

    /// Parse tuning JSON, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.physics.gravity, -9.8);
        assert_eq!(tuning.hoops.rim_radius, 0.45);
        assert_eq!(tuning.shot.miss_check_delay, 6.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "physics": { "gravity": -12.0 } }"#).unwrap();
        assert_eq!(tuning.physics.gravity, -12.0);
        assert_eq!(tuning.physics.bounce_energy_loss, BOUNCE_ENERGY_LOSS);
        assert_eq!(tuning.physics.court, CourtBounds::default());
        assert_eq!(tuning.movement, MovementTuning::default());
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "physics": { "gravity": 9.8 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "physics.gravity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_lossless_bounce() {
        let err = Tuning::from_json(r#"{ "physics": { "bounce_energy_loss": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ physics: ").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
        assert!(err.to_string().starts_with("invalid tuning json"));
    }

    #[test]
    fn test_fallback_to_default() {
        let tuning = Tuning::from_json_or_default(r#"{ "hoops": { "rim_radius": -1 } }"#);
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_court_clamp() {
        let court = CourtBounds::default();
        let clamped = court.clamp(Vec3::new(20.0, 1.0, -9.0));
        assert_eq!(clamped, Vec3::new(13.5, 1.0, -7.0));
        assert!(court.contains(clamped));
        assert!(!court.contains(Vec3::new(13.6, 0.0, 0.0)));
    }
}
