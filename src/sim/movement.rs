//! Grounded ball control
//!
//! While the ball is idle the arrow keys roll it around the court relative to
//! the camera and the power keys ramp the shot power.

use glam::Vec3;

use super::input::InputState;
use super::state::GameState;

/// Roll change per meter of movement (rad)
const ROLL_PER_METER: f32 = 0.2;

/// Apply held keys for one frame; does nothing while the ball is in flight
pub fn update_grounded(state: &mut GameState, input: &InputState, dt: f32) {
    if state.ball.in_flight {
        return;
    }

    let step = state.tuning.movement.move_speed * dt;
    let right = input.camera.right();
    let forward = input.camera.planar_forward();
    let roll = step * ROLL_PER_METER;

    let mut delta = Vec3::ZERO;
    if input.left {
        delta -= right * step;
        state.ball.rotation.z += roll;
    }
    if input.right {
        delta += right * step;
        state.ball.rotation.z -= roll;
    }
    if input.up {
        delta += forward * step;
        state.ball.rotation.x += roll;
    }
    if input.down {
        delta -= forward * step;
        state.ball.rotation.x -= roll;
    }
    state.ball.pos += delta;

    let ramp = state.tuning.movement.power_ramp * dt;
    if input.power_up {
        state.power.adjust(ramp);
    }
    if input.power_down {
        state.power.adjust(-ramp);
    }

    state.ball.pos = state.tuning.physics.court.clamp(state.ball.pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_arrow_keys_follow_camera() {
        let mut state = GameState::default();
        let input = InputState {
            right: true,
            up: true,
            ..Default::default()
        };
        update_grounded(&mut state, &input, 0.5);
        // Default camera: right is +x, forward is -z
        assert!((state.ball.pos.x - 4.0).abs() < 1e-5);
        assert!((state.ball.pos.z + 4.0).abs() < 1e-5);
        assert_eq!(state.ball.pos.y, GROUND_LEVEL);
        assert!(state.ball.rotation.z < 0.0);
        assert!(state.ball.rotation.x > 0.0);
    }

    #[test]
    fn test_movement_clamped_to_court() {
        let mut state = GameState::default();
        let input = InputState {
            left: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            update_grounded(&mut state, &input, 0.1);
        }
        assert_eq!(state.ball.pos.x, COURT_MIN_X);
        assert_eq!(state.ball.pos.z, COURT_MAX_Z);
    }

    #[test]
    fn test_disabled_in_flight() {
        let mut state = GameState::default();
        state.ball.in_flight = true;
        let input = InputState {
            left: true,
            power_up: true,
            ..Default::default()
        };
        update_grounded(&mut state, &input, 0.5);
        assert_eq!(state.ball.pos, Vec3::new(0.0, GROUND_LEVEL, 0.0));
        assert_eq!(state.power.percent(), DEFAULT_POWER);
    }

    #[test]
    fn test_power_ramp() {
        let mut state = GameState::default();
        let up = InputState {
            power_up: true,
            ..Default::default()
        };
        update_grounded(&mut state, &up, 0.5);
        assert!((state.power.percent() - 75.0).abs() < 1e-4);
        update_grounded(&mut state, &up, 1.0);
        assert_eq!(state.power.percent(), 100.0);

        let down = InputState {
            power_down: true,
            ..Default::default()
        };
        update_grounded(&mut state, &down, 3.0);
        assert_eq!(state.power.percent(), 0.0);
    }

    proptest! {
        #[test]
        fn power_and_position_stay_bounded(
            frames in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..0.1),
                1..200,
            )
        ) {
            let mut state = GameState::default();
            for (left, right, up, down, power_up, power_down, dt) in frames {
                let input = InputState {
                    left,
                    right,
                    up,
                    down,
                    power_up,
                    power_down,
                    ..Default::default()
                };
                update_grounded(&mut state, &input, dt);
                prop_assert!(state.tuning.physics.court.contains(state.ball.pos));
                prop_assert!((0.0..=MAX_POWER).contains(&state.power.percent()));
            }
        }
    }
}
