//! Made-shot detection
//!
//! A shot counts when the ball is descending inside the rim sphere, in the
//! band just below rim height, and close enough to the hoop axis to be
//! through the net rather than on the rim. Checks are per step, so a very fast
//! ball can pass the band between two steps without registering.

use super::state::{Ball, Hoop, ShotResult, Side};
use crate::planar_distance;
use crate::tuning::HoopTuning;

/// Result of one scoring check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringOutcome {
    /// No change to the current shot result
    Unchanged,
    /// The ball just went through this hoop
    Made(Side),
}

/// Ball is near the rim and heading down through the scoring band
fn is_candidate(ball: &Ball, hoop: &Hoop, tuning: &HoopTuning) -> bool {
    ball.pos.distance(hoop.position) < hoop.rim_radius
        && ball.pos.y < hoop.rim_height
        && ball.pos.y > hoop.rim_height - tuning.scoring_band
        && ball.vel.y < 0.0
}

/// Evaluate the ball against every hoop in order; the first confirmed hoop wins
pub fn check_scoring(
    ball: &Ball,
    hoops: &[Hoop],
    current: Option<ShotResult>,
    tuning: &HoopTuning,
) -> ScoringOutcome {
    if current == Some(ShotResult::Made) {
        return ScoringOutcome::Unchanged;
    }

    for hoop in hoops {
        if !is_candidate(ball, hoop, tuning) {
            continue;
        }
        if planar_distance(ball.pos, hoop.position) < hoop.rim_radius * tuning.confirm_factor {
            return ScoringOutcome::Made(hoop.side);
        }
    }

    ScoringOutcome::Unchanged
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn setup(offset: f32, drop: f32, vy: f32) -> (Ball, [Hoop; 2], HoopTuning) {
        let tuning = HoopTuning::default();
        let hoops = Hoop::pair(&tuning);
        let rim = hoops[1].position;
        let ball = Ball {
            pos: Vec3::new(rim.x - offset, rim.y - drop, rim.z),
            vel: Vec3::new(0.0, vy, 0.0),
            in_flight: true,
            rotation: Vec3::ZERO,
        };
        (ball, hoops, tuning)
    }

    #[test]
    fn test_through_the_net_scores() {
        let (ball, hoops, tuning) = setup(0.3, 0.2, -2.0);
        assert_eq!(
            check_scoring(&ball, &hoops, None, &tuning),
            ScoringOutcome::Made(Side::Right)
        );
    }

    #[test]
    fn test_on_the_rim_does_not_score() {
        // Inside the 3D candidate sphere, outside the 0.36m horizontal gate
        let (ball, hoops, tuning) = setup(0.4, 0.2, -2.0);
        assert!(is_candidate(&ball, &hoops[1], &tuning));
        assert_eq!(
            check_scoring(&ball, &hoops, None, &tuning),
            ScoringOutcome::Unchanged
        );
    }

    #[test]
    fn test_rising_ball_does_not_score() {
        let (ball, hoops, tuning) = setup(0.1, 0.2, 3.0);
        assert_eq!(
            check_scoring(&ball, &hoops, None, &tuning),
            ScoringOutcome::Unchanged
        );
    }

    #[test]
    fn test_above_rim_does_not_score() {
        let (ball, hoops, tuning) = setup(0.0, -0.1, -2.0);
        assert_eq!(
            check_scoring(&ball, &hoops, None, &tuning),
            ScoringOutcome::Unchanged
        );
    }

    #[test]
    fn test_made_latch_is_idempotent() {
        let (ball, hoops, tuning) = setup(0.3, 0.2, -2.0);
        for _ in 0..5 {
            assert_eq!(
                check_scoring(&ball, &hoops, Some(ShotResult::Made), &tuning),
                ScoringOutcome::Unchanged
            );
        }
        // A missed result does not block a late make
        assert_eq!(
            check_scoring(&ball, &hoops, Some(ShotResult::Missed), &tuning),
            ScoringOutcome::Made(Side::Right)
        );
    }

    #[test]
    fn test_left_hoop() {
        let tuning = HoopTuning::default();
        let hoops = Hoop::pair(&tuning);
        let ball = Ball {
            pos: hoops[0].position - Vec3::new(0.0, 0.1, 0.0),
            vel: Vec3::new(0.5, -1.0, 0.0),
            in_flight: true,
            rotation: Vec3::ZERO,
        };
        assert_eq!(
            check_scoring(&ball, &hoops, None, &tuning),
            ScoringOutcome::Made(Side::Left)
        );
    }
}
