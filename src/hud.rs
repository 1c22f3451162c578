//! Presentation data for the on-screen HUD
//!
//! The host renders these; nothing here touches the DOM.

use glam::Vec3;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Cells in the power bar
pub const POWER_BAR_CELLS: u32 = 10;

const MADE_COLOR: &str = "#4CAF50";
const MISSED_COLOR: &str = "#f44336";

/// Everything the scoreboard and power meter show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub shots_made: u32,
    pub shot_attempts: u32,
    /// Make percentage, rounded
    pub accuracy: u32,
    /// Shot power, rounded
    pub power_percent: u32,
    /// Filled power bar cells out of [`POWER_BAR_CELLS`]
    pub power_cells: u32,
    pub in_flight: bool,
    pub demo_mode: bool,
    pub ball_pos: Vec3,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let power = state.power.percent();
        Self {
            score: state.stats.score,
            shots_made: state.stats.shots_made,
            shot_attempts: state.stats.shot_attempts,
            accuracy: state.stats.accuracy(),
            power_percent: power.round() as u32,
            power_cells: ((power / 10.0).floor() as u32).min(POWER_BAR_CELLS),
            in_flight: state.ball.in_flight,
            demo_mode: state.settings.demo_mode,
            ball_pos: state.ball.pos,
        }
    }

    /// Text power meter, e.g. `█████░░░░░`
    pub fn power_bar(&self) -> String {
        let filled = self.power_cells.min(POWER_BAR_CELLS) as usize;
        let empty = POWER_BAR_CELLS as usize - filled;
        format!("{}{}", "█".repeat(filled), "░".repeat(empty))
    }

    /// `made/attempts`
    pub fn shots_line(&self) -> String {
        format!("{}/{}", self.shots_made, self.shot_attempts)
    }

    /// Whether the scoreboard changed; the host skips DOM writes otherwise
    pub fn differs_from(&self, other: Option<&HudSnapshot>) -> bool {
        other != Some(self)
    }
}

/// Transient banner shown after a shot resolves
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub message: &'static str,
    pub color: &'static str,
    /// How long the banner stays visible
    pub secs: f32,
}

impl Feedback {
    /// Banner for a shot result event, None for everything else
    pub fn for_event(event: &GameEvent, settings: &Settings) -> Option<Self> {
        let (message, color) = match event {
            GameEvent::ShotMade { .. } => ("SHOT MADE!", MADE_COLOR),
            GameEvent::ShotMissed { .. } => ("MISSED SHOT", MISSED_COLOR),
            _ => return None,
        };
        Some(Self {
            message,
            color,
            secs: settings.feedback_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ShotPower, Side};

    #[test]
    fn test_snapshot_fresh_game() {
        let state = GameState::default();
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.score, 0);
        assert_eq!(hud.accuracy, 0);
        assert_eq!(hud.power_percent, 50);
        assert_eq!(hud.power_bar(), "█████░░░░░");
        assert_eq!(hud.shots_line(), "0/0");
    }

    #[test]
    fn test_snapshot_counts_and_rounding() {
        let mut state = GameState::default();
        state.stats.shot_attempts = 3;
        state.stats.shots_made = 2;
        state.stats.score = 4;
        state.power = ShotPower::new(79.6);
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(hud.accuracy, 67);
        assert_eq!(hud.power_percent, 80);
        // The bar floors while the number rounds
        assert_eq!(hud.power_cells, 7);
        assert_eq!(hud.shots_line(), "2/3");

        state.power = ShotPower::new(100.0);
        let full = HudSnapshot::from_state(&state);
        assert_eq!(full.power_bar(), "██████████");
        assert!(full.differs_from(Some(&hud)));
        assert!(!full.differs_from(Some(&full.clone())));
        assert!(full.differs_from(None));
    }

    #[test]
    fn test_feedback_for_results_only() {
        let settings = Settings::default();
        let made = Feedback::for_event(
            &GameEvent::ShotMade {
                shot: 1,
                target: Side::Right,
                score: 2,
            },
            &settings,
        )
        .unwrap();
        assert_eq!(made.message, "SHOT MADE!");
        assert_eq!(made.color, "#4CAF50");
        assert_eq!(made.secs, 2.0);

        let missed = Feedback::for_event(&GameEvent::ShotMissed { shot: 1 }, &settings).unwrap();
        assert_eq!(missed.message, "MISSED SHOT");
        assert_eq!(missed.color, "#f44336");

        assert!(Feedback::for_event(&GameEvent::BallReset, &settings).is_none());
    }
}
