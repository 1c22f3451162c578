//! Gameplay settings
//!
//! Held in memory for the session only. The host may build them from JSON.

use serde::{Deserialize, Serialize};

/// How the deferred miss check treats later shots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissTimerPolicy {
    /// A new shot or reset cancels the pending miss check of the previous one
    #[default]
    #[serde(rename = "cancel", alias = "cancel-on-new-shot")]
    CancelOnNewShot,
    /// Every miss check fires once its delay elapses, even if a newer shot began
    #[serde(rename = "parity", alias = "legacy")]
    Parity,
}

impl MissTimerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissTimerPolicy::CancelOnNewShot => "cancel",
            MissTimerPolicy::Parity => "parity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cancel" | "cancel-on-new-shot" => Some(MissTimerPolicy::CancelOnNewShot),
            "parity" | "legacy" => Some(MissTimerPolicy::Parity),
            _ => None,
        }
    }

    /// Whether starting a shot or resetting drops the previous pending check
    pub fn cancels_stale_checks(&self) -> bool {
        matches!(self, MissTimerPolicy::CancelOnNewShot)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub miss_timer: MissTimerPolicy,
    /// Attract mode: the game walks and shoots on its own
    pub demo_mode: bool,
    /// Seconds a "SHOT MADE!" / "MISSED SHOT" banner stays up
    pub feedback_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            miss_timer: MissTimerPolicy::default(),
            demo_mode: false,
            feedback_secs: 2.0,
        }
    }
}

impl Settings {
    /// Settings with the legacy non-cancelling miss timer
    pub fn parity() -> Self {
        Self {
            miss_timer: MissTimerPolicy::Parity,
            ..Self::default()
        }
    }

    /// Parse settings JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings JSON, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings: miss timer {}, demo {}",
                    settings.miss_timer.as_str(),
                    settings.demo_mode
                );
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names_round_trip() {
        for policy in [MissTimerPolicy::CancelOnNewShot, MissTimerPolicy::Parity] {
            assert_eq!(MissTimerPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(MissTimerPolicy::from_str("LEGACY"), Some(MissTimerPolicy::Parity));
        assert_eq!(MissTimerPolicy::from_str("never"), None);
    }

    #[test]
    fn test_settings_json_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "demo_mode": true }"#).unwrap();
        assert!(settings.demo_mode);
        assert_eq!(settings.miss_timer, MissTimerPolicy::CancelOnNewShot);
        assert_eq!(settings.feedback_secs, 2.0);
    }

    #[test]
    fn test_settings_select_parity_from_json() {
        let settings = Settings::from_json_or_default(
            r#"{ "miss_timer": "parity", "feedback_secs": 3.5 }"#,
        );
        assert_eq!(settings.miss_timer, MissTimerPolicy::Parity);
        assert_eq!(settings.feedback_secs, 3.5);
        assert_eq!(
            Settings::from_json(r#"{ "miss_timer": "legacy" }"#).unwrap(),
            Settings::parity()
        );
        // Policy names match the strings the command line accepts
        let named = format!(r#"{{ "miss_timer": "{}" }}"#, MissTimerPolicy::Parity.as_str());
        assert_eq!(
            Settings::from_json(&named).unwrap().miss_timer,
            MissTimerPolicy::Parity
        );
    }

    #[test]
    fn test_bad_settings_fall_back() {
        assert_eq!(
            Settings::from_json_or_default(r#"{ "miss_timer": "sometimes" }"#),
            Settings::default()
        );
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
