//! Game settings and preferences
//!
//! Stored as a small JSON file next to the binary (or wherever
//! `HHFOOTBALL_SETTINGS` points).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Percentage;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Chance that any defender moves on an AI tick
    pub fn defender_moves(&self) -> Percentage {
        match self {
            Difficulty::Easy => Percentage::new(25),
            Difficulty::Medium => Percentage::new(30),
            Difficulty::Hard => Percentage::new(50),
        }
    }

    /// Chance that the receiver moves on an AI tick
    pub fn receiver_moves(&self) -> Percentage {
        Percentage::new(10)
    }

    /// Chance that an adjacent defender is picked to make the tackle.
    /// Easy defenders never go for the tackle by choice.
    pub fn defender_tackles(&self) -> Option<Percentage> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Percentage::new(15)),
            Difficulty::Hard => Some(Percentage::new(50)),
        }
    }

    /// Base field goal success chance, before the kick power adjustment
    pub fn field_goal_is_good(&self) -> Percentage {
        match self {
            Difficulty::Easy => Percentage::new(90),
            Difficulty::Medium => Percentage::new(80),
            Difficulty::Hard => Percentage::new(70),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Minutes per quarter
    pub period_length_mins: u32,
    /// Sound effects on/off
    pub sound: bool,
    /// Haptic pulse on tackles
    pub vibrate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            period_length_mins: 4,
            sound: true,
            vibrate: true,
        }
    }
}

impl Settings {
    /// Environment variable naming a settings file
    pub const ENV_VAR: &'static str = "HHFOOTBALL_SETTINGS";
    /// Settings file looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "hhfootball-settings.json";
    /// Longest quarter a settings file may ask for
    pub const MAX_PERIOD_LENGTH_MINS: u32 = 60;

    /// Quarter length clamped to `1..=MAX_PERIOD_LENGTH_MINS`
    pub fn effective_period_length_mins(&self) -> u32 {
        self.period_length_mins.clamp(1, Self::MAX_PERIOD_LENGTH_MINS)
    }

    /// Period length in seconds
    pub fn period_length_secs(&self) -> u32 {
        self.effective_period_length_mins() * 60
    }

    /// Load from `$HHFOOTBALL_SETTINGS`, then `hhfootball-settings.json`,
    /// falling back to defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(Self::ENV_VAR) {
            if let Some(settings) = Self::load_from(Path::new(&path)) {
                return settings;
            }
        }

        if let Some(settings) = Self::load_from(Path::new(Self::DEFAULT_FILE)) {
            return settings;
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Read one settings file. Missing or malformed files yield `None`.
    pub fn load_from(path: &Path) -> Option<Self> {
        let json = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Some(settings)
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_difficulty_tables() {
        assert_eq!(Difficulty::Hard.defender_moves().value(), 50);
        assert_eq!(Difficulty::Medium.receiver_moves().value(), 10);
        assert!(Difficulty::Easy.defender_tackles().is_none());
        assert_eq!(Difficulty::Medium.defender_tackles().map(|p| p.value()), Some(15));
        assert_eq!(Difficulty::Easy.field_goal_is_good().value(), 90);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"hard"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.period_length_mins, 4);
        assert!(settings.sound);
        assert_eq!(settings.period_length_secs(), 240);
    }

    #[test]
    fn test_period_length_is_clamped() {
        let settings: Settings =
            serde_json::from_str(r#"{"period_length_mins":4294967295}"#).unwrap();
        assert_eq!(settings.effective_period_length_mins(), Settings::MAX_PERIOD_LENGTH_MINS);
        assert_eq!(settings.period_length_secs(), 3600);

        let zero = Settings {
            period_length_mins: 0,
            ..Settings::default()
        };
        assert_eq!(zero.period_length_secs(), 60);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "hhfootball-settings-test-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            difficulty: Difficulty::Easy,
            period_length_mins: 2,
            sound: false,
            vibrate: false,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load_from(&path), Some(settings));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_none() {
        assert_eq!(Settings::load_from(Path::new("/nonexistent/hhfootball.json")), None);
    }
}
