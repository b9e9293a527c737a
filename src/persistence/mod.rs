//! Save/load of an in-progress game
//!
//! Games are stored as a versioned JSON envelope. Loading refuses envelopes
//! written by a different format version instead of guessing at them, and
//! checks the game against the rules `Game::restore` relies on.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Coordinate, SavedGame, Team, TeamKind};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub game: SavedGame,
}

/// Consistency rule a loaded game broke
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveRule {
    OffenseRoster,
    DefenseRoster,
    TeamsShareSide,
    TeamsShareOrientation,
    PlayerPosition,
    BallPosition,
    FieldPosition,
    SeriesDown,
    PeriodLength,
    ClockTime,
    KickMeterPowerRange,
    KickMeterDelayRange,
}

impl fmt::Display for SaveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffenseRoster => write!(f, "OFFENSE_ROSTER"),
            Self::DefenseRoster => write!(f, "DEFENSE_ROSTER"),
            Self::TeamsShareSide => write!(f, "TEAMS_SHARE_SIDE"),
            Self::TeamsShareOrientation => write!(f, "TEAMS_SHARE_ORIENTATION"),
            Self::PlayerPosition => write!(f, "PLAYER_POSITION"),
            Self::BallPosition => write!(f, "BALL_POSITION"),
            Self::FieldPosition => write!(f, "FIELD_POSITION"),
            Self::SeriesDown => write!(f, "SERIES_DOWN"),
            Self::PeriodLength => write!(f, "PERIOD_LENGTH"),
            Self::ClockTime => write!(f, "CLOCK_TIME"),
            Self::KickMeterPowerRange => write!(f, "KICK_METER_POWER_RANGE"),
            Self::KickMeterDelayRange => write!(f, "KICK_METER_DELAY_RANGE"),
        }
    }
}

#[derive(Debug)]
pub enum PersistError {
    Json(serde_json::Error),
    Io(std::io::Error),
    UnsupportedVersion { found: u32, expected: u32 },
    Invalid(SaveRule),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed save: {e}"),
            Self::Io(e) => write!(f, "save file I/O failed: {e}"),
            Self::UnsupportedVersion { found, expected } => {
                write!(f, "unsupported save version {found} (expected {expected})")
            }
            Self::Invalid(rule) => write!(f, "inconsistent save: {rule}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::UnsupportedVersion { .. } | Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub fn to_json(game: &SavedGame) -> Result<String, PersistError> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        game: game.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn from_json(json: &str) -> Result<SavedGame, PersistError> {
    // Check the version before committing to the game layout
    #[derive(Deserialize)]
    struct VersionOnly {
        version: u32,
    }

    let VersionOnly { version } = serde_json::from_str(json)?;
    if version != SAVE_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            expected: SAVE_VERSION,
        });
    }

    let envelope: SaveEnvelope = serde_json::from_str(json)?;
    validate(&envelope.game).map_err(PersistError::Invalid)?;
    Ok(envelope.game)
}

fn roster_matches(team: &Team, kind: TeamKind) -> bool {
    let expected = match kind {
        TeamKind::Offense => Team::offense(team.side, team.orientation),
        TeamKind::Defense => Team::defense(team.side, team.orientation),
    };
    team.kind == kind
        && team.players.len() == expected.players.len()
        && team
            .players
            .iter()
            .zip(&expected.players)
            .all(|(p, e)| p.role == e.role)
}

/// Off the field, or somewhere on the grid
fn placeable(pos: Coordinate) -> bool {
    pos == Coordinate::OFF_FIELD || pos.in_bounds()
}

/// Check everything `Game::restore` assumes about a saved game
pub fn validate(game: &SavedGame) -> Result<(), SaveRule> {
    if !roster_matches(&game.offense, TeamKind::Offense) {
        return Err(SaveRule::OffenseRoster);
    }
    if !roster_matches(&game.defense, TeamKind::Defense) {
        return Err(SaveRule::DefenseRoster);
    }
    if game.offense.side == game.defense.side {
        return Err(SaveRule::TeamsShareSide);
    }
    if game.offense.orientation == game.defense.orientation {
        return Err(SaveRule::TeamsShareOrientation);
    }
    let players = game.offense.players.iter().chain(&game.defense.players);
    if !players.map(|p| p.pos).all(placeable) {
        return Err(SaveRule::PlayerPosition);
    }
    if !placeable(game.ball_pos) {
        return Err(SaveRule::BallPosition);
    }

    let yard_lines = [game.field_pos, game.line_of_scrimmage, game.first_down_pos];
    if !yard_lines.iter().all(|y| (0..=100).contains(y)) {
        return Err(SaveRule::FieldPosition);
    }
    if !(1..=crate::consts::DOWNS_PER_SERIES).contains(&game.series_down) {
        return Err(SaveRule::SeriesDown);
    }

    let max_mins = Settings::MAX_PERIOD_LENGTH_MINS;
    let clock = &game.game_clock;
    if !(1..=max_mins).contains(&game.period_length_mins)
        || !(1..=max_mins * 60).contains(&clock.period_length)
    {
        return Err(SaveRule::PeriodLength);
    }
    if !clock.clock_secs.is_finite()
        || !(0.0..=clock.period_length as f32).contains(&clock.clock_secs)
    {
        return Err(SaveRule::ClockTime);
    }

    if game.kick_meter.min >= game.kick_meter.max {
        return Err(SaveRule::KickMeterPowerRange);
    }
    if game.kick_meter.min_delay >= game.kick_meter.max_delay {
        return Err(SaveRule::KickMeterDelayRange);
    }
    Ok(())
}

/// Write through a temporary file so a crash never leaves a torn save
pub fn save_to_path(game: &SavedGame, path: &Path) -> Result<(), PersistError> {
    let json = to_json(game)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    log::info!("Game saved to {}", path.display());
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<SavedGame, PersistError> {
    let json = std::fs::read_to_string(path)?;
    let game = from_json(&json)?;
    log::info!("Game loaded from {}", path.display());
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Game;

    fn mid_drive() -> SavedGame {
        let mut game = Game::new(&Settings::default(), 11);
        game.kick();
        game.advance(3_000);
        game.huddle();
        game.snapshot()
    }

    #[test]
    fn test_json_round_trip() {
        let saved = mid_drive();
        let json = to_json(&saved).unwrap();
        assert!(json.contains("\"version\": 1"));
        assert_eq!(from_json(&json).unwrap(), saved);
    }

    #[test]
    fn test_rejects_other_versions() {
        let saved = mid_drive();
        let json = to_json(&saved).unwrap().replacen("\"version\": 1", "\"version\": 9", 1);
        match from_json(&json) {
            Err(PersistError::UnsupportedVersion { found, expected }) => {
                assert_eq!(found, 9);
                assert_eq!(expected, SAVE_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(from_json("{not json"), Err(PersistError::Json(_))));
        assert!(matches!(
            from_json(r#"{"version":1,"game":{}}"#),
            Err(PersistError::Json(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("hhfootball-save-{}.json", std::process::id()));
        let saved = mid_drive();
        save_to_path(&saved, &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), saved);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(load_from_path(&path), Err(PersistError::Io(_))));
    }

    fn assert_rule(saved: &SavedGame, rule: SaveRule) {
        let json = to_json(saved).unwrap();
        match from_json(&json) {
            Err(PersistError::Invalid(found)) => assert_eq!(found, rule),
            other => panic!("expected {rule}, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_inverted_kick_meter() {
        let mut saved = mid_drive();
        saved.kick_meter.max = saved.kick_meter.min - 15;
        assert_rule(&saved, SaveRule::KickMeterPowerRange);

        let mut saved = mid_drive();
        saved.kick_meter.min_delay = saved.kick_meter.max_delay;
        assert_rule(&saved, SaveRule::KickMeterDelayRange);
    }

    #[test]
    fn test_rejects_broken_rosters() {
        let mut saved = mid_drive();
        saved.offense.players.clear();
        assert_rule(&saved, SaveRule::OffenseRoster);

        let mut saved = mid_drive();
        saved.defense.players.pop();
        assert_rule(&saved, SaveRule::DefenseRoster);

        let mut saved = mid_drive();
        saved.defense.kind = TeamKind::Offense;
        assert_rule(&saved, SaveRule::DefenseRoster);

        let mut saved = mid_drive();
        saved.defense.side = saved.offense.side;
        assert_rule(&saved, SaveRule::TeamsShareSide);

        let mut saved = mid_drive();
        saved.defense.orientation = saved.offense.orientation;
        assert_rule(&saved, SaveRule::TeamsShareOrientation);

        let mut saved = mid_drive();
        saved.offense.players[0].set(40, 1);
        assert_rule(&saved, SaveRule::PlayerPosition);
    }

    #[test]
    fn test_rejects_out_of_range_numbers() {
        let mut saved = mid_drive();
        saved.field_pos = 101;
        assert_rule(&saved, SaveRule::FieldPosition);

        let mut saved = mid_drive();
        saved.series_down = 0;
        assert_rule(&saved, SaveRule::SeriesDown);

        let mut saved = mid_drive();
        saved.period_length_mins = u32::MAX;
        assert_rule(&saved, SaveRule::PeriodLength);

        let mut saved = mid_drive();
        saved.game_clock.clock_secs = -3.0;
        assert_rule(&saved, SaveRule::ClockTime);
    }

    #[test]
    fn test_inconsistent_save_file_reports_error() {
        let path = std::env::temp_dir().join(format!(
            "hhfootball-bad-save-{}.json",
            std::process::id()
        ));
        let mut saved = mid_drive();
        saved.kick_meter.max = 5;
        save_to_path(&saved, &path).unwrap();
        let err = load_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(err.to_string(), "inconsistent save: KICK_METER_POWER_RANGE");
    }

    #[test]
    fn test_error_display() {
        let err = PersistError::UnsupportedVersion {
            found: 2,
            expected: 1,
        };
        assert_eq!(err.to_string(), "unsupported save version 2 (expected 1)");
    }
}
