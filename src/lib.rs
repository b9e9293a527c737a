//! HH Football - A handheld-style arcade football simulation
//!
//! Core modules:
//! - `sim`: Deterministic play simulation (state machine, clock, AI, scheduling)
//! - `settings`: Difficulty presets and user preferences
//! - `audio`: Sound cue vocabulary and mute/loop bookkeeping
//! - `persistence`: Versioned save/load of an in-progress game

pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};
pub use sim::Game;

/// Game configuration constants
pub mod consts {
    /// Number of tiles between the end zones
    pub const FIELD_LENGTH: i32 = 10;
    /// Number of tiles between the sidelines
    pub const FIELD_WIDTH: i32 = 3;

    /// Master tick: flash parity, game clock and ball flight (ms)
    pub const GAME_REFRESH_MS: u64 = 100;
    /// Defender/receiver AI cadence (ms)
    pub const AI_UPDATE_MS: u64 = 250;
    /// Pause between a dead ball and the next pre-snap setup (ms)
    pub const HUDDLE_DELAY_MS: u64 = 2000;
    /// Haptic pulse length on a tackle (ms)
    pub const VIBRATE_MS: u32 = 100;

    /// Game clock decrement per master tick, in tenths of a second
    pub const CLOCK_TENTHS_PER_TICK: u32 = 1;

    /// Yard lines (from the kicking team's own goal)
    pub const TOUCHBACK_POS: i32 = 20;
    pub const KICKOFF_POS: i32 = 30;
    pub const FREE_KICK_POS: i32 = 20;

    pub const DOWNS_PER_SERIES: u32 = 4;
    pub const YARDS_FOR_FIRST_DOWN: i32 = 10;

    /// Defenders closer than this column to the passer's end cannot intercept
    pub const MIN_INTERCEPT_COLUMN: i32 = 3;

    /// Receiver offset from the quarterback at the snap
    pub const RECEIVER_SNAP_OFFSET: i32 = 2;

    /// Kick meter power ranges
    pub const KICKOFF_POWER: (i32, i32) = (20, 75);
    pub const FIELD_GOAL_POWER: (i32, i32) = (5, 50);
    pub const PUNT_POWER: (i32, i32) = (10, 60);

    /// Kick meter step delay bounds (ms)
    pub const METER_MIN_DELAY_MS: u64 = 10;
    pub const METER_MAX_DELAY_MS: u64 = 100;

    /// Points
    pub const TOUCHDOWN_POINTS: u32 = 7;
    pub const FIELD_GOAL_POINTS: u32 = 3;
    pub const SAFETY_POINTS: u32 = 2;
}

/// Mirror a yard line across midfield (used when teams change ends)
#[inline]
pub fn mirror_field_pos(pos: i32) -> i32 {
    if pos > 50 { 50 - (pos - 50) } else { 50 + (50 - pos) }
}
