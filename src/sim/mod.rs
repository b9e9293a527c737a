//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only, advanced by the host
//! - Seeded RNG only
//! - One timeline for every cadence (tick, AI, huddle, kick meter)
//! - No rendering or platform dependencies

pub mod ai;
pub mod clock;
pub mod coordinate;
pub mod game;
pub mod kick_meter;
pub mod percentage;
pub mod rules;
pub mod scheduler;
pub mod state;
pub mod team;
pub mod view;

pub use ai::step_toward;
pub use clock::{ClockHandler, ClockSnapshot, GameClock, Period};
pub use coordinate::Coordinate;
pub use game::{Command, Game, SavedGame};
pub use kick_meter::{KickMeter, KickMeterSnapshot};
pub use percentage::Percentage;
pub use scheduler::{Scheduler, TimerId};
pub use state::{EventQueue, GameEvent, GameState, InfoMessage, PlayState};
pub use team::{Formation, Orientation, Player, Role, Side, Team, TeamKind};
pub use view::{Frame, Tile, TileKind};
