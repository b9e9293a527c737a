//! What the host draws: field tiles, drive status and scoreboard strings

use super::coordinate::Coordinate;
use super::game::Game;
use super::state::{GameState, PlayState};
use super::team::{Orientation, Side, Team};

/// Tile images the field view needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    HomeLeft,
    HomeRight,
    VisitorLeft,
    VisitorRight,
    Football,
}

impl TileKind {
    pub fn for_team(side: Side, orientation: Orientation) -> Self {
        match (side, orientation) {
            (Side::Home, Orientation::Left) => TileKind::HomeLeft,
            (Side::Home, Orientation::Right) => TileKind::HomeRight,
            (Side::Visitor, Orientation::Left) => TileKind::VisitorLeft,
            (Side::Visitor, Orientation::Right) => TileKind::VisitorRight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: Coordinate,
}

/// Tiles to draw for one master tick. Empty means "clear the field".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub tiles: Vec<Tile>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Topmost tile at `pos`
    pub fn tile_at(&self, pos: Coordinate) -> Option<TileKind> {
        self.tiles.iter().rev().find(|t| t.pos == pos).map(|t| t.kind)
    }

    fn push(&mut self, kind: TileKind, pos: Coordinate) {
        if pos.in_bounds() {
            self.tiles.push(Tile { kind, pos });
        }
    }

    fn push_team(&mut self, team: &Team, flash: bool) {
        let kind = TileKind::for_team(team.side, team.orientation);
        for player in &team.players {
            if !player.flashing || flash {
                self.push(kind, player.pos);
            }
        }
    }
}

fn ordinal(n: u32) -> &'static str {
    match n {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

impl Game {
    /// Tiles for the current flash parity
    pub fn frame(&self) -> Frame {
        let mut frame = Frame::default();
        let flash = self.flash;

        match self.state {
            PlayState::PlayDead => match self.game_state {
                GameState::Kickoff
                | GameState::FreeKick
                | GameState::Touchdown
                | GameState::Safety
                | GameState::FieldGoalMake
                | GameState::FieldGoalMiss
                | GameState::Touchback => {}
                _ => self.push_players(&mut frame, flash),
            },
            PlayState::PlayLive | PlayState::PreSnap | PlayState::KickReceived => {
                self.push_players(&mut frame, flash);
            }
            PlayState::Pass => {
                self.push_players(&mut frame, flash);
                frame.push(TileKind::Football, self.ball_pos);
            }
            PlayState::PreKickoff => {
                self.push_players(&mut frame, flash);
                let qb = self.offense.quarterback().pos;
                let tee = Coordinate::new(qb.x + self.offense.orientation.direction(), qb.y);
                frame.push(TileKind::Football, tee);
            }
            PlayState::Kick => frame.push(TileKind::Football, self.ball_pos),
            PlayState::GameOver => {}
        }

        frame
    }

    fn push_players(&self, frame: &mut Frame, flash: bool) {
        frame.push_team(&self.offense, flash);
        frame.push_team(&self.defense, flash);
    }

    /// "Kickoff", "Punt", or down and distance such as "3rd and 4"
    pub fn drive_status(&self) -> String {
        match self.game_state {
            GameState::Kickoff => "Kickoff".to_string(),
            GameState::Punt => "Punt".to_string(),
            GameState::FreeKick => "Free Kick".to_string(),
            GameState::FieldGoalAttempt => "Field Goal".to_string(),
            GameState::KickReturn => "Kick Return".to_string(),
            _ => {
                let to_go = (self.first_down_pos - self.field_pos) * self.offense.orientation.direction();
                format!("{} and {}", ordinal(self.series_down), to_go)
            }
        }
    }

    /// Ball spot relative to the offense, e.g. "Own 20", "Opp 35" or "50"
    pub fn field_position_label(&self) -> String {
        let attacking_right = self.offense.orientation == Orientation::Right;
        if self.field_pos > 50 {
            let side = if attacking_right { "Opp" } else { "Own" };
            format!("{} {}", side, 100 - self.field_pos)
        } else if self.field_pos < 50 {
            let side = if attacking_right { "Own" } else { "Opp" };
            format!("{} {}", side, self.field_pos)
        } else {
            "50".to_string()
        }
    }

    /// Scoreboard clock, "MM:SS.s"
    pub fn clock_label(&self) -> String {
        let secs = self.clock.time_left_secs();
        let mins = (secs / 60.0).floor();
        format!("{:02}:{:04.1}", mins as u32, secs - mins * 60.0)
    }
}
