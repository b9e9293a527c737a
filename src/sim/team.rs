//! Players, teams and formations

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::consts::FIELD_LENGTH;

/// Which uniform a team wears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Home,
    Visitor,
}

/// Which end zone a team is attacking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    /// +1 when attacking right, -1 when attacking left
    #[inline]
    pub fn direction(&self) -> i32 {
        match self {
            Orientation::Left => -1,
            Orientation::Right => 1,
        }
    }
}

/// Player role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Quarterback,
    Receiver,
    Defender,
}

/// A single player on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub role: Role,
    pub pos: Coordinate,
    /// Highlighted after a tackle or interception
    pub flashing: bool,
}

impl Player {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            pos: Coordinate::OFF_FIELD,
            flashing: false,
        }
    }

    pub fn set(&mut self, x: i32, y: i32) {
        self.pos = Coordinate::new(x, y);
    }

    pub fn clear(&mut self) {
        self.pos = Coordinate::OFF_FIELD;
    }

    pub fn is_visible(&self) -> bool {
        self.pos.is_on_field()
    }
}

/// Formation table selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formation {
    PreSnap,
    Kickoff,
}

/// Offense or defense roster layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamKind {
    Offense,
    Defense,
}

const QUARTERBACK: usize = 0;
const RECEIVER: usize = 1;

/// Relative placements, `None` leaves the player off the field.
/// Columns are measured from the team's own end when attacking right.
const OFFENSE_PRE_SNAP: [Option<(i32, i32)>; 3] = [Some((2, 1)), None, None];
const OFFENSE_KICKOFF: [Option<(i32, i32)>; 3] = [Some((2, 1)), Some((1, 0)), Some((1, 2))];
const DEFENSE_PRE_SNAP: [Option<(i32, i32)>; 6] = [
    Some((6, 0)),
    Some((6, 1)),
    Some((6, 2)),
    Some((4, 1)),
    Some((2, 0)),
    Some((0, 2)),
];
const DEFENSE_KICKOFF: [Option<(i32, i32)>; 6] = [None; 6];

/// A fixed roster with a side and an orientation.
///
/// The offense holds one quarterback followed by two receivers; the defense
/// holds six defenders. Side and orientation are only ever swapped between
/// the two teams by the owning game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub kind: TeamKind,
    pub side: Side,
    pub orientation: Orientation,
    pub players: Vec<Player>,
}

impl Team {
    pub fn offense(side: Side, orientation: Orientation) -> Self {
        Self {
            kind: TeamKind::Offense,
            side,
            orientation,
            players: vec![
                Player::new(Role::Quarterback),
                Player::new(Role::Receiver),
                Player::new(Role::Receiver),
            ],
        }
    }

    pub fn defense(side: Side, orientation: Orientation) -> Self {
        Self {
            kind: TeamKind::Defense,
            side,
            orientation,
            players: (0..DEFENSE_PRE_SNAP.len())
                .map(|_| Player::new(Role::Defender))
                .collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn quarterback(&self) -> &Player {
        &self.players[QUARTERBACK]
    }

    pub fn quarterback_mut(&mut self) -> &mut Player {
        &mut self.players[QUARTERBACK]
    }

    /// Primary receiver (the one placed at the snap)
    pub fn receiver(&self) -> &Player {
        &self.players[RECEIVER]
    }

    pub fn receiver_mut(&mut self) -> &mut Player {
        &mut self.players[RECEIVER]
    }

    fn formation(&self, formation: Formation) -> &'static [Option<(i32, i32)>] {
        match (self.kind, formation) {
            (TeamKind::Offense, Formation::PreSnap) => &OFFENSE_PRE_SNAP,
            (TeamKind::Offense, Formation::Kickoff) => &OFFENSE_KICKOFF,
            (TeamKind::Defense, Formation::PreSnap) => &DEFENSE_PRE_SNAP,
            (TeamKind::Defense, Formation::Kickoff) => &DEFENSE_KICKOFF,
        }
    }

    /// Place every player from the formation table, mirrored when attacking left
    pub fn arrange_formation(&mut self, formation: Formation) {
        let table = self.formation(formation);
        let orientation = self.orientation;
        for (player, slot) in self.players.iter_mut().zip(table) {
            player.flashing = false;
            match *slot {
                None => player.clear(),
                Some((fx, fy)) => match orientation {
                    Orientation::Right => player.set(fx, fy),
                    Orientation::Left => player.set(FIELD_LENGTH - 1 - fx, fy),
                },
            }
        }
    }

    /// Index of the first player standing on `pos`
    pub fn find_player(&self, pos: Coordinate) -> Option<usize> {
        self.players.iter().position(|p| p.pos == pos)
    }

    pub fn random_player<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.size())
    }

    pub fn clear_all(&mut self) {
        for player in &mut self.players {
            player.clear();
        }
    }
}
