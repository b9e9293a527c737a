//! Defender and receiver AI, plus a demo-mode player for the offense

use glam::IVec2;
use rand::Rng;

use super::coordinate::Coordinate;
use super::game::{Command, Game};
use super::state::PlayState;
use super::team::{Orientation, TeamKind};
use crate::consts::{FIELD_LENGTH, FIELD_WIDTH};

/// Pick the next tile for a player heading to `target`.
///
/// Moves one tile along a single axis. `x_first` chooses which axis is tried
/// first; if that tile is occupied (or is no move at all) the other axis is
/// tried. Returns `None` when neither works.
pub fn step_toward(
    from: Coordinate,
    target: Coordinate,
    x_first: bool,
    is_occupied: impl Fn(Coordinate) -> bool,
) -> Option<Coordinate> {
    let step = (target.as_ivec2() - from.as_ivec2()).signum();
    let along_x = Coordinate::from(from.as_ivec2() + step * IVec2::X);
    let along_y = Coordinate::from(from.as_ivec2() + step * IVec2::Y);
    let candidates = if x_first {
        [along_x, along_y]
    } else {
        [along_y, along_x]
    };

    candidates
        .into_iter()
        .filter(|c| *c != from)
        .find(|c| !is_occupied(*c))
}

impl Game {
    /// AI timer handler. Returns whether the AI timer should keep running.
    pub(crate) fn on_update_game_ai(&mut self) -> bool {
        match self.state {
            PlayState::PlayLive => {
                self.on_move_defense();
                if self.state == PlayState::PlayLive {
                    self.on_move_receiver();
                }
                self.state == PlayState::PlayLive
            }
            PlayState::Pass | PlayState::Kick => true,
            _ => false,
        }
    }

    /// The receiver drifts toward the goal line on the ball carrier's row
    pub(crate) fn on_move_receiver(&mut self) {
        if !self.difficulty.receiver_moves().test(&mut self.rng)
            || !self.offense.receiver().is_visible()
        {
            return;
        }

        let goal_column = match self.offense.orientation {
            Orientation::Right => FIELD_LENGTH - 1,
            Orientation::Left => 0,
        };
        let target = Coordinate::new(goal_column, self.offense.quarterback().pos.y);
        self.move_player_toward(TeamKind::Offense, 1, target);
    }

    /// Hidden defenders come first, then an adjacent defender that wins the
    /// tackle roll, then anyone at random
    pub(crate) fn select_defender_to_move(&mut self) -> usize {
        let carrier = self.offense.quarterback().pos;
        let tackles = self.difficulty.defender_tackles();

        for (idx, defender) in self.defense.players.iter().enumerate() {
            if !defender.is_visible() {
                return idx;
            }
            if defender.pos.manhattan(carrier) == 1
                && tackles.is_some_and(|p| p.test(&mut self.rng))
            {
                return idx;
            }
        }

        self.defense.random_player(&mut self.rng)
    }

    pub(crate) fn on_move_defense(&mut self) {
        if !self.difficulty.defender_moves().test(&mut self.rng) {
            log::debug!("on_move_defense: not moving any defenders");
            return;
        }

        let idx = self.select_defender_to_move();
        let carrier = self.offense.quarterback().pos;
        let defender = self.defense.players[idx].pos;

        if defender.is_on_field() && defender.manhattan(carrier) == 1 {
            self.defense.players[idx].flashing = true;
            self.offense.quarterback_mut().flashing = true;
            self.handle_play_dead();
            return;
        }

        if defender.is_on_field() {
            self.move_player_toward(TeamKind::Defense, idx, carrier);
        } else {
            let spot = self.random_open_tile();
            log::debug!("on_move_defense: defender {} now visible at {}", idx, spot);
            self.defense.players[idx].pos = spot;
        }
    }

    fn random_open_tile(&mut self) -> Coordinate {
        loop {
            let spot = Coordinate::new(
                self.rng.random_range(0..FIELD_LENGTH),
                self.rng.random_range(0..FIELD_WIDTH),
            );
            if !self.is_occupied(spot) {
                return spot;
            }
            log::debug!("random_open_tile: {} occupied", spot);
        }
    }

    pub(crate) fn is_occupied(&self, pos: Coordinate) -> bool {
        self.offense.find_player(pos).is_some() || self.defense.find_player(pos).is_some()
    }

    fn move_player_toward(&mut self, kind: TeamKind, idx: usize, target: Coordinate) {
        let x_first = self.rng.random_bool(0.5);
        let team = match kind {
            TeamKind::Offense => &self.offense,
            TeamKind::Defense => &self.defense,
        };
        let from = team.players[idx].pos;

        match step_toward(from, target, x_first, |c| self.is_occupied(c)) {
            Some(next) => {
                let team = match kind {
                    TeamKind::Offense => &mut self.offense,
                    TeamKind::Defense => &mut self.defense,
                };
                team.players[idx].pos = next;
            }
            None => log::debug!("move_player_toward: no possible moves for {:?} {}", kind, idx),
        }
    }

    /// A simple autopilot for the offense, used by the headless demo.
    /// Runs at every opportunity, throws when the receiver is open on the
    /// carrier's row, and tries a field goal on fourth down.
    pub fn demo_command(&self) -> Option<Command> {
        if self.kick_meter.is_enabled() {
            return Some(Command::Kick);
        }

        let forward = match self.offense.orientation {
            Orientation::Right => Command::MoveRight,
            Orientation::Left => Command::MoveLeft,
        };
        let backward = match forward {
            Command::MoveRight => Command::MoveLeft,
            _ => Command::MoveRight,
        };

        match self.state {
            PlayState::PreSnap if self.series_down >= crate::consts::DOWNS_PER_SERIES => {
                Some(Command::Kick)
            }
            PlayState::PreSnap => Some(backward),
            PlayState::KickReceived => Some(forward),
            PlayState::PlayLive => {
                let qb = self.offense.quarterback().pos;
                let receiver = self.offense.receiver().pos;
                let open = receiver.is_on_field()
                    && receiver.y == qb.y
                    && (receiver.x - qb.x) * self.offense.orientation.direction() > 0;
                if open && !self.ball_across_line_of_scrimmage() {
                    Some(Command::Pass)
                } else {
                    Some(forward)
                }
            }
            PlayState::PlayDead => Some(Command::Huddle),
            _ => None,
        }
    }
}
