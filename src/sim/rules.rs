//! Down bookkeeping, scoring, possession changes, and ball flight
//!
//! These run inside `Game` on the same timeline as inputs and the AI.

use super::clock::Period;
use super::coordinate::Coordinate;
use super::game::Game;
use super::scheduler::TimerId;
use super::state::{GameEvent, GameState, InfoMessage, PlayState};
use super::team::{Formation, Orientation, Side};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::mirror_field_pos;
use rand::Rng;

impl Game {
    /// Line both teams up for the next play
    pub(crate) fn init_pre_snap(&mut self) {
        if self.state == PlayState::GameOver {
            return;
        }

        // Scores stay visible through the dead ball, then the scoring
        // team (or the team giving up the safety) kicks
        self.game_state = match self.game_state {
            GameState::Touchdown | GameState::FieldGoalMake => GameState::Kickoff,
            GameState::Safety => GameState::FreeKick,
            other => other,
        };

        self.handle_new_period();
        self.line_of_scrimmage = self.field_pos;

        match self.game_state {
            GameState::Kickoff | GameState::FreeKick => {
                let (spot, message) = if self.game_state == GameState::Kickoff {
                    (KICKOFF_POS, InfoMessage::Kickoff)
                } else {
                    (FREE_KICK_POS, InfoMessage::FreeKick)
                };
                self.state = PlayState::PreKickoff;
                self.field_pos = self.own_yard_line(spot);
                self.line_of_scrimmage = self.field_pos;
                self.arrange(Formation::Kickoff);
                self.events.info(message);
                self.enable_kick_meter(KICKOFF_POWER);
                log::info!("{:?} from the {}", self.game_state, self.field_pos);
                return;
            }
            GameState::Touchback => self.handle_touchback(),
            GameState::FieldGoalMiss
            | GameState::TurnoverOnDowns
            | GameState::Interception
            | GameState::Fumble => self.handle_change_of_possession(),
            _ => {}
        }

        self.state = PlayState::PreSnap;
        self.arrange(Formation::PreSnap);
        self.events.push(GameEvent::Sound {
            cue: SoundCue::Quarterback,
            looping: true,
        });
        self.push_score();
    }

    /// Only acts once the clock has run out on the previous period
    fn handle_new_period(&mut self) {
        if !self.clock.expired() {
            return;
        }

        match self.clock.period() {
            Period::EndOfFirstQuarter | Period::EndOfThirdQuarter => {
                // Same possession, other end of the field
                self.field_pos = mirror_field_pos(self.field_pos);
                self.line_of_scrimmage = self.field_pos;
                self.first_down_pos = mirror_field_pos(self.first_down_pos);
                self.swap_orientation();
                self.clock.set_period(&mut self.events);
                self.events.info(InfoMessage::ChangeSides);
                log::info!("Change sides, now {:?}", self.clock.period());
            }
            Period::Halftime => {
                self.offense.side = Side::Visitor;
                self.offense.orientation = Orientation::Left;
                self.defense.side = Side::Home;
                self.defense.orientation = Orientation::Right;
                self.game_state = GameState::Kickoff;
                self.clock.set_period(&mut self.events);
                log::info!("Second half");
            }
            _ => {}
        }
    }

    pub(crate) fn arrange(&mut self, formation: Formation) {
        self.offense.arrange_formation(formation);
        self.defense.arrange_formation(formation);
    }

    /// A yard line measured from the offense's own goal
    fn own_yard_line(&self, yards: i32) -> i32 {
        match self.offense.orientation {
            Orientation::Right => yards,
            Orientation::Left => 100 - yards,
        }
    }

    pub(crate) fn set_first_down_pos(&mut self) {
        self.first_down_pos = match self.offense.orientation {
            Orientation::Right => (self.field_pos + YARDS_FOR_FIRST_DOWN).min(100),
            Orientation::Left => (self.field_pos - YARDS_FOR_FIRST_DOWN).max(0),
        };
    }

    pub(crate) fn check_first_down(&self) -> bool {
        match self.offense.orientation {
            Orientation::Right => self.field_pos >= self.first_down_pos,
            Orientation::Left => self.field_pos <= self.first_down_pos,
        }
    }

    pub(crate) fn handle_first_down(&mut self) {
        self.series_down = 1;
        self.set_first_down_pos();
    }

    pub(crate) fn swap_orientation(&mut self) {
        std::mem::swap(&mut self.offense.orientation, &mut self.defense.orientation);
    }

    pub(crate) fn swap_sides(&mut self) {
        std::mem::swap(&mut self.offense.side, &mut self.defense.side);
    }

    fn handle_touchback(&mut self) {
        self.swap_sides();
        self.swap_orientation();
        self.field_pos = self.own_yard_line(TOUCHBACK_POS);
        self.line_of_scrimmage = self.field_pos;
        self.handle_first_down();
        self.game_state = GameState::DriveInProgress;
    }

    fn handle_change_of_possession(&mut self) {
        self.swap_sides();
        self.swap_orientation();
        self.handle_first_down();
        self.game_state = GameState::DriveInProgress;
        log::info!("Change of possession at {}", self.field_pos);
    }

    pub(crate) fn ball_across_line_of_scrimmage(&self) -> bool {
        match self.offense.orientation {
            Orientation::Right => self.field_pos > self.line_of_scrimmage,
            Orientation::Left => self.field_pos < self.line_of_scrimmage,
        }
    }

    pub(crate) fn is_touchdown(&self) -> bool {
        match self.offense.orientation {
            Orientation::Right => self.field_pos >= 100,
            Orientation::Left => self.field_pos <= 0,
        }
    }

    pub(crate) fn is_safety(&self) -> bool {
        match self.offense.orientation {
            Orientation::Right => self.field_pos <= 0,
            Orientation::Left => self.field_pos >= 100,
        }
    }

    /// End the play and settle the down
    pub(crate) fn handle_play_dead(&mut self) {
        self.clock.stop();
        self.scheduler.cancel(TimerId::AiUpdate);
        self.state = PlayState::PlayDead;

        match self.game_state {
            GameState::KickReturn => {
                self.tackle_feedback();
                self.handle_first_down();
                self.game_state = GameState::DriveInProgress;
            }
            GameState::Touchback => self.events.info(InfoMessage::Touchback),
            GameState::Touchdown => {
                self.events.sound(SoundCue::Touchdown);
                self.events.info(InfoMessage::Touchdown);
            }
            GameState::Safety => self.events.info(InfoMessage::Safety),
            GameState::FieldGoalMake => self.events.info(InfoMessage::FieldGoalMake),
            GameState::FieldGoalMiss => {
                self.field_pos = self.line_of_scrimmage;
                self.events.info(InfoMessage::FieldGoalMiss);
            }
            GameState::Interception => self.events.info(InfoMessage::Interception),
            GameState::Incomplete | GameState::DriveInProgress => {
                if self.game_state == GameState::Incomplete {
                    self.events.info(InfoMessage::Incomplete);
                    self.game_state = GameState::DriveInProgress;
                } else {
                    self.tackle_feedback();
                }
                self.settle_down();
            }
            _ => {}
        }

        self.events.sound(SoundCue::Whistle);

        match self.clock.period() {
            Period::EndOfFirstQuarter => self.end_of_period(InfoMessage::EndOfFirstQuarter),
            Period::Halftime => self.end_of_period(InfoMessage::Halftime),
            Period::EndOfThirdQuarter => self.end_of_period(InfoMessage::EndOfThirdQuarter),
            Period::GameOver => self.handle_game_over(),
            _ => {
                self.scheduler.schedule_once(TimerId::Huddle, HUDDLE_DELAY_MS);
            }
        }
    }

    /// Safety, first down, next down, or turnover on downs
    fn settle_down(&mut self) {
        if self.is_safety() {
            self.award_safety();
            self.events.info(InfoMessage::Safety);
        } else if self.check_first_down() {
            self.handle_first_down();
            self.events.sound(SoundCue::FirstDown);
            self.events.info(InfoMessage::FirstDown);
        } else if self.series_down >= DOWNS_PER_SERIES {
            self.game_state = GameState::TurnoverOnDowns;
            self.events.info(InfoMessage::TurnoverOnDowns);
        } else {
            self.series_down += 1;
            match self.series_down {
                2 => self.events.info(InfoMessage::SecondDown),
                3 => self.events.info(InfoMessage::ThirdDown),
                4 => self.events.info(InfoMessage::FourthDown),
                _ => {}
            }
        }
    }

    fn end_of_period(&mut self, message: InfoMessage) {
        self.events.info(message);
        self.scheduler.schedule_once(TimerId::Huddle, HUDDLE_DELAY_MS);
    }

    fn handle_game_over(&mut self) {
        self.state = PlayState::GameOver;
        for id in TimerId::ALL {
            self.scheduler.cancel(id);
        }
        self.kick_meter.disable();
        self.events.info(InfoMessage::GameOver);
        self.events.push(GameEvent::StopSound(SoundCue::Quarterback));
        self.events.push(GameEvent::StopSound(SoundCue::Crowd));
        log::info!(
            "Game over: home {} visitor {}",
            self.home_score,
            self.visitor_score
        );
    }

    /// Add points for `side` with the crowd reacting
    fn add_score(&mut self, side: Side, points: u32) {
        match side {
            Side::Home => {
                self.home_score += points;
                self.events.sound(SoundCue::CrowdCheer);
            }
            Side::Visitor => {
                self.visitor_score += points;
                self.events.sound(SoundCue::CrowdBoo);
            }
        }
        self.push_score();
    }

    pub(crate) fn handle_touchdown(&mut self) {
        self.add_score(self.offense.side, TOUCHDOWN_POINTS);
        self.game_state = GameState::Touchdown;
        log::info!("Touchdown {:?}", self.offense.side);
        self.handle_play_dead();
    }

    /// Two points to the defense; the offense then free kicks
    fn award_safety(&mut self) {
        self.add_score(self.defense.side, SAFETY_POINTS);
        self.game_state = GameState::Safety;
        log::info!("Safety, {:?} scores", self.defense.side);
    }

    pub(crate) fn handle_safety(&mut self) {
        self.award_safety();
        self.handle_play_dead();
    }

    fn handle_field_goal(&mut self) {
        let good = self.difficulty.field_goal_is_good();
        log::info!(
            "Field goal percentage {}%",
            i32::from(good.value()) + self.kick_power
        );
        if good.test_adjusted(&mut self.rng, self.kick_power) {
            log::info!("Field goal is good");
            self.add_score(self.offense.side, FIELD_GOAL_POINTS);
            self.game_state = GameState::FieldGoalMake;
        } else {
            log::info!("Field goal miss");
            self.game_state = GameState::FieldGoalMiss;
        }
        self.handle_play_dead();
    }

    /// Start the play from the pre-snap formation
    pub(crate) fn handle_snap(&mut self) {
        if self.kick_meter.is_enabled() {
            return;
        }

        self.events.push(GameEvent::StopSound(SoundCue::Quarterback));
        self.events.push(GameEvent::ClearInfo);
        self.state = PlayState::PlayLive;
        self.clock.start();

        let qb = self.offense.quarterback().pos;
        let spot = Coordinate::new(
            qb.x + RECEIVER_SNAP_OFFSET * self.offense.orientation.direction(),
            self.rng.random_range(0..FIELD_WIDTH),
        );
        // Too close to the goal line to line up a receiver
        if spot.in_bounds() {
            self.offense.receiver_mut().pos = spot;
        } else {
            self.offense.receiver_mut().clear();
        }

        self.scheduler.schedule_repeating(TimerId::AiUpdate, AI_UPDATE_MS);
    }

    /// Step the ball carrier one tile, tackling into any defender in the way
    pub(crate) fn move_ball_carrier(&mut self, dx: i32, dy: i32) {
        let from = self.offense.quarterback().pos;
        let mut to = Coordinate::new(from.x + dx, from.y + dy);

        if !(0..FIELD_WIDTH).contains(&to.y) {
            return;
        }
        if !(0..FIELD_LENGTH).contains(&to.x) {
            // The field scrolls only in the direction of attack
            if dx != self.offense.orientation.direction() {
                return;
            }
            to.x = to.x.rem_euclid(FIELD_LENGTH);
        }

        if let Some(tackler) = self.defense.find_player(to) {
            self.defense.players[tackler].flashing = true;
            self.offense.quarterback_mut().flashing = true;
            self.handle_play_dead();
            return;
        }

        self.offense.quarterback_mut().pos = to;
        if dx == 0 {
            return;
        }

        self.field_pos += dx;
        if self.ball_across_line_of_scrimmage() {
            self.offense.receiver_mut().clear();
        }
        if self.is_touchdown() {
            self.handle_touchdown();
        } else if self.is_safety() {
            self.handle_safety();
        }
    }

    /// One tick of kick flight
    pub(crate) fn on_handle_kick(&mut self) {
        let direction = self.offense.orientation.direction();
        let new_x = (self.ball_pos.x + direction).rem_euclid(FIELD_LENGTH);
        self.field_pos += direction;

        if self.is_touchdown() {
            if self.game_state == GameState::FieldGoalAttempt {
                self.handle_field_goal();
            } else {
                self.game_state = GameState::Touchback;
                self.handle_play_dead();
            }
            return;
        }

        self.kick_power -= 1;
        if self.kick_power <= 0 {
            if self.game_state == GameState::FieldGoalAttempt {
                self.game_state = GameState::FieldGoalMiss;
                self.handle_play_dead();
            } else {
                self.handle_kick_reception();
            }
            return;
        }

        self.ball_pos.x = new_x;
    }

    /// Receiving team takes over where the ball came down
    fn handle_kick_reception(&mut self) {
        self.events.sound(SoundCue::Catch);
        self.swap_sides();
        self.swap_orientation();
        self.game_state = GameState::KickReturn;
        self.state = PlayState::KickReceived;
        self.line_of_scrimmage = self.field_pos;

        self.offense.clear_all();
        self.defense.clear_all();
        self.offense.quarterback_mut().pos = self.ball_pos;
        log::info!("Kick caught at {}", self.field_pos);
    }

    /// One tick of pass flight
    pub(crate) fn on_handle_pass(&mut self) {
        let qb = self.offense.quarterback().pos;
        let new_x = self.ball_pos.x + self.offense.orientation.direction();

        if !(0..FIELD_LENGTH).contains(&new_x) {
            self.game_state = GameState::Incomplete;
            self.field_pos = self.line_of_scrimmage;
            self.handle_play_dead();
            return;
        }

        let target = Coordinate::new(new_x, qb.y);
        if let Some(defender) = self.defense.find_player(target) {
            // Defenders lined up right on the passer cannot pick it off
            let deep_enough = match self.offense.orientation {
                Orientation::Right => new_x >= MIN_INTERCEPT_COLUMN,
                Orientation::Left => new_x <= FIELD_LENGTH - 1 - MIN_INTERCEPT_COLUMN,
            };
            if deep_enough {
                self.handle_interception(defender);
                return;
            }
        }

        if self.offense.receiver().pos == target {
            self.handle_completion();
            return;
        }

        self.ball_pos.x = new_x;
    }

    fn handle_interception(&mut self, defender: usize) {
        let qb = self.offense.quarterback().pos;
        self.field_pos += self.defense.players[defender].pos.x - qb.x;
        if self.field_pos > 100 {
            self.field_pos = 100 - TOUCHBACK_POS;
        } else if self.field_pos < 0 {
            self.field_pos = TOUCHBACK_POS;
        }

        self.defense.players[defender].flashing = true;
        self.game_state = GameState::Interception;
        log::info!("Interception at {}", self.field_pos);
        self.handle_play_dead();
    }

    fn handle_completion(&mut self) {
        self.events.sound(SoundCue::Catch);
        let qb = self.offense.quarterback().pos;
        let receiver = self.offense.receiver().pos;
        self.field_pos = (self.field_pos + receiver.x - qb.x).clamp(0, 100);
        self.offense.quarterback_mut().pos = receiver;
        self.offense.receiver_mut().clear();
        self.state = PlayState::PlayLive;

        if self.is_touchdown() {
            self.handle_touchdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::game::tests::live_drive;

    fn passing_play(field_pos: i32, qb: (i32, i32)) -> Game {
        let mut game = live_drive(field_pos, qb);
        game.pass();
        assert_eq!(game.state, PlayState::Pass);
        game
    }

    #[test]
    fn test_first_down_marker() {
        let mut game = live_drive(95, (2, 1));
        game.set_first_down_pos();
        assert_eq!(game.first_down_pos, 100);

        game.offense.orientation = Orientation::Left;
        game.field_pos = 4;
        game.set_first_down_pos();
        assert_eq!(game.first_down_pos, 0);
        game.field_pos = 0;
        assert!(game.check_first_down());
    }

    #[test]
    fn test_first_down_resets_series() {
        let mut game = live_drive(20, (2, 1));
        game.series_down = 3;
        game.first_down_pos = 30;
        game.field_pos = 31;
        game.handle_play_dead();
        assert_eq!(game.series_down, 1);
        assert_eq!(game.first_down_pos, 41);
        assert_eq!(game.game_state, GameState::DriveInProgress);
        assert!(game.drain_events().contains(&GameEvent::Info(InfoMessage::FirstDown)));
    }

    #[test]
    fn test_turnover_on_downs() {
        let mut game = live_drive(40, (2, 1));
        game.series_down = DOWNS_PER_SERIES;
        game.field_pos = 45;
        game.handle_play_dead();
        assert_eq!(game.game_state, GameState::TurnoverOnDowns);

        let (offense_side, defense_side) = (game.offense.side, game.defense.side);
        game.huddle();
        assert_eq!(game.state, PlayState::PreSnap);
        assert_eq!(game.series_down, 1);
        assert_eq!(game.offense.side, defense_side);
        assert_eq!(game.defense.side, offense_side);
        assert_eq!(game.offense.orientation, Orientation::Left);
        assert_eq!(game.first_down_pos, 35);
    }

    #[test]
    fn test_safety_on_the_run() {
        let mut game = live_drive(1, (3, 1));
        let defense = game.defense.side;
        game.move_left();
        assert_eq!(game.field_pos, 0);
        assert_eq!(game.game_state, GameState::Safety);
        assert_eq!(game.score(defense), SAFETY_POINTS);

        // The team that gave up the safety kicks from its own 20
        let kicking = game.offense.side;
        game.huddle();
        assert_eq!(game.game_state, GameState::FreeKick);
        assert_eq!(game.state, PlayState::PreKickoff);
        assert_eq!(game.offense.side, kicking);
        assert_eq!(game.field_pos, FREE_KICK_POS);
    }

    #[test]
    fn test_incomplete_pass_out_of_bounds() {
        let mut game = passing_play(40, (8, 1));
        game.offense.receiver_mut().clear();
        game.tick();
        assert_eq!(game.ball_pos, Coordinate::new(9, 1));
        game.tick();
        assert_eq!(game.state, PlayState::PlayDead);
        assert_eq!(game.field_pos, 40);
        assert_eq!(game.series_down, 2);
        assert_eq!(game.game_state, GameState::DriveInProgress);
    }

    #[test]
    fn test_completed_pass() {
        let mut game = passing_play(40, (2, 1));
        game.offense.receiver_mut().set(4, 1);
        game.tick();
        game.tick();
        assert_eq!(game.state, PlayState::PlayLive);
        assert_eq!(game.offense.quarterback().pos, Coordinate::new(4, 1));
        assert!(!game.offense.receiver().is_visible());
        assert_eq!(game.field_pos, 42);
    }

    #[test]
    fn test_interception() {
        let mut game = passing_play(40, (2, 1));
        game.defense.players[1].set(3, 1);
        let (offense, defense) = (game.offense.side, game.defense.side);
        game.tick();
        assert_eq!(game.game_state, GameState::Interception);
        assert_eq!(game.state, PlayState::PlayDead);
        assert_eq!(game.field_pos, 41);
        assert!(game.defense.players[1].flashing);

        game.huddle();
        assert_eq!(game.offense.side, defense);
        assert_eq!(game.defense.side, offense);
        assert_eq!(game.offense.orientation, Orientation::Left);
    }

    #[test]
    fn test_interception_past_goal_is_touchback_spot() {
        let mut game = passing_play(99, (2, 1));
        game.ball_pos = Coordinate::new(3, 1);
        game.defense.players[0].set(4, 1);
        game.tick();
        assert_eq!(game.game_state, GameState::Interception);
        assert_eq!(game.field_pos, 100 - TOUCHBACK_POS);
    }

    #[test]
    fn test_defender_at_the_line_cannot_intercept() {
        let mut game = passing_play(40, (1, 1));
        game.defense.players[0].set(2, 1);
        game.tick();
        assert_eq!(game.state, PlayState::Pass);
        assert_eq!(game.ball_pos, Coordinate::new(2, 1));
    }

    #[test]
    fn test_missed_field_goal_falls_short() {
        let mut game = live_drive(50, (2, 1));
        game.state = PlayState::Kick;
        game.game_state = GameState::FieldGoalAttempt;
        game.ball_pos = Coordinate::new(2, 1);
        game.kick_power = 3;
        game.advance(3 * GAME_REFRESH_MS);
        assert_eq!(game.game_state, GameState::FieldGoalMiss);
        assert_eq!(game.field_pos, 50);

        let kicking = game.offense.side;
        game.huddle();
        assert_ne!(game.offense.side, kicking);
        assert_eq!(game.game_state, GameState::DriveInProgress);
    }

    #[test]
    fn test_field_goal_reaching_goal_is_good_on_full_power() {
        let mut game = live_drive(97, (2, 1));
        game.state = PlayState::Kick;
        game.game_state = GameState::FieldGoalAttempt;
        game.ball_pos = Coordinate::new(2, 1);
        game.kick_power = 40;
        let kicking = game.offense.side;
        game.advance(3 * GAME_REFRESH_MS);
        // 80% base plus power caps the chance at 100
        assert_eq!(game.game_state, GameState::FieldGoalMake);
        assert_eq!(game.score(kicking), FIELD_GOAL_POINTS);

        game.huddle();
        assert_eq!(game.game_state, GameState::Kickoff);
        assert_eq!(game.offense.side, kicking);
    }

    #[test]
    fn test_end_of_quarter_swaps_ends() {
        let mut game = live_drive(30, (2, 1));
        game.clock.start();
        for _ in 0..game.period_length_mins * 600 {
            game.clock.tick(&mut game.events);
        }
        assert_eq!(game.clock.period(), Period::EndOfFirstQuarter);
        game.handle_play_dead();
        assert!(game.drain_events().contains(&GameEvent::Info(InfoMessage::EndOfFirstQuarter)));

        game.huddle();
        assert_eq!(game.clock.period(), Period::SecondQuarter);
        assert!(!game.clock.expired());
        assert_eq!(game.field_pos, 70);
        assert_eq!(game.offense.orientation, Orientation::Left);
        assert_eq!(game.defense.orientation, Orientation::Right);
        assert_eq!(game.first_down_pos, 60);
    }

    #[test]
    fn test_halftime_resets_possession() {
        let mut game = live_drive(30, (2, 1));
        game.offense.side = Side::Home;
        game.defense.side = Side::Visitor;
        game.clock.set_period(&mut game.events);
        game.clock.set_period(&mut game.events);
        game.clock.start();
        for _ in 0..game.period_length_mins * 600 {
            game.clock.tick(&mut game.events);
        }
        assert_eq!(game.clock.period(), Period::Halftime);
        game.handle_play_dead();
        game.huddle();
        assert_eq!(game.clock.period(), Period::ThirdQuarter);
        assert_eq!(game.offense.side, Side::Visitor);
        assert_eq!(game.offense.orientation, Orientation::Left);
        assert_eq!(game.state, PlayState::PreKickoff);
        assert_eq!(game.field_pos, 100 - KICKOFF_POS);
    }

    #[test]
    fn test_kick_return_tackle_is_first_down() {
        let mut game = live_drive(40, (5, 1));
        game.state = PlayState::KickReceived;
        game.game_state = GameState::KickReturn;
        game.series_down = 3;
        game.defense.players[0].set(4, 1);

        game.move_left();
        assert_eq!(game.state, PlayState::PlayDead);
        assert_eq!(game.game_state, GameState::DriveInProgress);
        assert_eq!(game.series_down, 1);
        assert_eq!(game.first_down_pos, 50);
        assert!(game.offense.quarterback().flashing);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Sound {
            cue: SoundCue::Tackle,
            looping: false
        }));
        assert!(events.contains(&GameEvent::Vibrate { millis: VIBRATE_MS }));
        assert!(!events.contains(&GameEvent::Info(InfoMessage::SecondDown)));
    }

    #[test]
    fn test_short_punt_changes_possession_at_landing_spot() {
        let mut game = live_drive(40, (5, 1));
        game.defense.players[2].set(7, 0);
        let (kicking, receiving) = (game.offense.side, game.defense.side);

        game.kick();
        assert_eq!(game.game_state, GameState::Punt);
        game.kick();
        assert_eq!(game.state, PlayState::Kick);
        game.kick_power = 4;
        game.advance(4 * GAME_REFRESH_MS);

        assert_eq!(game.state, PlayState::KickReceived);
        assert_eq!(game.game_state, GameState::KickReturn);
        assert_eq!(game.offense.side, receiving);
        assert_eq!(game.defense.side, kicking);
        assert_eq!(game.offense.orientation, Orientation::Left);
        assert_eq!(game.field_pos, 44);
        assert_eq!(game.line_of_scrimmage, 44);
        assert_eq!(game.offense.quarterback().pos, Coordinate::new(8, 1));
        assert!(game.defense.players.iter().all(|p| !p.is_visible()));
        assert!(game.drain_events().contains(&GameEvent::Sound {
            cue: SoundCue::Catch,
            looping: false
        }));
    }

    #[test]
    fn test_punt_return_after_clock_expires_keeps_period() {
        let mut game = live_drive(40, (5, 1));
        game.clock.start();
        for _ in 0..game.period_length_mins * 600 {
            game.clock.tick(&mut game.events);
        }
        assert_eq!(game.clock.period(), Period::EndOfFirstQuarter);

        // The last play of the quarter is still live: punt it away
        game.kick();
        game.kick();
        game.kick_power = 3;
        game.advance(3 * GAME_REFRESH_MS);
        assert_eq!(game.state, PlayState::KickReceived);
        game.drain_events();

        game.move_up();
        game.tick();
        assert_eq!(game.clock.period(), Period::EndOfFirstQuarter);
        assert!(!game.clock.is_running());
        assert!(!game.drain_events().contains(&GameEvent::ClockExpired));

        let carrier = game.offense.quarterback().pos;
        game.defense.players[0].set(carrier.x - 1, carrier.y);
        game.move_left();
        assert_eq!(game.state, PlayState::PlayDead);
        assert!(game.drain_events().contains(&GameEvent::Info(InfoMessage::EndOfFirstQuarter)));

        // Ends change for the second quarter with a full clock
        game.huddle();
        assert_eq!(game.clock.period(), Period::SecondQuarter);
        assert_eq!(game.clock.time_left_secs(), (game.period_length_mins * 60) as f32);
        assert_eq!(game.field_pos, mirror_field_pos(43));
        assert_eq!(game.offense.orientation, Orientation::Right);
        assert_eq!(game.state, PlayState::PreSnap);
    }
}
