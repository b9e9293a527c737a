//! The game controller
//!
//! `Game` owns every piece of play state plus the scheduler that drives it.
//! Hosts feed it commands and elapsed time, then drain the resulting events
//! and read a render frame. The rules live in `rules.rs` and the AI in
//! `ai.rs`; both are further `impl Game` blocks over the same fields.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::{ClockSnapshot, GameClock, Period};
use super::coordinate::Coordinate;
use super::kick_meter::{KickMeter, KickMeterSnapshot};
use super::scheduler::{Scheduler, TimerId};
use super::state::{EventQueue, GameEvent, GameState, PlayState};
use super::team::{Orientation, Side, Team};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::{Difficulty, Settings};

/// Player commands. Anything arriving in a phase that does not accept it is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Pass,
    Kick,
    Huddle,
}

/// Everything needed to resume a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub state: PlayState,
    pub game_state: GameState,
    pub home_score: u32,
    pub visitor_score: u32,
    pub game_clock: ClockSnapshot,
    pub kick_meter: KickMeterSnapshot,
    pub period_length_mins: u32,
    pub period: Period,
    pub line_of_scrimmage: i32,
    pub field_pos: i32,
    pub series_down: u32,
    pub first_down_pos: i32,
    pub kick_power: i32,
    pub ball_pos: Coordinate,
    pub offense: Team,
    pub defense: Team,
}

#[derive(Debug)]
pub struct Game {
    pub(crate) difficulty: Difficulty,
    pub(crate) vibrate: bool,
    pub(crate) period_length_mins: u32,

    pub(crate) state: PlayState,
    pub(crate) game_state: GameState,
    pub(crate) home_score: u32,
    pub(crate) visitor_score: u32,
    pub(crate) clock: GameClock,
    pub(crate) kick_meter: KickMeter,

    /// Yard line at the start of the current down
    pub(crate) line_of_scrimmage: i32,
    /// 0 and 100 are the end zones
    pub(crate) field_pos: i32,
    pub(crate) series_down: u32,
    pub(crate) first_down_pos: i32,
    /// Ticks of flight left on the current kick
    pub(crate) kick_power: i32,
    pub(crate) ball_pos: Coordinate,

    pub(crate) offense: Team,
    pub(crate) defense: Team,

    pub(crate) scheduler: Scheduler,
    pub(crate) rng: Pcg32,
    /// Flash parity, toggled every master tick
    pub(crate) flash: bool,
    pub(crate) events: EventQueue,
}

impl Game {
    /// Create a game and kick off immediately
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let mut events = EventQueue::default();
        let clock = GameClock::new(settings.period_length_secs(), &mut events);
        let mut game = Self {
            difficulty: settings.difficulty,
            vibrate: settings.vibrate,
            period_length_mins: settings.effective_period_length_mins(),
            state: PlayState::PreKickoff,
            game_state: GameState::Kickoff,
            home_score: 0,
            visitor_score: 0,
            clock,
            kick_meter: KickMeter::new(),
            line_of_scrimmage: 0,
            field_pos: 0,
            series_down: 1,
            first_down_pos: 0,
            kick_power: 0,
            ball_pos: Coordinate::OFF_FIELD,
            offense: Team::offense(Side::Home, Orientation::Left),
            defense: Team::defense(Side::Visitor, Orientation::Right),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            flash: false,
            events,
        };
        game.start_new_game();
        game
    }

    /// Throw away the current game and start over with the home team kicking
    pub fn start_new_game(&mut self) {
        for id in TimerId::ALL {
            self.scheduler.cancel(id);
        }
        self.kick_meter.disable();

        self.offense = Team::offense(Side::Home, Orientation::Left);
        self.defense = Team::defense(Side::Visitor, Orientation::Right);
        self.ball_pos = self.offense.quarterback().pos;
        self.clock = GameClock::new(self.period_length_mins * 60, &mut self.events);
        self.home_score = 0;
        self.visitor_score = 0;
        self.series_down = 1;
        self.events.push(GameEvent::ClearInfo);
        self.game_state = GameState::Kickoff;
        // Leave the dead-ball state so the pre-snap setup below runs
        self.state = PlayState::PlayDead;
        self.push_score();

        log::info!(
            "New game: {} difficulty, {} minute quarters",
            self.difficulty.as_str(),
            self.period_length_mins
        );
        self.events.push(GameEvent::Sound {
            cue: SoundCue::Crowd,
            looping: true,
        });
        self.scheduler
            .schedule_repeating(TimerId::GameUpdate, GAME_REFRESH_MS);
        self.init_pre_snap();
    }

    /// Rebuild a saved game. Persisted fields are taken as-is; only the
    /// timers implied by the saved phase are re-armed. Random draws after
    /// the restore come from `seed`, not from the saved game.
    pub fn restore(saved: &SavedGame, settings: &Settings, seed: u64) -> Self {
        let mut events = EventQueue::default();
        let clock = GameClock::restore(&saved.game_clock, &mut events);
        let mut game = Self {
            difficulty: settings.difficulty,
            vibrate: settings.vibrate,
            period_length_mins: saved
                .period_length_mins
                .clamp(1, Settings::MAX_PERIOD_LENGTH_MINS),
            state: saved.state,
            game_state: saved.game_state,
            home_score: saved.home_score,
            visitor_score: saved.visitor_score,
            clock,
            kick_meter: KickMeter::restore(&saved.kick_meter),
            line_of_scrimmage: saved.line_of_scrimmage,
            field_pos: saved.field_pos,
            series_down: saved.series_down,
            first_down_pos: saved.first_down_pos,
            kick_power: saved.kick_power,
            ball_pos: saved.ball_pos,
            offense: saved.offense.clone(),
            defense: saved.defense.clone(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            flash: false,
            events,
        };
        game.rearm_timers();
        game.push_score();
        log::info!("Restored game in {:?} / {:?}", game.state, game.game_state);
        game
    }

    fn rearm_timers(&mut self) {
        if self.state == PlayState::GameOver {
            return;
        }

        self.events.push(GameEvent::Sound {
            cue: SoundCue::Crowd,
            looping: true,
        });
        self.scheduler
            .schedule_repeating(TimerId::GameUpdate, GAME_REFRESH_MS);

        match self.state {
            PlayState::PlayLive | PlayState::Pass if !self.kick_meter.is_enabled() => {
                self.scheduler.schedule_repeating(TimerId::AiUpdate, AI_UPDATE_MS);
            }
            PlayState::PlayDead => {
                self.scheduler.schedule_once(TimerId::Huddle, HUDDLE_DELAY_MS);
            }
            PlayState::PreSnap if !self.kick_meter.is_enabled() => {
                self.events.push(GameEvent::Sound {
                    cue: SoundCue::Quarterback,
                    looping: true,
                });
            }
            _ => {}
        }

        if self.kick_meter.is_enabled() {
            self.scheduler
                .schedule_once(TimerId::KickMeter, self.kick_meter.current_delay());
        }
    }

    /// Capture every persisted field
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            state: self.state,
            game_state: self.game_state,
            home_score: self.home_score,
            visitor_score: self.visitor_score,
            game_clock: self.clock.snapshot(),
            kick_meter: self.kick_meter.snapshot(),
            period_length_mins: self.period_length_mins,
            period: self.clock.period(),
            line_of_scrimmage: self.line_of_scrimmage,
            field_pos: self.field_pos,
            series_down: self.series_down,
            first_down_pos: self.first_down_pos,
            kick_power: self.kick_power,
            ball_pos: self.ball_pos,
            offense: self.offense.clone(),
            defense: self.defense.clone(),
        }
    }

    // === Inputs ===

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Pass => self.pass(),
            Command::Kick => self.kick(),
            Command::Huddle => self.huddle(),
        }
    }

    pub fn move_left(&mut self) {
        self.on_horizontal(-1);
    }

    pub fn move_right(&mut self) {
        self.on_horizontal(1);
    }

    pub fn move_up(&mut self) {
        self.on_vertical(-1);
    }

    pub fn move_down(&mut self) {
        self.on_vertical(1);
    }

    fn on_horizontal(&mut self, dx: i32) {
        if self.kick_meter.is_enabled() {
            return;
        }

        match self.state {
            // Only a drop back away from the goal snaps the ball
            PlayState::PreSnap => {
                if dx == self.offense.orientation.direction() {
                    return;
                }
                self.handle_snap();
                self.move_ball_carrier(dx, 0);
            }
            PlayState::KickReceived => {
                self.start_kick_return();
                self.move_ball_carrier(dx, 0);
            }
            PlayState::PlayLive => self.move_ball_carrier(dx, 0),
            _ => {}
        }
    }

    fn on_vertical(&mut self, dy: i32) {
        if self.kick_meter.is_enabled() {
            return;
        }

        match self.state {
            PlayState::KickReceived => {
                self.start_kick_return();
                self.move_ball_carrier(0, dy);
            }
            PlayState::PlayLive => self.move_ball_carrier(0, dy),
            _ => {}
        }
    }

    /// Throw to the receiver. Only before the runner crosses the line.
    pub fn pass(&mut self) {
        if self.kick_meter.is_enabled() {
            return;
        }

        if self.state == PlayState::PlayLive
            && self.game_state == GameState::DriveInProgress
            && !self.ball_across_line_of_scrimmage()
        {
            self.state = PlayState::Pass;
            self.ball_pos = self.offense.quarterback().pos;
        }
    }

    /// Stop a running kick meter, or set up a field goal (before the snap)
    /// or a punt (behind the line)
    pub fn kick(&mut self) {
        if self.state == PlayState::GameOver {
            return;
        }

        if self.kick_meter.disable() {
            self.scheduler.cancel(TimerId::KickMeter);
            self.kick_power = self.kick_meter.power_value();
            log::info!("Kick meter power = {}", self.kick_power);
            self.ball_pos = self.offense.quarterback().pos;
            self.events.sound(SoundCue::Kick);
            self.events.push(GameEvent::ClearInfo);
            self.state = PlayState::Kick;
            return;
        }

        match self.state {
            PlayState::PreSnap => {
                self.events.push(GameEvent::StopSound(SoundCue::Quarterback));
                self.events.push(GameEvent::ClearInfo);
                self.game_state = GameState::FieldGoalAttempt;
                self.enable_kick_meter(FIELD_GOAL_POWER);
                self.scheduler.cancel(TimerId::AiUpdate);
                self.clock.stop();
            }
            PlayState::PlayLive
                if self.game_state == GameState::DriveInProgress
                    && !self.ball_across_line_of_scrimmage() =>
            {
                self.events.push(GameEvent::ClearInfo);
                self.game_state = GameState::Punt;
                self.enable_kick_meter(PUNT_POWER);
                self.scheduler.cancel(TimerId::AiUpdate);
                self.clock.stop();
            }
            _ => {}
        }
    }

    /// Skip the rest of the huddle pause
    pub fn huddle(&mut self) {
        if self.state == PlayState::PlayDead {
            self.scheduler.cancel(TimerId::Huddle);
            self.init_pre_snap();
        }
    }

    // === Time ===

    /// Run every timer due in the next `ms` of virtual time
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.dispatch(id);
        }
        self.scheduler.settle(until);
    }

    /// One master tick
    pub fn tick(&mut self) {
        self.advance(GAME_REFRESH_MS);
    }

    fn dispatch(&mut self, id: TimerId) {
        match id {
            TimerId::GameUpdate => self.update_game(),
            TimerId::AiUpdate => {
                if !self.on_update_game_ai() {
                    self.scheduler.cancel(TimerId::AiUpdate);
                }
            }
            TimerId::Huddle => self.init_pre_snap(),
            TimerId::KickMeter => {
                if let Some(delay) = self.kick_meter.advance() {
                    self.scheduler.schedule_once(TimerId::KickMeter, delay);
                }
            }
        }
    }

    fn update_game(&mut self) {
        self.flash = !self.flash;
        self.clock.tick(&mut self.events);
        match self.state {
            PlayState::Kick => self.on_handle_kick(),
            PlayState::Pass => self.on_handle_pass(),
            _ => {}
        }
    }

    pub(crate) fn enable_kick_meter(&mut self, (min, max): (i32, i32)) {
        self.kick_meter.set_min_max_power(min, max);
        self.kick_meter.enable();
        self.scheduler
            .schedule_once(TimerId::KickMeter, self.kick_meter.current_delay());
    }

    fn start_kick_return(&mut self) {
        self.state = PlayState::PlayLive;
        self.clock.start();
        self.scheduler.schedule_repeating(TimerId::AiUpdate, AI_UPDATE_MS);
    }

    pub(crate) fn push_score(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            home: self.home_score,
            visitor: self.visitor_score,
        });
    }

    pub(crate) fn tackle_feedback(&mut self) {
        self.events.sound(SoundCue::Tackle);
        if self.vibrate {
            self.events.push(GameEvent::Vibrate { millis: VIBRATE_MS });
        }
    }

    // === Queries ===

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == PlayState::GameOver
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    pub fn visitor_score(&self) -> u32 {
        self.visitor_score
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Visitor => self.visitor_score,
        }
    }

    pub fn field_pos(&self) -> i32 {
        self.field_pos
    }

    pub fn line_of_scrimmage(&self) -> i32 {
        self.line_of_scrimmage
    }

    pub fn first_down_pos(&self) -> i32 {
        self.first_down_pos
    }

    pub fn series_down(&self) -> u32 {
        self.series_down
    }

    pub fn kick_power(&self) -> i32 {
        self.kick_power
    }

    pub fn ball_pos(&self) -> Coordinate {
        self.ball_pos
    }

    pub fn offense(&self) -> &Team {
        &self.offense
    }

    pub fn defense(&self) -> &Team {
        &self.defense
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn kick_meter(&self) -> &KickMeter {
        &self.kick_meter
    }

    pub fn flash(&self) -> bool {
        self.flash
    }

    /// Virtual milliseconds since the game was created
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_timer_armed(&self, id: TimerId) -> bool {
        self.scheduler.is_scheduled(id)
    }
}
