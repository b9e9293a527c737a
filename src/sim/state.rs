//! Play-phase and drive state, plus the outbound event queue

use serde::{Deserialize, Serialize};

use super::clock::{ClockHandler, Period};
use crate::audio::SoundCue;

/// Drive-level state: what kind of play is in progress or just ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Kickoff,
    Punt,
    KickReturn,
    DriveInProgress,
    TurnoverOnDowns,
    Incomplete,
    Interception,
    Fumble,
    Touchdown,
    Touchback,
    FieldGoalAttempt,
    FieldGoalMake,
    FieldGoalMiss,
    Safety,
    FreeKick,
}

impl GameState {
    pub fn is_turnover(&self) -> bool {
        matches!(
            self,
            GameState::TurnoverOnDowns | GameState::Interception | GameState::Fumble
        )
    }
}

/// Play phase: which inputs and tick handlers are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    /// Offense lined up, waiting for the snap or a field goal
    PreSnap,
    /// Kicking team lined up, kick meter running
    PreKickoff,
    /// Ball carrier running, AI active
    PlayLive,
    /// Ball in the air toward the receiver
    Pass,
    /// Ball in the air after a kick
    Kick,
    /// Kick caught, waiting for the returner's first move
    KickReceived,
    /// Between plays
    PlayDead,
    /// Final whistle; nothing mutates any more
    GameOver,
}

/// Banner text keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoMessage {
    Kickoff,
    FreeKick,
    Touchback,
    Touchdown,
    Safety,
    FieldGoalMake,
    FieldGoalMiss,
    Interception,
    Incomplete,
    FirstDown,
    SecondDown,
    ThirdDown,
    FourthDown,
    TurnoverOnDowns,
    ChangeSides,
    EndOfFirstQuarter,
    Halftime,
    EndOfThirdQuarter,
    GameOver,
}

impl InfoMessage {
    pub fn text(&self) -> &'static str {
        match self {
            InfoMessage::Kickoff => "Kickoff",
            InfoMessage::FreeKick => "Free Kick",
            InfoMessage::Touchback => "Touchback",
            InfoMessage::Touchdown => "Touchdown!",
            InfoMessage::Safety => "Safety",
            InfoMessage::FieldGoalMake => "Field Goal is Good",
            InfoMessage::FieldGoalMiss => "Field Goal No Good",
            InfoMessage::Interception => "Interception",
            InfoMessage::Incomplete => "Incomplete",
            InfoMessage::FirstDown => "First Down",
            InfoMessage::SecondDown => "2nd Down",
            InfoMessage::ThirdDown => "3rd Down",
            InfoMessage::FourthDown => "4th Down",
            InfoMessage::TurnoverOnDowns => "Turnover on Downs",
            InfoMessage::ChangeSides => "Change Sides",
            InfoMessage::EndOfFirstQuarter => "End of 1st Quarter",
            InfoMessage::Halftime => "Halftime",
            InfoMessage::EndOfThirdQuarter => "End of 3rd Quarter",
            InfoMessage::GameOver => "Game Over",
        }
    }
}

/// Side effects for the host (audio, haptics, scoreboard, banners)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound { cue: SoundCue, looping: bool },
    StopSound(SoundCue),
    Vibrate { millis: u32 },
    Info(InfoMessage),
    ClearInfo,
    ScoreChanged { home: u32, visitor: u32 },
    ClockUpdate { secs: f32, period: Period },
    ClockExpired,
}

/// Events accumulated since the host last drained them
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.push(GameEvent::Sound { cue, looping: false });
    }

    pub fn info(&mut self, message: InfoMessage) {
        self.push(GameEvent::Info(message));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ClockHandler for EventQueue {
    fn update_clock_display(&mut self, secs: f32, period: Period) {
        self.push(GameEvent::ClockUpdate { secs, period });
    }

    fn handle_clock_expired(&mut self) {
        self.push(GameEvent::ClockExpired);
        self.sound(SoundCue::Buzzer);
    }
}
