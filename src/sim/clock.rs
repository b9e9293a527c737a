//! Game clock driven by the master tick

use serde::{Deserialize, Serialize};

use crate::consts::CLOCK_TENTHS_PER_TICK;

/// Game period. The `End*`/`Halftime` values mark a period that has expired
/// while its last play may still be live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    FirstQuarter,
    EndOfFirstQuarter,
    SecondQuarter,
    Halftime,
    ThirdQuarter,
    EndOfThirdQuarter,
    FourthQuarter,
    GameOver,
}

impl Period {
    /// Next period, saturating at `GameOver`
    pub fn next(self) -> Self {
        match self {
            Period::FirstQuarter => Period::EndOfFirstQuarter,
            Period::EndOfFirstQuarter => Period::SecondQuarter,
            Period::SecondQuarter => Period::Halftime,
            Period::Halftime => Period::ThirdQuarter,
            Period::ThirdQuarter => Period::EndOfThirdQuarter,
            Period::EndOfThirdQuarter => Period::FourthQuarter,
            Period::FourthQuarter | Period::GameOver => Period::GameOver,
        }
    }

    /// Quarter number for the scoreboard
    pub fn quarter(self) -> u8 {
        match self {
            Period::FirstQuarter | Period::EndOfFirstQuarter => 1,
            Period::SecondQuarter | Period::Halftime => 2,
            Period::ThirdQuarter | Period::EndOfThirdQuarter => 3,
            Period::FourthQuarter | Period::GameOver => 4,
        }
    }
}

/// Receives clock notifications
pub trait ClockHandler {
    /// Called after every tick and whenever the clock is reset
    fn update_clock_display(&mut self, secs: f32, period: Period);
    /// Called once when the running clock reaches zero
    fn handle_clock_expired(&mut self);
}

/// Persisted clock fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub clock_secs: f32,
    pub running: bool,
    pub period: Period,
    pub period_length: u32,
}

/// Counts down the current period in tenths of a second.
///
/// Tenths are kept as an integer so that a period always expires on exactly
/// the expected tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    tenths: u32,
    period: Period,
    /// Period length in seconds
    period_length: u32,
    running: bool,
}

impl GameClock {
    pub fn new(period_length: u32, handler: &mut impl ClockHandler) -> Self {
        let clock = Self {
            tenths: period_length * 10,
            period: Period::FirstQuarter,
            period_length,
            running: false,
        };
        handler.update_clock_display(clock.time_left_secs(), clock.period);
        clock
    }

    pub fn restore(snapshot: &ClockSnapshot, handler: &mut impl ClockHandler) -> Self {
        let clock = Self {
            tenths: (snapshot.clock_secs.max(0.0) * 10.0).round() as u32,
            period: snapshot.period,
            period_length: snapshot.period_length,
            running: snapshot.running,
        };
        handler.update_clock_display(clock.time_left_secs(), clock.period);
        clock
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            clock_secs: self.time_left_secs(),
            running: self.running,
            period: self.period,
            period_length: self.period_length,
        }
    }

    /// Advance one master tick. Should be called whether or not the clock runs.
    pub fn tick(&mut self, handler: &mut impl ClockHandler) {
        if self.running && self.tenths > 0 {
            self.tenths = self.tenths.saturating_sub(CLOCK_TENTHS_PER_TICK);
            if self.tenths == 0 {
                self.stop();
                handler.handle_clock_expired();
                self.period = self.period.next();
            }
        }
        handler.update_clock_display(self.time_left_secs(), self.period);
    }

    /// Move on to the next period with a full clock. No-op once the game is over.
    pub fn set_period(&mut self, handler: &mut impl ClockHandler) {
        if self.period != Period::GameOver {
            self.running = false;
            self.tenths = self.period_length * 10;
            self.period = self.period.next();
        }
        handler.update_clock_display(self.time_left_secs(), self.period);
    }

    /// Does nothing once the period has run out; only `set_period` refills it
    pub fn start(&mut self) {
        if self.tenths > 0 {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn expired(&self) -> bool {
        self.tenths == 0
    }

    pub fn time_left_secs(&self) -> f32 {
        self.tenths as f32 / 10.0
    }
}
