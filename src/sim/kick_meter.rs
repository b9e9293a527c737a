//! Kick power meter
//!
//! The meter climbs one step at a time and wraps back to zero. Each step is
//! scheduled on the game's own timeline with a delay that shrinks linearly as
//! progress rises, so high power is harder to stop on.

use serde::{Deserialize, Serialize};

use crate::consts::{METER_MAX_DELAY_MS, METER_MIN_DELAY_MS};

/// Persisted meter fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickMeterSnapshot {
    pub min: i32,
    pub max: i32,
    pub min_delay: u64,
    pub max_delay: u64,
    pub enabled: bool,
    pub progress: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickMeter {
    min_power: i32,
    max_power: i32,
    min_delay: u64,
    max_delay: u64,
    enabled: bool,
    progress: i32,
}

impl Default for KickMeter {
    fn default() -> Self {
        Self {
            min_power: 10,
            max_power: 70,
            min_delay: METER_MIN_DELAY_MS,
            max_delay: METER_MAX_DELAY_MS,
            enabled: false,
            progress: 0,
        }
    }
}

impl KickMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(snapshot: &KickMeterSnapshot) -> Self {
        let mut meter = Self::new();
        meter.set_min_max_power(snapshot.min, snapshot.max);
        meter.set_min_max_delay(snapshot.min_delay, snapshot.max_delay);
        if snapshot.enabled {
            meter.enable_at(snapshot.progress);
        } else {
            meter.progress = snapshot.progress.clamp(0, meter.range());
        }
        meter
    }

    pub fn snapshot(&self) -> KickMeterSnapshot {
        KickMeterSnapshot {
            min: self.min_power,
            max: self.max_power,
            min_delay: self.min_delay,
            max_delay: self.max_delay,
            enabled: self.enabled,
            progress: self.progress,
        }
    }

    /// Panics unless `min < max`.
    pub fn set_min_max_power(&mut self, min: i32, max: i32) {
        assert!(min < max, "kick meter power range must satisfy min < max ({min} >= {max})");
        self.min_power = min;
        self.max_power = max;
        self.progress = self.progress.clamp(0, self.range());
    }

    /// Panics unless `min < max`.
    pub fn set_min_max_delay(&mut self, min: u64, max: u64) {
        assert!(min < max, "kick meter delay range must satisfy min < max ({min} >= {max})");
        self.min_delay = min;
        self.max_delay = max;
    }

    pub fn min_power(&self) -> i32 {
        self.min_power
    }

    pub fn max_power(&self) -> i32 {
        self.max_power
    }

    /// Highest progress value
    pub fn range(&self) -> i32 {
        self.max_power - self.min_power
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enable_at(0);
    }

    /// Start oscillating from `progress` (out-of-range values start at 0).
    /// Does nothing if already enabled.
    pub fn enable_at(&mut self, progress: i32) {
        if self.enabled {
            return;
        }
        self.progress = if (0..=self.range()).contains(&progress) {
            progress
        } else {
            0
        };
        self.enabled = true;
    }

    /// Stop the meter. Returns true only on the enabled → disabled transition.
    pub fn disable(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        true
    }

    pub fn power_value(&self) -> i32 {
        self.progress + self.min_power
    }

    /// Delay before the next step from the current progress
    pub fn current_delay(&self) -> u64 {
        let factor = (self.max_delay - self.min_delay) as f32 / self.range() as f32;
        let delay = self.max_delay as f32 - self.progress as f32 * factor;
        (delay.round() as u64).clamp(self.min_delay, self.max_delay)
    }

    /// One oscillation step. Returns the delay until the next step, or `None`
    /// when the meter is disabled and should not be rescheduled.
    pub fn advance(&mut self) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        self.progress += 1;
        if self.progress > self.range() {
            self.progress = 0;
        }
        Some(self.current_delay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disable_is_idempotent() {
        let mut meter = KickMeter::new();
        assert!(!meter.disable());
        meter.enable();
        assert!(meter.is_enabled());
        assert!(meter.disable());
        assert!(!meter.disable());
    }

    #[test]
    fn test_wraps_past_max() {
        let mut meter = KickMeter::new();
        meter.set_min_max_power(20, 25);
        meter.enable();
        for _ in 0..5 {
            meter.advance();
        }
        assert_eq!(meter.progress(), 5);
        assert_eq!(meter.power_value(), 25);
        meter.advance();
        assert_eq!(meter.progress(), 0);
        assert_eq!(meter.power_value(), 20);
    }

    #[test]
    fn test_delay_shrinks_with_progress() {
        let mut meter = KickMeter::new();
        meter.set_min_max_power(0, 90);
        meter.enable();
        assert_eq!(meter.current_delay(), METER_MAX_DELAY_MS);
        let mut last = meter.current_delay();
        for _ in 0..90 {
            let delay = meter.advance().unwrap();
            assert!(delay <= last);
            last = delay;
        }
        assert_eq!(last, METER_MIN_DELAY_MS);
    }

    #[test]
    fn test_disabled_meter_does_not_advance() {
        let mut meter = KickMeter::new();
        assert_eq!(meter.advance(), None);
        assert_eq!(meter.progress(), 0);
    }

    #[test]
    fn test_enable_out_of_range_starts_at_zero() {
        let mut meter = KickMeter::new();
        meter.set_min_max_power(5, 50);
        meter.enable_at(99);
        assert_eq!(meter.progress(), 0);
    }

    #[test]
    #[should_panic]
    fn test_inverted_power_range_panics() {
        let mut meter = KickMeter::new();
        meter.set_min_max_power(75, 20);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut meter = KickMeter::new();
        meter.set_min_max_power(10, 60);
        meter.enable();
        for _ in 0..17 {
            meter.advance();
        }
        let restored = KickMeter::restore(&meter.snapshot());
        assert_eq!(restored, meter);
    }

    proptest! {
        #[test]
        fn power_stays_in_range(steps in 0usize..500) {
            let mut meter = KickMeter::new();
            meter.set_min_max_power(20, 75);
            meter.enable();
            for _ in 0..steps {
                meter.advance();
            }
            prop_assert!(meter.disable());
            let power = meter.power_value();
            prop_assert!((20..=75).contains(&power));
        }
    }
}
