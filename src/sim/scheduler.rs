//! Single-threaded virtual-time scheduler
//!
//! Every periodic cadence in the game (master tick, AI, huddle delay, kick
//! meter) is a slot here. Time only moves when the owner asks for due timers,
//! so tests can step the whole game deterministically.

/// Timer slots, in dispatch priority order for equal deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerId {
    GameUpdate,
    AiUpdate,
    Huddle,
    KickMeter,
}

impl TimerId {
    pub const ALL: [TimerId; 4] = [
        TimerId::GameUpdate,
        TimerId::AiUpdate,
        TimerId::Huddle,
        TimerId::KickMeter,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    deadline: u64,
    /// Re-arm interval for repeating timers
    repeat: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    now_ms: u64,
    slots: [Option<Armed>; 4],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire every `interval_ms` starting one interval from now.
    /// Re-scheduling an armed timer restarts it.
    pub fn schedule_repeating(&mut self, id: TimerId, interval_ms: u64) {
        assert!(interval_ms > 0, "timer interval must be non-zero");
        self.slots[id.index()] = Some(Armed {
            deadline: self.now_ms + interval_ms,
            repeat: Some(interval_ms),
        });
    }

    /// Fire once after `delay_ms`
    pub fn schedule_once(&mut self, id: TimerId, delay_ms: u64) {
        assert!(delay_ms > 0, "timer delay must be non-zero");
        self.slots[id.index()] = Some(Armed {
            deadline: self.now_ms + delay_ms,
            repeat: None,
        });
    }

    /// Disarm a timer. Returns whether it was armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.slots[id.index()].take().is_some()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.slots[id.index()].is_some()
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the virtual
    /// clock to its deadline. Repeating timers are re-armed before returning.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerId> {
        let id = TimerId::ALL
            .into_iter()
            .filter_map(|id| self.slots[id.index()].map(|a| (a.deadline, id)))
            .filter(|(deadline, _)| *deadline <= until_ms)
            .min()
            .map(|(_, id)| id)?;

        let slot = &mut self.slots[id.index()];
        let armed = slot.take()?;
        self.now_ms = self.now_ms.max(armed.deadline);
        if let Some(interval) = armed.repeat {
            *slot = Some(Armed {
                deadline: armed.deadline + interval,
                repeat: Some(interval),
            });
        }
        Some(id)
    }

    /// Move the virtual clock forward once nothing else is due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: u64) -> Vec<(u64, TimerId)> {
        let mut fired = Vec::new();
        while let Some(id) = s.pop_due(until) {
            fired.push((s.now_ms(), id));
        }
        s.settle(until);
        fired
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut s = Scheduler::new();
        s.schedule_repeating(TimerId::GameUpdate, 100);
        let fired = drain(&mut s, 1000);
        assert_eq!(fired.len(), 10);
        assert_eq!(fired[0], (100, TimerId::GameUpdate));
        assert_eq!(fired[9], (1000, TimerId::GameUpdate));
        assert_eq!(s.now_ms(), 1000);
    }

    #[test]
    fn test_once_fires_once() {
        let mut s = Scheduler::new();
        s.schedule_once(TimerId::Huddle, 2000);
        assert!(drain(&mut s, 1999).is_empty());
        assert_eq!(drain(&mut s, 2000), vec![(2000, TimerId::Huddle)]);
        assert!(!s.is_scheduled(TimerId::Huddle));
        assert!(drain(&mut s, 5000).is_empty());
    }

    #[test]
    fn test_interleaves_by_deadline_then_priority() {
        let mut s = Scheduler::new();
        s.schedule_repeating(TimerId::GameUpdate, 100);
        s.schedule_repeating(TimerId::AiUpdate, 250);
        let fired: Vec<TimerId> = drain(&mut s, 500).into_iter().map(|(_, id)| id).collect();
        assert_eq!(
            fired,
            vec![
                TimerId::GameUpdate,
                TimerId::GameUpdate,
                TimerId::AiUpdate,
                TimerId::GameUpdate,
                TimerId::GameUpdate,
                TimerId::GameUpdate,
                TimerId::AiUpdate,
            ]
        );
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut s = Scheduler::new();
        s.schedule_repeating(TimerId::AiUpdate, 250);
        assert!(s.cancel(TimerId::AiUpdate));
        assert!(!s.cancel(TimerId::AiUpdate));
        assert!(drain(&mut s, 10_000).is_empty());
    }

    #[test]
    fn test_reschedule_restarts_from_now() {
        let mut s = Scheduler::new();
        s.schedule_once(TimerId::KickMeter, 100);
        s.settle(60);
        s.schedule_once(TimerId::KickMeter, 100);
        assert!(drain(&mut s, 150).is_empty());
        assert_eq!(drain(&mut s, 160), vec![(160, TimerId::KickMeter)]);
    }
}
