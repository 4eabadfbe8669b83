use std::collections::BTreeMap;

use crate::core::time::Millis;
use super::particle::{BurstId, ParticleId};

/// Work the scheduler has promised to do at a future instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Emit the `index`-th confetti particle of a burst.
    EmitConfetti { burst: BurstId, index: u32 },
    /// Remove one particle.
    Expire { particle: ParticleId },
    /// Remove a burst container and everything still in it.
    TeardownBurst { burst: BurstId },
    /// Spawn the next ambient sparkle.
    SparkleTick,
}

/// Pending timers sorted by due time. Ties fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: BTreeMap<(Millis, u64), Timer>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Millis, timer: Timer) {
        self.pending.insert((at, self.seq), timer);
        self.seq += 1;
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, Timer)> {
        let (&(at, seq), _) = self.pending.iter().next()?;
        if at > now {
            return None;
        }
        self.pending.remove(&(at, seq)).map(|t| (at, t))
    }

    /// Drop every pending timer matching the predicate.
    pub fn cancel(&mut self, mut pred: impl FnMut(&Timer) -> bool) {
        self.pending.retain(|_, t| !pred(t));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = TimerQueue::new();
        q.schedule(50, Timer::SparkleTick);
        q.schedule(10, Timer::Expire { particle: ParticleId(1) });
        q.schedule(30, Timer::TeardownBurst { burst: BurstId(0) });

        assert_eq!(q.pop_due(9), None);
        assert_eq!(q.pop_due(40).map(|(at, _)| at), Some(10));
        assert_eq!(q.pop_due(40).map(|(at, _)| at), Some(30));
        assert_eq!(q.pop_due(40), None);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(5, Timer::EmitConfetti { burst: BurstId(0), index: 0 });
        q.schedule(5, Timer::EmitConfetti { burst: BurstId(0), index: 1 });
        assert_eq!(
            q.pop_due(5).map(|(_, t)| t),
            Some(Timer::EmitConfetti { burst: BurstId(0), index: 0 })
        );
    }

    #[test]
    fn cancel_by_predicate() {
        let mut q = TimerQueue::new();
        q.schedule(1, Timer::SparkleTick);
        q.schedule(2, Timer::Expire { particle: ParticleId(9) });
        q.cancel(|t| matches!(t, Timer::SparkleTick));
        assert_eq!(q.len(), 1);
        assert!(!q.is_empty());
    }
}
