//! Virtual-time timer queue.
//!
//! Timers fire in deadline order; ties fire in scheduling order. There is
//! no cancellation, matching `setTimeout` without `clearTimeout`.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Keyed by (deadline, sequence)
    pending: BTreeMap<(u64, u64), T>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Run `task` at `now + delay_ms`
    pub fn schedule(&mut self, now: u64, delay_ms: u64, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((now.saturating_add(delay_ms), seq), task);
        TimerId(seq)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, T)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.pending.pop_first().map(|((due, _), task)| (due, task))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_then_insertion_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(0, 100, "late");
        queue.schedule(0, 50, "first");
        queue.schedule(50, 0, "second");

        assert_eq!(queue.next_deadline(), Some(50));
        assert_eq!(queue.pop_due(49), None);
        assert_eq!(queue.pop_due(200), Some((50, "first")));
        assert_eq!(queue.pop_due(200), Some((50, "second")));
        assert_eq!(queue.pop_due(200), Some((100, "late")));
        assert!(queue.is_empty());
    }
}
