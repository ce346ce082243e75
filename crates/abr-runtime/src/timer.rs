#![forbid(unsafe_code)]

//! Deterministic cooperative timer queue.
//!
//! Replaces `setTimeout` / `setInterval` with an explicit queue driven by
//! the host clock. Nothing fires on its own: the owner calls
//! [`TimerQueue::pop_due`] repeatedly with the instant it has advanced to,
//! handling one firing at a time so each handler can cancel or schedule
//! timers before the next one is considered.
//!
//! # Invariants
//!
//! - Timers fire in `(deadline, scheduling order)` order.
//! - A cancelled timer never fires.
//! - A recurring timer is re-armed from its own deadline, not from the
//!   instant it was popped, so long host steps do not drift the period.
//! - `now()` never moves backwards.
//!
//! # Failure Modes
//!
//! - A zero period would re-arm at the same instant forever; periods are
//!   clamped to one millisecond.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id, for logging.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<M> {
    pub id: TimerId,
    /// Deadline the timer was scheduled for.
    pub at: Duration,
    pub msg: M,
}

#[derive(Debug, Clone)]
struct Timer<M> {
    key: (Duration, u64),
    period: Option<Duration>,
    msg: M,
}

/// Ordered set of one-shot and recurring timers.
#[derive(Debug, Clone)]
pub struct TimerQueue<M> {
    now: Duration,
    next_seq: u64,
    next_id: u64,
    order: BTreeMap<(Duration, u64), TimerId>,
    timers: HashMap<TimerId, Timer<M>>,
}

impl<M> Default for TimerQueue<M> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            next_id: 0,
            order: BTreeMap::new(),
            timers: HashMap::new(),
        }
    }
}

impl<M: Clone> TimerQueue<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time (the latest instant the owner advanced to).
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Fire `msg` once, `delay` after now.
    pub fn schedule_once(&mut self, delay: Duration, msg: M) -> TimerId {
        self.insert(self.now.saturating_add(delay), None, msg)
    }

    /// Fire `msg` every `period`, first after one period.
    pub fn schedule_every(&mut self, period: Duration, msg: M) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(self.now.saturating_add(period), Some(period), msg)
    }

    /// Cancel a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                self.order.remove(&timer.key);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.order.keys().next().map(|(due, _)| *due)
    }

    /// Deadline of a specific timer.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.timers.get(&id).map(|timer| timer.key.0)
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// Advances `now()` to the fired deadline. Returns `None` once nothing
    /// is due; call [`advance_to`](Self::advance_to) afterwards to settle
    /// the clock at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<M>> {
        let (&key, &id) = self.order.iter().next()?;
        if key.0 > until {
            return None;
        }
        self.order.remove(&key);
        self.now = self.now.max(key.0);

        let rearm = self
            .timers
            .get(&id)
            .and_then(|timer| timer.period.map(|period| (period, timer.msg.clone())));
        let msg = match rearm {
            Some((period, msg)) => {
                let next_key = (key.0.saturating_add(period), self.bump_seq());
                self.order.insert(next_key, id);
                if let Some(timer) = self.timers.get_mut(&id) {
                    timer.key = next_key;
                }
                msg
            }
            None => self.timers.remove(&id)?.msg,
        };
        Some(Fired { id, at: key.0, msg })
    }

    /// Move `now()` forward to `until` (never backwards).
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn insert(&mut self, due: Duration, period: Option<Duration>, msg: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let key = (due, self.bump_seq());
        self.order.insert(key, id);
        self.timers.insert(id, Timer { key, period, msg });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
