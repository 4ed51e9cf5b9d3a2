//! Timer scheduler
//!
//! Owns every timer of a session: the countdown, the spawn/movement interval and
//! one-shot delays. The host advances time; due timers pop in chronological order.
//!
//! Invariants:
//! - `reset` drops every timer and bumps the epoch, so ids from an older run can
//!   neither fire nor cancel anything.
//! - While parked nothing fires and `live()` is zero; `unpark` shifts every due
//!   time by the parked duration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// One-second session clock
    Countdown,
    /// Entity spawn / movement interval
    Spawn,
    /// Game-defined one-shot delay
    Delay(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId {
    pub epoch: u32,
    pub slot: u32,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_ms: u64,
    repeat_ms: Option<u32>,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    epoch: u32,
    next_slot: u32,
    timers: Vec<Timer>,
    parked_at: Option<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    fn alloc(&mut self) -> TimerId {
        let id = TimerId {
            epoch: self.epoch,
            slot: self.next_slot,
        };
        self.next_slot += 1;
        id
    }

    /// Repeating timer, first firing one interval from `now_ms`
    pub fn every(&mut self, kind: TimerKind, interval_ms: u32, now_ms: u64) -> TimerId {
        let interval_ms = interval_ms.max(1);
        let id = self.alloc();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + interval_ms as u64,
            repeat_ms: Some(interval_ms),
        });
        id
    }

    /// One-shot timer
    pub fn after(&mut self, kind: TimerKind, delay_ms: u32, now_ms: u64) -> TimerId {
        let id = self.alloc();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: now_ms + delay_ms as u64,
            repeat_ms: None,
        });
        id
    }

    /// Cancel one timer. Unknown or stale ids are ignored.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.kind != kind);
        before - self.timers.len()
    }

    /// Drop every timer and start a new epoch. Returns how many were dropped.
    pub fn reset(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        self.parked_at = None;
        self.epoch = self.epoch.wrapping_add(1);
        self.next_slot = 0;
        dropped
    }

    pub fn park(&mut self, now_ms: u64) {
        if self.parked_at.is_none() {
            self.parked_at = Some(now_ms);
        }
    }

    pub fn unpark(&mut self, now_ms: u64) {
        if let Some(at) = self.parked_at.take() {
            let shift = now_ms.saturating_sub(at);
            for timer in &mut self.timers {
                timer.due_ms += shift;
            }
        }
    }

    pub fn is_parked(&self) -> bool {
        self.parked_at.is_some()
    }

    /// Timers that can still fire
    pub fn live(&self) -> usize {
        if self.is_parked() { 0 } else { self.timers.len() }
    }

    /// Timers held, parked or not
    pub fn held(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Pop the earliest timer due at or before `now_ms`. Repeating timers are
    /// re-armed one interval later; ties go to the timer armed first.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        if self.is_parked() {
            return None;
        }
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id.slot))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        let fired = Fired {
            id: timer.id,
            kind: timer.kind,
            at_ms: timer.due_ms,
        };
        match timer.repeat_ms {
            Some(every) => timer.due_ms += every as u64,
            None => {
                self.timers.remove(idx);
            }
        }
        Some(fired)
    }
}
