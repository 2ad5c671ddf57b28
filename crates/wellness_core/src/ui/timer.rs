//! Single-handle scheduled task for one widget.
//!
//! A `TimerSlot` never runs threads; the owning widget calls `poll(now)` from
//! its event loop. Starting a timer always cancels whatever the slot was
//! running, so one widget can never have two overlapping timers.

use chrono::{DateTime, Duration, Utc};

/// Identity of one scheduled run. Never reused within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Once,
    Repeating,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    handle: TimerHandle,
    mode: TimerMode,
    period: Duration,
    due_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    active: Option<ActiveTimer>,
    issued: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a new run, cancelling the previous one.
    ///
    /// Non-positive periods are raised to one millisecond.
    pub fn start(&mut self, mode: TimerMode, period: Duration, now: DateTime<Utc>) -> TimerHandle {
        self.issued += 1;
        let handle = TimerHandle(self.issued);
        let period = period.max(Duration::milliseconds(1));
        self.active = Some(ActiveTimer {
            handle,
            mode,
            period,
            due_at: now + period,
        });
        handle
    }

    /// Cancels the running timer, returning its handle if one was active.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.active.take().map(|timer| timer.handle)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.active.map(|timer| timer.handle)
    }

    /// Time left until the next fire, floored at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.active
            .map(|timer| (timer.due_at - now).max(Duration::zero()))
    }

    /// Fires at most once per call.
    ///
    /// Repeating timers that fell behind skip the missed periods instead of
    /// firing once per period.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<TimerHandle> {
        let timer = self.active.as_mut()?;
        if now < timer.due_at {
            return None;
        }

        let handle = timer.handle;
        match timer.mode {
            TimerMode::Once => {
                self.active = None;
            }
            TimerMode::Repeating => {
                while timer.due_at <= now {
                    timer.due_at += timer.period;
                }
            }
        }
        Some(handle)
    }
}
