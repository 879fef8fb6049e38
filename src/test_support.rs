//! Deterministic clock for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that returns `now` and then advances it by a fixed step.
#[derive(Debug)]
pub struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    /// Starts at 2026-01-01T00:00:00Z, advancing one second per reading.
    pub fn new() -> Self {
        Self::starting_at(epoch(), TimeDelta::seconds(1))
    }

    /// Starts at `start`, advancing by `step` per reading.
    pub const fn starting_at(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            now: Mutex::new(start),
            step,
        }
    }

    /// Moves the clock forward by `delta` without reading it.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

/// Fixed reference instant used by tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid reference instant")
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut now = self.now.lock().expect("clock lock");
        let reading = *now;
        *now += self.step;
        reading
    }
}
