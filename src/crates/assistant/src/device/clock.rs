//! Time source for default note names

use chrono::{Local, NaiveDateTime};

/// Format of a note name derived from the current time
pub const NOTE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Provides the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// Current time rendered as a note name, e.g. `20240301_142530`
    fn note_stamp(&self) -> String {
        self.now().format(NOTE_STAMP_FORMAT).to_string()
    }
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
