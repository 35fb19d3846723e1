//! Clocks

use std::fmt::Debug;

use jiff::Timestamp;

/// Source of the evaluation instant used for date-window checks.
pub trait Clock: Send + Sync + Debug {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to one instant, for previews and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
