//! Display Timings

use std::time::Duration;

use thiserror::Error;

/// Default interval between progress ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Default interval between banner advances.
pub const DEFAULT_ADVANCE: Duration = Duration::from_millis(5_000);

/// Default delay before a visible poster hides itself.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_millis(7_000);

/// Invalid timing combinations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimingsError {
    /// A duration was zero.
    #[error("{0} interval must be greater than zero")]
    Zero(&'static str),

    /// The progress tick is slower than the advance it reports on.
    #[error("tick interval ({tick:?}) must not exceed advance interval ({advance:?})")]
    TickExceedsAdvance {
        /// Configured tick.
        tick: Duration,

        /// Configured advance.
        advance: Duration,
    },
}

/// Timer periods driving the rotating banner and the poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Progress indicator step period.
    pub tick: Duration,

    /// Banner advance period.
    pub advance: Duration,

    /// Poster auto-hide delay.
    pub auto_hide: Duration,
}

impl Timings {
    /// Build and validate timings.
    ///
    /// # Errors
    ///
    /// Returns an error when any duration is zero or the tick is longer than
    /// the advance interval.
    pub fn new(tick: Duration, advance: Duration, auto_hide: Duration) -> Result<Self, TimingsError> {
        let timings = Self {
            tick,
            advance,
            auto_hide,
        };

        timings.validate()?;

        Ok(timings)
    }

    /// Check the invariants of [`Timings::new`].
    ///
    /// # Errors
    ///
    /// See [`Timings::new`].
    pub fn validate(&self) -> Result<(), TimingsError> {
        if self.tick.is_zero() {
            return Err(TimingsError::Zero("tick"));
        }

        if self.advance.is_zero() {
            return Err(TimingsError::Zero("advance"));
        }

        if self.auto_hide.is_zero() {
            return Err(TimingsError::Zero("auto-hide"));
        }

        if self.tick > self.advance {
            return Err(TimingsError::TickExceedsAdvance {
                tick: self.tick,
                advance: self.advance,
            });
        }

        Ok(())
    }

    /// Ticks that fit in one advance interval; the progress bar fills in
    /// exactly this many steps.
    #[must_use]
    pub fn ticks_per_cycle(&self) -> u32 {
        let ticks = self.advance.as_nanos() / self.tick.as_nanos().max(1);

        u32::try_from(ticks).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            advance: DEFAULT_ADVANCE,
            auto_hide: DEFAULT_AUTO_HIDE,
        }
    }
}
