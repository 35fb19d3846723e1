//! Display Config

use std::time::Duration;

use clap::Args;
use marquee::{
    device::{MOBILE_BREAKPOINT_PX, Viewport},
    timing::{Timings, TimingsError},
};

/// Timer periods and viewport settings.
#[derive(Debug, Args)]
pub struct DisplayConfig {
    /// Progress tick interval in milliseconds
    #[arg(long, env = "BANNER_TICK_MS", default_value_t = 100_u64)]
    pub tick_ms: u64,

    /// Banner advance interval in milliseconds
    #[arg(long, env = "BANNER_ADVANCE_MS", default_value_t = 5_000_u64)]
    pub advance_ms: u64,

    /// Poster auto-hide delay in milliseconds
    #[arg(long, env = "POSTER_AUTO_HIDE_MS", default_value_t = 7_000_u64)]
    pub auto_hide_ms: u64,

    /// Widest viewport treated as mobile, in logical pixels
    #[arg(long, env = "MOBILE_BREAKPOINT_PX", default_value_t = MOBILE_BREAKPOINT_PX)]
    pub mobile_breakpoint: u32,
}

impl DisplayConfig {
    /// Validated timer periods.
    ///
    /// # Errors
    ///
    /// Returns an error when the periods are zero or inconsistent.
    pub fn timings(&self) -> Result<Timings, TimingsError> {
        Timings::new(
            Duration::from_millis(self.tick_ms),
            Duration::from_millis(self.advance_ms),
            Duration::from_millis(self.auto_hide_ms),
        )
    }

    /// Viewport of `width` classified with the configured breakpoint.
    #[must_use]
    pub const fn viewport(&self, width: u32) -> Viewport {
        Viewport::with_breakpoint(width, self.mobile_breakpoint)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        display: DisplayConfig,
    }

    #[test]
    fn defaults_match_recommended_timings() -> TestResult {
        let harness = Harness::try_parse_from(["marquee"])?;

        assert_eq!(harness.display.timings()?, Timings::default());
        assert_eq!(harness.display.mobile_breakpoint, 768);

        Ok(())
    }

    #[test]
    fn inconsistent_periods_are_rejected() -> TestResult {
        let harness = Harness::try_parse_from(["marquee", "--tick-ms", "900", "--advance-ms", "500"])?;

        assert!(harness.display.timings().is_err());

        Ok(())
    }
}
