use std::sync::Arc;

use clap::Args;
use jiff::Timestamp;
use marquee::promotions::{PromotionRecord, Slot, eligibility};
use marquee_app::{
    clock::{Clock, FixedClock, SystemClock},
    config::{ApiConfig, DisplayConfig},
    context::AppContext,
    gateway::FetchOutcome,
};

use crate::cli::CliError;

#[derive(Debug, Args)]
pub(crate) struct SelectArgs {
    /// Slot identifier, e.g. `homepage_hero_banner`
    #[arg(long)]
    slot: String,

    /// Viewport width in logical pixels
    #[arg(long, default_value_t = 1024_u32)]
    width: u32,

    /// Evaluate date windows at this RFC 3339 instant instead of now
    #[arg(long)]
    at: Option<Timestamp>,

    /// Print only the record a single-record display would show
    #[arg(long)]
    first: bool,
}

pub(crate) async fn run(
    api: &ApiConfig,
    display: &DisplayConfig,
    args: SelectArgs,
) -> Result<(), CliError> {
    let clock: Arc<dyn Clock> = match args.at {
        Some(instant) => Arc::new(FixedClock(instant)),
        None => Arc::new(SystemClock),
    };

    let viewport = display.viewport(args.width);
    let context = AppContext::from_config(api, display, viewport, Arc::clone(&clock))?;

    if context.gateway.trigger_fetch().await == FetchOutcome::Failed {
        let message = context
            .store
            .snapshot()
            .promotions
            .error
            .unwrap_or_default();

        return Err(CliError::Fetch(message));
    }

    let state = context.store.snapshot();
    let slot = Slot::new(args.slot);
    let device = viewport.device_class();
    let now = clock.now();

    let selected: Vec<PromotionRecord> = if args.first {
        eligibility::first_eligible(&state.promotions.records, &slot, device, now)
            .into_iter()
            .collect()
    } else {
        eligibility::select(&state.promotions.records, &slot, device, now)
    };

    let output = serde_json::to_string_pretty(&selected)?;

    #[expect(clippy::print_stdout, reason = "command output goes to stdout")]
    {
        println!("{output}");
    }

    Ok(())
}
