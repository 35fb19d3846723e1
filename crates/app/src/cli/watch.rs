use std::{sync::Arc, time::Duration};

use clap::Args;
use marquee::promotions::Slot;
use marquee_app::{
    clock::SystemClock,
    components::{AdStripComponent, Poster, RotatingBanner},
    config::{ApiConfig, DisplayConfig},
    context::AppContext,
    store::Action,
};
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use crate::{cli::CliError, shutdown};

#[derive(Debug, Args)]
pub(crate) struct WatchArgs {
    /// Slot shown by the rotating banner
    #[arg(long, default_value = "homepage_hero_banner")]
    banner_slot: String,

    /// Slot shown by the floating poster
    #[arg(long, default_value = "floating_advertisement")]
    poster_slot: String,

    /// Slot shown by the dismissible advertisement strip
    #[arg(long, default_value = "sidebar_advertisement")]
    strip_slot: String,

    /// Viewport width in logical pixels
    #[arg(long, default_value_t = 1024_u32)]
    width: u32,

    /// Start with an authenticated session
    #[arg(long)]
    session: bool,

    /// Seconds between fetch triggers; cached lists are kept
    #[arg(long, default_value_t = 30_u64)]
    refresh_seconds: u64,
}

pub(crate) async fn run(
    api: &ApiConfig,
    display: &DisplayConfig,
    args: WatchArgs,
) -> Result<(), CliError> {
    let context = AppContext::from_config(
        api,
        display,
        display.viewport(args.width),
        Arc::new(SystemClock),
    )?;

    context.store.dispatch(Action::SessionChanged(args.session));

    let banner = RotatingBanner::spawn(&context.components, Slot::new(args.banner_slot));
    let poster = Poster::spawn(&context.components, Slot::new(args.poster_slot));
    let strip = AdStripComponent::spawn(&context.components, Slot::new(args.strip_slot));

    let mut banner_view = banner.subscribe();
    let mut poster_view = poster.subscribe();
    let mut strip_view = strip.subscribe();

    let mut refresh = time::interval(Duration::from_secs(args.refresh_seconds.max(1)));
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let stop = shutdown::stop_requested();
    tokio::pin!(stop);

    info!(url = %api.api_url, "watching promotions");

    loop {
        tokio::select! {
            result = &mut stop => {
                result?;
                break;
            }
            _ = refresh.tick() => {
                let gateway = context.gateway.clone();

                tokio::spawn(async move {
                    gateway.trigger_fetch().await;
                });
            }
            Ok(()) = banner_view.changed() => {
                info!(render = ?*banner_view.borrow_and_update(), "banner render");
            }
            Ok(()) = poster_view.changed() => {
                info!(render = ?*poster_view.borrow_and_update(), "poster render");
            }
            Ok(()) = strip_view.changed() => {
                info!(render = ?*strip_view.borrow_and_update(), "strip render");
            }
        }
    }

    info!(timers = context.components.timers.active(), "unmounting components");

    drop((banner, poster, strip));

    Ok(())
}
