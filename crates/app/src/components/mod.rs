//! Components
//!
//! Each component runs as a task that follows the store, feeds a core
//! controller, owns the controller's timers and publishes its render on a
//! `watch` channel. Dropping a component handle stops the task, and with it
//! every timer the task owns.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use marquee::{
    promotions::{PromotionRecord, Slot, eligibility},
    timing::Timings,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    clock::Clock,
    store::Store,
    timers::{TimerGauge, TimerHandle},
};

/// Longest wait before a date-window recheck. Later boundaries are reached
/// in several hops.
const MAX_WINDOW_WAIT: Duration = Duration::from_secs(60 * 60);

pub mod banner;
pub mod poster;
pub mod strip;

pub use banner::RotatingBanner;
pub use poster::{Poster, PosterInput};
pub use strip::AdStripComponent;

/// Dependencies handed to every component.
#[derive(Debug, Clone)]
pub struct ComponentContext {
    /// Application state.
    pub store: Store,

    /// Timer periods.
    pub timings: Timings,

    /// Evaluation instant source.
    pub clock: Arc<dyn Clock>,

    /// Live timer counter.
    pub timers: TimerGauge,
}

impl ComponentContext {
    /// Context with a fresh timer gauge.
    #[must_use]
    pub fn new(store: Store, timings: Timings, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            timings,
            clock,
            timers: TimerGauge::default(),
        }
    }
}

/// One-shot timer sending `event` when the next date window of `slot`
/// opens or closes. `None` when no record of the slot has a pending
/// boundary.
fn window_timer<E>(
    ctx: &ComponentContext,
    records: &[PromotionRecord],
    slot: &Slot,
    now: Timestamp,
    events: UnboundedSender<E>,
    event: E,
) -> Option<TimerHandle>
where
    E: Send + 'static,
{
    let boundary = eligibility::next_window_change(records, slot, now)?;
    let delay = Duration::try_from(boundary.duration_since(now)).ok()?;

    Some(TimerHandle::after(
        delay.min(MAX_WINDOW_WAIT),
        events,
        event,
        &ctx.timers,
    ))
}
