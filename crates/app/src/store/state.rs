//! Application State

use marquee::{device::Viewport, promotions::PromotionRecord};

/// Everything the promotional consumers render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Remote promotion list and its fetch status.
    pub promotions: PromotionsState,

    /// Signed-in gate.
    pub session: SessionState,

    /// Current viewport.
    pub viewport: Viewport,
}

/// Fetched records plus loading and error flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionsState {
    /// Records in fetch order.
    pub records: Vec<PromotionRecord>,

    /// A fetch is in flight.
    pub loading: bool,

    /// Message of the last failed fetch.
    pub error: Option<String>,
}

impl PromotionsState {
    /// A fetch is neither running nor already satisfied.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        !self.loading && (self.records.is_empty() || self.error.is_some())
    }
}

/// Session presence, as reported by the external auth store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Someone is signed in.
    pub present: bool,
}
