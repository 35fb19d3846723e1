//! Store Actions

use marquee::promotions::PromotionRecord;

/// State transitions the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A promotions fetch was issued.
    FetchStarted,

    /// The fetch resolved with validated records.
    FetchSucceeded(Vec<PromotionRecord>),

    /// The fetch failed with a readable message.
    FetchFailed(String),

    /// The fetch was abandoned before it resolved.
    FetchCancelled,

    /// The external session appeared or went away.
    SessionChanged(bool),

    /// The viewport was resized to the given width.
    ViewportResized(u32),
}

impl Action {
    /// Variant name, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchStarted => "fetch_started",
            Self::FetchSucceeded(_) => "fetch_succeeded",
            Self::FetchFailed(_) => "fetch_failed",
            Self::FetchCancelled => "fetch_cancelled",
            Self::SessionChanged(_) => "session_changed",
            Self::ViewportResized(_) => "viewport_resized",
        }
    }
}
