//! Advertisement Strip

use crate::{
    device::DeviceClass,
    promotions::PromotionRecord,
    view::{Picture, StripView},
};

/// Inline advertisement the visitor can close for the rest of the page's
/// lifetime. No timers.
#[derive(Debug, Clone, Default)]
pub struct AdStrip {
    content: Option<PromotionRecord>,
    dismissed: bool,
}

impl AdStrip {
    /// Strip with nothing to show.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed record. Returns whether the view may have changed.
    pub fn set_content(&mut self, content: Option<PromotionRecord>) -> bool {
        if content == self.content {
            return false;
        }

        self.content = content;

        !self.dismissed
    }

    /// User closed the strip. Returns whether the state changed.
    pub fn dismiss(&mut self) -> bool {
        !std::mem::replace(&mut self.dismissed, true)
    }

    /// Whether the user closed the strip.
    #[must_use]
    pub const fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// What to draw for `device`.
    #[must_use]
    pub fn view(&self, device: DeviceClass) -> Option<StripView> {
        if self.dismissed {
            return None;
        }

        let record = self.content.as_ref()?;

        Some(StripView {
            id: record.id.clone(),
            picture: Picture::of(record, device)?,
        })
    }
}
