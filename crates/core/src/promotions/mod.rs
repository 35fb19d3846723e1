//! Promotions
//!
//! The record shape shared by every promotional consumer, plus the
//! eligibility rules and the network schema that produces it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::Serialize;

use crate::device::DeviceClass;

pub mod eligibility;
pub mod wire;

/// Substring that marks a slot as an advertisement placement.
pub const ADVERTISEMENT_MARKER: &str = "advertisement";

/// Background applied behind an asset that does not specify one.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Opaque promotion identifier assigned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PromotionId(String);

impl PromotionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PromotionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Named placement region on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slot(String);

impl Slot {
    /// Create a slot from its tag.
    #[must_use]
    pub fn new(slot: impl Into<String>) -> Self {
        Self(slot.into())
    }

    /// Borrow the slot tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Advertisement slots carry a single `image_url` instead of
    /// device-specific image lists.
    #[must_use]
    pub fn is_advertisement(&self) -> bool {
        self.0.contains(ADVERTISEMENT_MARKER)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Promotional asset together with its placement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    /// Unique identifier.
    pub id: PromotionId,

    /// Placement slot this record may appear in.
    pub slot: Slot,

    /// Display label.
    pub title: Option<String>,

    /// Manual toggle, independent of the date window.
    pub is_active: bool,

    /// Inclusive lower validity bound; `None` is unbounded.
    pub start_date: Option<Timestamp>,

    /// Inclusive upper validity bound; `None` is unbounded.
    pub end_date: Option<Timestamp>,

    /// Higher sorts first among eligible records of the same slot.
    pub priority: i64,

    /// Images for desktop viewports (non-advertisement slots).
    pub desktop_images: Vec<String>,

    /// Images for mobile viewports (non-advertisement slots).
    pub mobile_images: Vec<String>,

    /// Single image used by advertisement slots.
    pub image_url: Option<String>,

    /// Outbound URL opened in a new, unrelated browsing context.
    pub navigate_link: Option<String>,

    /// Color applied behind the asset.
    pub background_color: Option<String>,
}

impl PromotionRecord {
    /// Image required by this record's variant for the given device class.
    ///
    /// Advertisement slots use `image_url`; every other slot uses the first
    /// non-blank entry of the device-specific list.
    #[must_use]
    pub fn image_for(&self, device: DeviceClass) -> Option<&str> {
        if self.slot.is_advertisement() {
            return self.image_url.as_deref().filter(|url| !url.trim().is_empty());
        }

        let images = match device {
            DeviceClass::Mobile => &self.mobile_images,
            DeviceClass::Desktop => &self.desktop_images,
        };

        images
            .iter()
            .map(String::as_str)
            .find(|image| !image.trim().is_empty())
    }

    /// Whether the record is switched on and `now` falls inside its window.
    #[must_use]
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        self.is_active
            && self.start_date.is_none_or(|start| now >= start)
            && self.end_date.is_none_or(|end| now <= end)
    }

    /// Background color, falling back to [`DEFAULT_BACKGROUND`].
    #[must_use]
    pub fn background_or_default(&self) -> &str {
        self.background_color
            .as_deref()
            .filter(|color| !color.trim().is_empty())
            .unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Outbound link, ignoring blank values.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.navigate_link
            .as_deref()
            .filter(|link| !link.trim().is_empty())
    }
}
