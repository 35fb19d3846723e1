//! View Models
//!
//! What each consumer would draw, as plain data. Every view is derived
//! from controller state alone.

use serde::Serialize;
use smallvec::SmallVec;

use crate::{
    device::DeviceClass,
    promotions::{PromotionId, PromotionRecord},
};

/// Render result of a promotional consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "render", content = "view", rename_all = "snake_case")]
pub enum Render<T> {
    /// Draw nothing: loading, empty, dismissed or hidden.
    Nothing,

    /// Minimal inline message, used when the fetch failed.
    Message(String),

    /// Draw the view.
    Content(T),
}

impl<T> Render<T> {
    /// Combine the fetch error state with a controller's content.
    ///
    /// A fetch error always wins so a stale record is never shown next to
    /// an error.
    #[must_use]
    pub fn resolve(error: Option<&str>, content: Option<T>) -> Self {
        match (error, content) {
            (Some(error), _) => Self::Message(format!("Unable to load promotions: {error}")),
            (None, Some(content)) => Self::Content(content),
            (None, None) => Self::Nothing,
        }
    }

    /// Borrow the content, if any.
    #[must_use]
    pub fn content(&self) -> Option<&T> {
        match self {
            Self::Content(content) => Some(content),
            Self::Nothing | Self::Message(_) => None,
        }
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

/// Link opened in a new, unrelated browsing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundLink {
    /// Destination URL.
    pub href: String,
}

impl OutboundLink {
    /// Browsing context target.
    pub const TARGET: &'static str = "_blank";

    /// Relationship that keeps the new context from reaching its opener.
    pub const REL: &'static str = "noopener noreferrer";

    /// Anchor attributes as name/value pairs.
    #[must_use]
    pub fn attributes(&self) -> [(&'static str, &str); 3] {
        [
            ("href", self.href.as_str()),
            ("target", Self::TARGET),
            ("rel", Self::REL),
        ]
    }
}

/// Image with its optional link and background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Picture {
    /// Image reference.
    pub src: String,

    /// Alternative text, taken from the record title.
    pub alt: Option<String>,

    /// Wrapping link, when the record has one. Without it the image is inert.
    pub link: Option<OutboundLink>,

    /// Background color behind the image.
    pub background: String,
}

impl Picture {
    /// Picture of `record` for `device`, or `None` when the record lacks the
    /// image its variant needs.
    #[must_use]
    pub fn of(record: &PromotionRecord, device: DeviceClass) -> Option<Self> {
        let src = record.image_for(device)?;

        Some(Self {
            src: src.to_string(),
            alt: record.title.clone(),
            link: record.link().map(|href| OutboundLink {
                href: href.to_string(),
            }),
            background: record.background_or_default().to_string(),
        })
    }
}

/// Progress indicator under a rotating banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// Whether this indicator belongs to the displayed record.
    pub active: bool,

    /// Fill level; always zero for inactive indicators.
    pub progress_percent: u8,
}

/// Rotating banner frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    /// Displayed record.
    pub id: PromotionId,

    /// Displayed image.
    pub picture: Picture,

    /// One indicator per eligible record.
    pub indicators: SmallVec<[Indicator; 8]>,
}

impl BannerView {
    /// Index of the active indicator.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.indicators.iter().position(|indicator| indicator.active)
    }
}

/// Floating poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterView {
    /// Displayed record.
    pub id: PromotionId,

    /// Poster image; its background tints the container.
    pub picture: Picture,

    /// Whether the full-size overlay is open.
    pub expanded: bool,
}

/// Dismissible advertisement strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripView {
    /// Displayed record.
    pub id: PromotionId,

    /// Strip image.
    pub picture: Picture,
}

#[cfg(test)]
mod tests {
    use crate::fixtures::PromotionBuilder;

    use super::*;

    #[test]
    fn links_never_leak_the_opener() {
        let record = PromotionBuilder::new("a", "homepage_hero_banner")
            .desktop_image("a.png")
            .link("https://shop.example")
            .build();

        let picture = Picture::of(&record, DeviceClass::Desktop);
        let attributes = picture.and_then(|picture| picture.link).map(|link| {
            link.attributes()
                .map(|(name, value)| format!("{name}={value}"))
                .join(" ")
        });

        assert_eq!(
            attributes.as_deref(),
            Some("href=https://shop.example target=_blank rel=noopener noreferrer")
        );
    }

    #[test]
    fn records_without_links_are_inert() {
        let record = PromotionBuilder::new("a", "homepage_hero_banner")
            .desktop_image("a.png")
            .link("   ")
            .build();

        let picture = Picture::of(&record, DeviceClass::Desktop);

        assert!(picture.is_some_and(|picture| picture.link.is_none()));
    }

    #[test]
    fn errors_override_content() {
        let render = Render::resolve(Some("timeout"), Some(1));

        assert_eq!(
            render,
            Render::Message("Unable to load promotions: timeout".to_string())
        );
        assert!(Render::<u8>::resolve(None, None).is_nothing());
        assert_eq!(Render::resolve(None, Some(2)).content(), Some(&2));
    }
}
