//! Fixtures
//!
//! Builders for promotion records used by tests, demos and the CLI.

use jiff::Timestamp;

use crate::promotions::{PromotionId, PromotionRecord, Slot};

/// Fluent builder for [`PromotionRecord`].
///
/// Records start active, unbounded in time, priority `0` and without images.
#[derive(Debug, Clone)]
pub struct PromotionBuilder {
    record: PromotionRecord,
}

impl PromotionBuilder {
    /// Start a record with the given identifier and slot.
    #[must_use]
    pub fn new(id: &str, slot: &str) -> Self {
        Self {
            record: PromotionRecord {
                id: PromotionId::new(id),
                slot: Slot::new(slot),
                title: None,
                is_active: true,
                start_date: None,
                end_date: None,
                priority: 0,
                desktop_images: Vec::new(),
                mobile_images: Vec::new(),
                image_url: None,
                navigate_link: None,
                background_color: None,
            },
        }
    }

    /// Set the display title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.record.title = Some(title.to_string());
        self
    }

    /// Toggle the active flag.
    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.record.is_active = is_active;
        self
    }

    /// Set the validity window.
    #[must_use]
    pub fn window(mut self, start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        self.record.start_date = start;
        self.record.end_date = end;
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.record.priority = priority;
        self
    }

    /// Append a desktop image.
    #[must_use]
    pub fn desktop_image(mut self, image: &str) -> Self {
        self.record.desktop_images.push(image.to_string());
        self
    }

    /// Append a mobile image.
    #[must_use]
    pub fn mobile_image(mut self, image: &str) -> Self {
        self.record.mobile_images.push(image.to_string());
        self
    }

    /// Append the same image to both device lists.
    #[must_use]
    pub fn image(self, image: &str) -> Self {
        self.desktop_image(image).mobile_image(image)
    }

    /// Set the advertisement image.
    #[must_use]
    pub fn image_url(mut self, url: &str) -> Self {
        self.record.image_url = Some(url.to_string());
        self
    }

    /// Set the outbound link.
    #[must_use]
    pub fn link(mut self, link: &str) -> Self {
        self.record.navigate_link = Some(link.to_string());
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: &str) -> Self {
        self.record.background_color = Some(color.to_string());
        self
    }

    /// Finish the record.
    #[must_use]
    pub fn build(self) -> PromotionRecord {
        self.record
    }
}
