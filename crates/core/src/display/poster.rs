//! Dismissible Poster Controller
//!
//! A single floating promotion shown to signed-in visitors. It hides itself
//! after a fixed delay, can be dismissed, and can open its image full-size.

use std::time::Duration;

use crate::{
    device::DeviceClass,
    display::Epoch,
    promotions::PromotionRecord,
    view::{Picture, PosterView},
};

/// Poster state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterState {
    /// Not drawn.
    Hidden,

    /// Drawn in its corner.
    Visible,

    /// Drawn with the full-size overlay open.
    Expanded,
}

/// Timer instruction for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterCommand {
    /// Replace any pending auto-hide with one firing after `delay`.
    StartAutoHide {
        /// Tag to pass back to [`PosterController::auto_hide_elapsed`].
        epoch: Epoch,

        /// Delay before hiding.
        delay: Duration,
    },

    /// Cancel the pending auto-hide.
    CancelAutoHide,
}

/// Single-item poster state machine.
#[derive(Debug, Clone)]
pub struct PosterController {
    state: PosterState,
    session: bool,
    armed: bool,
    content: Option<PromotionRecord>,
    auto_hide: Duration,
    countdown: bool,
    epoch: Epoch,
}

impl PosterController {
    /// Hidden poster with no session and no content.
    #[must_use]
    pub fn new(auto_hide: Duration) -> Self {
        Self {
            state: PosterState::Hidden,
            session: false,
            armed: false,
            content: None,
            auto_hide,
            countdown: false,
            epoch: Epoch::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PosterState {
        self.state
    }

    /// Whether an auto-hide countdown is pending.
    #[must_use]
    pub const fn is_counting_down(&self) -> bool {
        self.countdown
    }

    /// Tag of the pending auto-hide.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Record the poster would show.
    #[must_use]
    pub fn content(&self) -> Option<&PromotionRecord> {
        self.content.as_ref()
    }

    /// Session presence changed.
    ///
    /// Losing the session hides the poster and cancels the countdown.
    /// Gaining it arms the poster so it shows as soon as it has content.
    pub fn set_session(&mut self, present: bool) -> Option<PosterCommand> {
        if present == self.session {
            return None;
        }

        self.session = present;

        if !present {
            self.armed = false;

            return self.hide();
        }

        self.armed = true;

        self.show_if_ready()
    }

    /// The first eligible record for the slot changed.
    pub fn set_content(&mut self, content: Option<PromotionRecord>) -> Option<PosterCommand> {
        if content == self.content {
            return None;
        }

        self.content = content;

        match (self.state, self.content.is_some()) {
            (PosterState::Visible | PosterState::Expanded, false) => self.hide(),
            (PosterState::Hidden, true) => self.show_if_ready(),
            (PosterState::Visible | PosterState::Expanded, true) | (PosterState::Hidden, false) => {
                None
            }
        }
    }

    /// User closed the poster.
    pub fn dismiss(&mut self) -> Option<PosterCommand> {
        if self.state == PosterState::Hidden {
            return None;
        }

        self.hide()
    }

    /// User opened the full-size overlay. Returns whether the state changed.
    pub fn expand(&mut self) -> bool {
        if self.state != PosterState::Visible {
            return false;
        }

        self.state = PosterState::Expanded;

        true
    }

    /// User closed the overlay or clicked outside it. Returns whether the
    /// state changed.
    pub fn close_overlay(&mut self) -> bool {
        if self.state != PosterState::Expanded {
            return false;
        }

        self.state = PosterState::Visible;

        true
    }

    /// The auto-hide timer tagged `epoch` fired. Returns whether the state
    /// changed.
    pub fn auto_hide_elapsed(&mut self, epoch: Epoch) -> bool {
        if epoch != self.epoch || !self.countdown {
            return false;
        }

        self.countdown = false;
        self.state = PosterState::Hidden;

        true
    }

    /// What to draw for `device`.
    #[must_use]
    pub fn view(&self, device: DeviceClass) -> Option<PosterView> {
        if self.state == PosterState::Hidden {
            return None;
        }

        let record = self.content.as_ref()?;

        Some(PosterView {
            id: record.id.clone(),
            picture: Picture::of(record, device)?,
            expanded: self.state == PosterState::Expanded,
        })
    }

    fn show_if_ready(&mut self) -> Option<PosterCommand> {
        if !(self.session && self.armed && self.content.is_some())
            || self.state != PosterState::Hidden
        {
            return None;
        }

        self.state = PosterState::Visible;
        self.armed = false;
        self.countdown = true;
        self.epoch = self.epoch.next();

        Some(PosterCommand::StartAutoHide {
            epoch: self.epoch,
            delay: self.auto_hide,
        })
    }

    fn hide(&mut self) -> Option<PosterCommand> {
        self.state = PosterState::Hidden;
        self.epoch = self.epoch.next();

        if !self.countdown {
            return None;
        }

        self.countdown = false;

        Some(PosterCommand::CancelAutoHide)
    }
}

#[cfg(test)]
mod tests {
    use crate::{fixtures::PromotionBuilder, timing::DEFAULT_AUTO_HIDE};

    use super::*;

    fn ad() -> PromotionRecord {
        PromotionBuilder::new("poster", "poster_advertisement")
            .image_url("poster.png")
            .background("#fafafa")
            .build()
    }

    fn shown() -> PosterController {
        let mut poster = PosterController::new(DEFAULT_AUTO_HIDE);
        poster.set_content(Some(ad()));
        poster.set_session(true);
        poster
    }

    #[test]
    fn content_without_session_stays_hidden() {
        let mut poster = PosterController::new(DEFAULT_AUTO_HIDE);

        assert_eq!(poster.set_content(Some(ad())), None);
        assert_eq!(poster.state(), PosterState::Hidden);
    }

    #[test]
    fn session_arrival_shows_and_starts_countdown() {
        let mut poster = PosterController::new(DEFAULT_AUTO_HIDE);
        poster.set_content(Some(ad()));

        let command = poster.set_session(true);

        assert_eq!(
            command,
            Some(PosterCommand::StartAutoHide {
                epoch: poster.epoch(),
                delay: DEFAULT_AUTO_HIDE
            })
        );
        assert_eq!(poster.state(), PosterState::Visible);
    }

    #[test]
    fn content_arriving_after_session_shows() {
        let mut poster = PosterController::new(DEFAULT_AUTO_HIDE);

        assert_eq!(poster.set_session(true), None);
        assert!(matches!(
            poster.set_content(Some(ad())),
            Some(PosterCommand::StartAutoHide { .. })
        ));
    }

    #[test]
    fn dismiss_cancels_countdown() {
        let mut poster = shown();
        let epoch = poster.epoch();

        assert_eq!(poster.dismiss(), Some(PosterCommand::CancelAutoHide));
        assert_eq!(poster.state(), PosterState::Hidden);
        assert!(!poster.auto_hide_elapsed(epoch));
        assert_eq!(poster.dismiss(), None);
    }

    #[test]
    fn dismissed_poster_does_not_reappear_on_new_content() {
        let mut poster = shown();
        poster.dismiss();

        let other = PromotionBuilder::new("other", "poster_advertisement")
            .image_url("other.png")
            .build();

        assert_eq!(poster.set_content(Some(other)), None);
        assert_eq!(poster.state(), PosterState::Hidden);
    }

    #[test]
    fn session_loss_hides_and_reestablishing_rearms() {
        let mut poster = shown();

        assert_eq!(poster.set_session(false), Some(PosterCommand::CancelAutoHide));
        assert_eq!(poster.state(), PosterState::Hidden);

        assert!(matches!(
            poster.set_session(true),
            Some(PosterCommand::StartAutoHide { .. })
        ));
        assert_eq!(poster.state(), PosterState::Visible);
    }

    #[test]
    fn expand_and_close_overlay() {
        let mut poster = shown();

        assert!(poster.expand());
        assert!(!poster.expand());
        assert!(poster.view(DeviceClass::Desktop).is_some_and(|view| view.expanded));
        assert!(poster.close_overlay());
        assert_eq!(poster.state(), PosterState::Visible);
        assert!(!poster.close_overlay());
    }

    #[test]
    fn auto_hide_closes_the_overlay_too() {
        let mut poster = shown();
        poster.expand();

        assert!(poster.auto_hide_elapsed(poster.epoch()));
        assert_eq!(poster.state(), PosterState::Hidden);
        assert!(poster.view(DeviceClass::Desktop).is_none());
    }

    #[test]
    fn losing_content_never_leaves_a_stale_poster() {
        let mut poster = shown();

        assert_eq!(poster.set_content(None), Some(PosterCommand::CancelAutoHide));
        assert!(poster.view(DeviceClass::Mobile).is_none());
    }

    #[test]
    fn background_tints_the_view() {
        let poster = shown();

        assert_eq!(
            poster
                .view(DeviceClass::Mobile)
                .map(|view| view.picture.background),
            Some("#fafafa".to_string())
        );
    }
}
