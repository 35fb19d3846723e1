//! Reducers
//!
//! One pure function per state slice. The store composes them.

use marquee::device::Viewport;

use crate::store::{
    actions::Action,
    state::{AppState, PromotionsState, SessionState},
};

/// Apply `action` to `state`.
#[must_use]
pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        promotions: promotions(state.promotions, action),
        session: session(state.session, action),
        viewport: viewport(state.viewport, action),
    }
}

/// Promotions slice.
#[must_use]
pub fn promotions(state: PromotionsState, action: &Action) -> PromotionsState {
    match action {
        Action::FetchStarted => PromotionsState {
            loading: true,
            error: None,
            ..state
        },
        Action::FetchSucceeded(records) => PromotionsState {
            records: records.clone(),
            loading: false,
            error: None,
        },
        // Failed fetches drop the cached list so nothing stale stays on screen.
        Action::FetchFailed(message) => PromotionsState {
            records: Vec::new(),
            loading: false,
            error: Some(message.clone()),
        },
        // Leaves records and error as they were before the fetch began.
        Action::FetchCancelled => PromotionsState {
            loading: false,
            ..state
        },
        Action::SessionChanged(_) | Action::ViewportResized(_) => state,
    }
}

/// Session slice.
#[must_use]
pub fn session(state: SessionState, action: &Action) -> SessionState {
    match action {
        Action::SessionChanged(present) => SessionState { present: *present },
        Action::FetchStarted
        | Action::FetchSucceeded(_)
        | Action::FetchFailed(_)
        | Action::FetchCancelled
        | Action::ViewportResized(_) => state,
    }
}

/// Viewport slice.
#[must_use]
pub fn viewport(state: Viewport, action: &Action) -> Viewport {
    match action {
        Action::ViewportResized(width) => state.resized(*width),
        Action::FetchStarted
        | Action::FetchSucceeded(_)
        | Action::FetchFailed(_)
        | Action::FetchCancelled
        | Action::SessionChanged(_) => state,
    }
}

#[cfg(test)]
mod tests {
    use marquee::{device::DeviceClass, fixtures::PromotionBuilder};

    use super::*;

    #[test]
    fn fetch_lifecycle() {
        let record = PromotionBuilder::new("a", "slot").image("a.png").build();

        let state = reduce(AppState::default(), &Action::FetchStarted);
        assert!(state.promotions.loading);
        assert!(!state.promotions.needs_fetch());

        let state = reduce(state, &Action::FetchSucceeded(vec![record.clone()]));
        assert!(!state.promotions.loading);
        assert_eq!(state.promotions.records, [record]);
        assert!(!state.promotions.needs_fetch());

        let state = reduce(state, &Action::FetchFailed("boom".to_string()));
        assert!(state.promotions.records.is_empty());
        assert_eq!(state.promotions.error.as_deref(), Some("boom"));
        assert!(state.promotions.needs_fetch());
    }

    #[test]
    fn cancelled_fetch_can_be_retried() {
        let state = reduce(AppState::default(), &Action::FetchStarted);
        let state = reduce(state, &Action::FetchCancelled);

        assert!(!state.promotions.loading);
        assert!(state.promotions.error.is_none());
        assert!(state.promotions.needs_fetch());
    }

    #[test]
    fn empty_success_still_needs_fetch() {
        let state = reduce(AppState::default(), &Action::FetchSucceeded(Vec::new()));

        assert!(state.promotions.needs_fetch());
    }

    #[test]
    fn slices_ignore_foreign_actions() {
        let state = reduce(AppState::default(), &Action::SessionChanged(true));
        let state = reduce(state, &Action::ViewportResized(320));

        assert!(state.session.present);
        assert_eq!(state.viewport.device_class(), DeviceClass::Mobile);
        assert_eq!(state.promotions, PromotionsState::default());
    }
}
