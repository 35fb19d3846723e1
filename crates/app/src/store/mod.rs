//! Store
//!
//! Typed application state behind a `watch` channel. Components receive a
//! [`Store`] explicitly and re-render from the snapshots it publishes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

pub mod actions;
pub mod reducers;
pub mod state;

pub use actions::Action;
pub use state::{AppState, PromotionsState, SessionState};

/// Shared application state container.
#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<watch::Sender<AppState>>,
}

impl Store {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        let (state, _) = watch::channel(initial);

        Self {
            state: Arc::new(state),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every effective change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Apply `action`. Subscribers are only woken when the state changed.
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&self, action: Action) -> bool {
        let changed = self.state.send_if_modified(|state| {
            let next = reducers::reduce(state.clone(), &action);

            if next == *state {
                return false;
            }

            *state = next;

            true
        });

        match &action {
            Action::FetchSucceeded(records) => {
                debug!(action = action.name(), records = records.len(), changed, "store dispatch");
            }
            Action::FetchFailed(message) => {
                debug!(action = action.name(), %message, changed, "store dispatch");
            }
            _ => debug!(action = action.name(), changed, "store dispatch"),
        }

        changed
    }

    /// Atomically mark a fetch as started if one is needed.
    ///
    /// Returns `false` when a fetch is already in flight or the cached list
    /// is already satisfied.
    pub fn try_begin_fetch(&self) -> bool {
        self.state.send_if_modified(|state| {
            if !state.promotions.needs_fetch() {
                return false;
            }

            *state = reducers::reduce(state.clone(), &Action::FetchStarted);

            true
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_dispatch_does_not_notify() {
        let store = Store::default();
        let receiver = store.subscribe();

        assert!(!store.dispatch(Action::SessionChanged(false)));
        assert!(!receiver.has_changed().unwrap_or(true));

        assert!(store.dispatch(Action::SessionChanged(true)));
        assert!(receiver.has_changed().unwrap_or(false));
    }

    #[test]
    fn begin_fetch_is_exclusive() {
        let store = Store::default();

        assert!(store.try_begin_fetch());
        assert!(!store.try_begin_fetch());
        assert!(store.snapshot().promotions.loading);
    }
}
