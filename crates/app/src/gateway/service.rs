//! Promotions gateway.

use std::{num::NonZeroU32, sync::Arc, time::Duration};

use marquee::promotions::wire::Decoded;
use tracing::{debug, error, info, warn};

use crate::{
    gateway::{errors::GatewayError, source::PromotionsSource},
    store::{Action, Store},
};

/// Bounded retry for a single fetch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: NonZeroU32,

    /// Delay before the second attempt; grows linearly afterwards.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: NonZeroU32::MIN,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Result of a fetch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fetch was already running or the cached list is satisfied.
    Skipped,

    /// Records were stored.
    Loaded {
        /// Valid records stored.
        records: usize,

        /// Records dropped during validation.
        rejected: usize,
    },

    /// The fetch failed; the error is in the store.
    Failed,
}

/// Issues promotion fetches and publishes their outcome to the store.
#[derive(Clone)]
pub struct PromotionsGateway {
    store: Store,
    source: Arc<dyn PromotionsSource>,
    retry: RetryPolicy,
}

impl PromotionsGateway {
    /// Create a gateway writing into `store`.
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn PromotionsSource>, retry: RetryPolicy) -> Self {
        Self {
            store,
            source,
            retry,
        }
    }

    /// Fetch promotions unless a fetch is in flight or already satisfied.
    ///
    /// Concurrent triggers collapse into a single request. Dropping the
    /// future mid-flight clears the loading flag so a later trigger can
    /// fetch again.
    pub async fn trigger_fetch(&self) -> FetchOutcome {
        if !self.store.try_begin_fetch() {
            debug!("promotions fetch skipped");

            return FetchOutcome::Skipped;
        }

        let in_flight = InFlight::new(&self.store);
        let result = self.fetch_with_retry().await;
        in_flight.finish();

        match result {
            Ok(decoded) => {
                for rejected in &decoded.rejected {
                    warn!(
                        position = rejected.position,
                        id = rejected.id.as_deref().unwrap_or("<none>"),
                        error = %rejected.error,
                        "rejected promotion record"
                    );
                }

                let outcome = FetchOutcome::Loaded {
                    records: decoded.records.len(),
                    rejected: decoded.rejected.len(),
                };

                info!(?outcome, "promotions fetched");

                self.store.dispatch(Action::FetchSucceeded(decoded.records));

                outcome
            }
            Err(fetch_error) => {
                error!(error = %fetch_error, "failed to fetch promotions");

                self.store
                    .dispatch(Action::FetchFailed(fetch_error.to_string()));

                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<Decoded, GatewayError> {
        let attempts = self.retry.attempts.get();
        let mut attempt = 1;

        loop {
            match self.source.list_promotions().await {
                Ok(decoded) => return Ok(decoded),
                Err(fetch_error) if attempt < attempts => {
                    let delay = self.retry.backoff.saturating_mul(attempt);

                    warn!(attempt, ?delay, error = %fetch_error, "retrying promotions fetch");

                    tokio::time::sleep(delay).await;

                    attempt += 1;
                }
                Err(fetch_error) => return Err(fetch_error),
            }
        }
    }
}

/// Cancels the store's in-flight fetch unless finished.
struct InFlight<'a> {
    store: &'a Store,
    finished: bool,
}

impl<'a> InFlight<'a> {
    const fn new(store: &'a Store) -> Self {
        Self {
            store,
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        warn!("promotions fetch cancelled");

        self.store.dispatch(Action::FetchCancelled);
    }
}
