//! App Context

use std::sync::Arc;

use marquee::{device::Viewport, timing::TimingsError};
use thiserror::Error;

use crate::{
    clock::Clock,
    components::ComponentContext,
    config::{ApiConfig, DisplayConfig},
    gateway::{GatewayError, HttpPromotionsSource, PromotionsGateway},
    store::{AppState, Store},
};

/// Errors raised while wiring the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// Timer periods are unusable.
    #[error("invalid display timings: {0}")]
    Timings(#[from] TimingsError),

    /// The HTTP client could not be built.
    #[error("failed to build promotions client: {0}")]
    Gateway(#[from] GatewayError),
}

/// Store, gateway and component dependencies for one page.
#[derive(Clone)]
pub struct AppContext {
    /// Application state.
    pub store: Store,

    /// Promotion fetcher.
    pub gateway: PromotionsGateway,

    /// Dependencies handed to mounted components.
    pub components: ComponentContext,
}

impl AppContext {
    /// Build application context against the configured REST API.
    ///
    /// # Errors
    ///
    /// Returns an error when the timings are invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(
        api: &ApiConfig,
        display: &DisplayConfig,
        viewport: Viewport,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppInitError> {
        let timings = display.timings()?;
        let source = HttpPromotionsSource::new(&api.api_url, &api.api_path, api.timeout())?;

        let store = Store::new(AppState {
            viewport,
            ..AppState::default()
        });

        Ok(Self {
            gateway: PromotionsGateway::new(store.clone(), Arc::new(source), api.retry_policy()),
            components: ComponentContext::new(store.clone(), timings, clock),
            store,
        })
    }
}
