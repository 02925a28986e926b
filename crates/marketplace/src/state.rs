//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::BackendClient;
use crate::config::MarketplaceConfig;
use crate::media::MediaStaging;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the backend client, and the media staging store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MarketplaceConfig,
    backend: BackendClient,
    media: MediaStaging,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: MarketplaceConfig) -> Self {
        let backend = BackendClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                media: MediaStaging::new(),
            }),
        }
    }

    /// Get a reference to the marketplace configuration.
    #[must_use]
    pub fn config(&self) -> &MarketplaceConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the media staging store.
    #[must_use]
    pub fn media(&self) -> &MediaStaging {
        &self.inner.media
    }
}
