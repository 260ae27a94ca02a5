//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries configuration and the auth service. No session lives here: each
//! request restores its own store from the visitor's cookies.

use std::sync::Arc;

use crate::auth::{AuthService, IdentityProvider, MockIdentityProvider};
use crate::config::SiteConfig;

/// Clone is required by Axum; inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub auth: AuthService,
}

impl AppState {
    #[must_use]
    pub fn new(config: SiteConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { config: Arc::new(config), auth: AuthService::new(provider) }
    }

    /// State backed by the mock identity provider described by `config`.
    #[must_use]
    pub fn with_mock_provider(config: SiteConfig) -> Self {
        let provider = MockIdentityProvider::new(&config.admin_email, &config.admin_password, config.auth_delay)
            .with_base_url(&config.base_url)
            .with_echoed_links(config.echo_links());
        Self::new(config, Arc::new(provider))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
