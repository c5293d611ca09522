use std::sync::Arc;

use seventv_client::api::SevenTvClient;
use seventv_client::identity::IdentityClient;
use seventv_client::resolver::CosmeticsResolver;
use seventv_client::{ClientError, build_http_client};

use crate::config::AppConfig;

/// Application shared state accessible from axum handlers.
///
/// Immutable after startup; cloning is cheap.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    resolver: CosmeticsResolver,
}

impl SharedState {
    /// Build the upstream clients described by `config`.
    pub fn new(config: AppConfig) -> Result<Self, ClientError> {
        let http = build_http_client(&config.user_agent)?;
        let resolver = CosmeticsResolver::new(
            IdentityClient::new(http.clone(), &config.identity_api_url)?,
            SevenTvClient::new(http, &config.seventv_api_url)?,
        );
        Ok(Self::with_resolver(config, resolver))
    }

    /// Create shared state around an already-built resolver.
    pub fn with_resolver(config: AppConfig, resolver: CosmeticsResolver) -> Self {
        Self {
            inner: Arc::new(SharedStateInner { config, resolver }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn resolver(&self) -> &CosmeticsResolver {
        &self.inner.resolver
    }
}
