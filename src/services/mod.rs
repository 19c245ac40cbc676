//! Relay services

pub mod relay;
pub mod upstream;

use std::sync::Arc;

use crate::config::UpstreamConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub relay: relay::RelayService,
}

impl Services {
    /// Create all services on top of the given upstream transport
    pub fn new(config: UpstreamConfig, upstream: Arc<dyn upstream::Upstream>) -> Self {
        Self {
            relay: relay::RelayService::new(Arc::new(config), upstream),
        }
    }

    /// Services talking to the real upstream over HTTP
    pub fn with_http(config: UpstreamConfig) -> Self {
        Self::new(
            config,
            Arc::new(upstream::HttpUpstream::new(reqwest::Client::new())),
        )
    }
}
