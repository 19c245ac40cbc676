//! Outbound transport to the upstream equipment service

use async_trait::async_trait;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method, StatusCode,
};
use serde_json::Value;
use std::fmt;

use crate::error::AppResult;

/// A single authenticated call to the upstream service
#[derive(Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub token: String,
    /// JSON payload, sent only for POST
    pub body: Option<Value>,
}

impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("body", &self.body)
            .finish()
    }
}

/// Raw upstream answer; the body is kept as text so non-JSON replies survive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub reason: Option<String>,
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> AppResult<UpstreamReply>;
}

/// reqwest-backed upstream, sharing one connection pool across requests
#[derive(Clone, Default)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: UpstreamRequest) -> AppResult<UpstreamReply> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", request.token));

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let reason = status.canonical_reason().map(str::to_string);
        let text = response.text().await?;

        tracing::debug!("{} {} -> {}", request.method, request.url, status);

        Ok(UpstreamReply {
            status,
            reason,
            text,
        })
    }
}
