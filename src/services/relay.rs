//! Relay service: forwards equipment requests to the upstream service

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    config::UpstreamConfig,
    error::{AppError, AppResult},
    services::upstream::{Upstream, UpstreamRequest},
};

/// Successful relay result, ready to be returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Clone)]
pub struct RelayService {
    config: Arc<UpstreamConfig>,
    upstream: Arc<dyn Upstream>,
}

impl RelayService {
    pub fn new(config: Arc<UpstreamConfig>, upstream: Arc<dyn Upstream>) -> Self {
        Self { config, upstream }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_complete()
    }

    /// List equipment requests from upstream
    pub async fn list(&self) -> AppResult<RelayResponse> {
        self.forward(Method::GET, None).await
    }

    /// Create an equipment request upstream. A JSON `null` is sent as `{}`.
    pub async fn create(&self, body: Value) -> AppResult<RelayResponse> {
        let body = if body.is_null() { json!({}) } else { body };
        self.forward(Method::POST, Some(body)).await
    }

    async fn forward(&self, method: Method, body: Option<Value>) -> AppResult<RelayResponse> {
        // Must fail before any outbound call
        let url = self.config.url()?;

        let reply = self
            .upstream
            .send(UpstreamRequest {
                method: method.clone(),
                url: url.clone(),
                token: self.config.token.clone(),
                body,
            })
            .await?;

        let data = normalize_body(&reply.text);

        if !reply.status.is_success() {
            tracing::error!(
                "[equipment relay] {} {} -> {} {}",
                method,
                url,
                reply.status.as_u16(),
                reply.reason.as_deref().unwrap_or("")
            );
            return Err(AppError::Upstream {
                status: reply.status,
                details: data,
            });
        }

        let status = if method == Method::POST {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };

        Ok(RelayResponse { status, body: data })
    }
}

/// Parse an upstream body as JSON, falling back to `{"rawResponse": text}`.
/// An empty body becomes `{}`.
pub fn normalize_body(text: &str) -> Value {
    if text.is_empty() {
        return json!({});
    }

    serde_json::from_str(text).unwrap_or_else(|_| json!({ "rawResponse": text }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::upstream::{MockUpstream, UpstreamReply};

    fn reply(status: u16, text: &str) -> UpstreamReply {
        let status = StatusCode::from_u16(status).unwrap();
        UpstreamReply {
            status,
            reason: status.canonical_reason().map(str::to_string),
            text: text.to_string(),
        }
    }

    fn service(config: UpstreamConfig, upstream: MockUpstream) -> RelayService {
        RelayService::new(Arc::new(config), Arc::new(upstream))
    }

    fn configured() -> UpstreamConfig {
        UpstreamConfig::new("https://upstream.test/", "equipment", "secret-token")
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body(""), json!({}));
        assert_eq!(normalize_body("[1,2]"), json!([1, 2]));
        assert_eq!(normalize_body("\"text\""), json!("text"));
        assert_eq!(
            normalize_body("<html>502</html>"),
            json!({ "rawResponse": "<html>502</html>" })
        );
    }

    #[tokio::test]
    async fn test_missing_config_makes_no_outbound_call() {
        let cases = [
            UpstreamConfig::default(),
            UpstreamConfig::new("", "equipment", "t"),
            UpstreamConfig::new("https://a", "", "t"),
            UpstreamConfig::new("https://a", "equipment", ""),
        ];

        for config in cases {
            let mut upstream = MockUpstream::new();
            upstream.expect_send().times(0);
            let relay = service(config, upstream);

            assert!(matches!(relay.list().await, Err(AppError::Configuration)));
            assert!(matches!(
                relay.create(json!({ "fullName": "Alice" })).await,
                Err(AppError::Configuration)
            ));
        }
    }

    #[tokio::test]
    async fn test_list_forwards_with_token_and_returns_200() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .withf(|req| {
                req.method == Method::GET
                    && req.url == "https://upstream.test/equipment"
                    && req.token == "secret-token"
                    && req.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(reply(200, r#"[{"fullName":"Alice"}]"#)));

        let response = service(configured(), upstream).list().await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!([{ "fullName": "Alice" }]));
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .withf(|req| {
                req.method == Method::POST
                    && req.body == Some(json!({ "fullName": "Alice", "branch": "HQ" }))
            })
            .times(1)
            .returning(|_| Ok(reply(200, r#"{"id":7}"#)));

        let response = service(configured(), upstream)
            .create(json!({ "fullName": "Alice", "branch": "HQ" }))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, json!({ "id": 7 }));
    }

    #[tokio::test]
    async fn test_create_null_body_sends_empty_object() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .withf(|req| req.body == Some(json!({})))
            .times(1)
            .returning(|_| Ok(reply(201, "")));

        let response = service(configured(), upstream)
            .create(Value::Null)
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, json!({}));
    }

    #[tokio::test]
    async fn test_success_with_plain_text_is_wrapped() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .returning(|_| Ok(reply(200, "OK")));

        let response = service(configured(), upstream).list().await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "rawResponse": "OK" }));
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_status_and_details() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .returning(|_| Ok(reply(503, "unavailable")));

        match service(configured(), upstream).create(json!({})).await {
            Err(AppError::Upstream { status, details }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(details, json!({ "rawResponse": "unavailable" }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_send()
            .returning(|_| Err(AppError::Transport("connection refused".into())));

        match service(configured(), upstream).list().await {
            Err(AppError::Transport(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
