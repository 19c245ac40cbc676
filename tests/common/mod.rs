#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    Router,
};
use equipment_relay::{
    api::create_router,
    config::{AppConfig, UpstreamConfig},
    services::Services,
    AppState,
};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token-123";

/// One request as seen by the fake server
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct Shared {
    status: StatusCode,
    reply: String,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

/// HTTP server on an ephemeral port that records every request and
/// answers all of them with the same status and body
pub struct FakeServer {
    pub url: String,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub async fn spawn(status: u16, reply: &str) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            status: StatusCode::from_u16(status).expect("status"),
            reply: reply.to_string(),
            calls: calls.clone(),
        };
        let app = Router::new().fallback(record).with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            url: format!("http://{}", addr),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().expect("lock").clone()
    }
}

async fn record(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    shared.calls.lock().expect("lock").push(Recorded {
        method,
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        accept: header_value(header::ACCEPT),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    (shared.status, shared.reply.clone())
}

/// An address nothing listens on
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}", addr)
}

pub fn relay_router(upstream: UpstreamConfig) -> Router {
    let config = AppConfig {
        upstream: upstream.clone(),
        ..AppConfig::default()
    };
    create_router(AppState::new(config, Services::with_http(upstream)))
}

/// Serve the relay on an ephemeral port, for tests that need a real socket
pub async fn spawn_relay(upstream: UpstreamConfig) -> String {
    let app = relay_router(upstream);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
