//! HTTP client the form uses to reach the relay

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    client::autocomplete::NameAutocomplete, config::ClientConfig, models::SubmissionPayload,
};

const EQUIPMENT_PATH: &str = "/api/equipment";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to relay failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay answered {0}")]
    Status(StatusCode),
}

/// Result of a load-time fetch. Failures carry their reason instead of
/// being swallowed, so callers decide what an empty list means.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Loaded(T),
    Failed(String),
}

impl<T: Default> FetchOutcome<T> {
    pub fn into_data_or_default(self) -> T {
        match self {
            FetchOutcome::Loaded(data) => data,
            FetchOutcome::Failed(_) => T::default(),
        }
    }
}

impl<T> FetchOutcome<T> {
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchOutcome::Loaded(_) => None,
            FetchOutcome::Failed(reason) => Some(reason),
        }
    }
}

/// Result of posting the form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Relay accepted the request; body as returned by upstream
    Submitted(Value),
    /// Relay answered with an error body
    Rejected { status: StatusCode, message: String },
    /// No usable answer from the relay
    Failed(String),
    /// Required or malformed fields; nothing was sent
    Invalid(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }

    /// The single blocking message shown to the user
    pub fn alert_message(&self) -> String {
        match self {
            SubmitOutcome::Submitted(_) => "Request submitted successfully!".to_string(),
            SubmitOutcome::Rejected { message, .. } => format!("Submission failed: {}", message),
            SubmitOutcome::Failed(_) => {
                "An error occurred. Please check the console and try again.".to_string()
            }
            SubmitOutcome::Invalid(_) => "Please fill out all required fields.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.relay_url.clone())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, EQUIPMENT_PATH)
    }

    async fn get_records(&self) -> Result<Value, ClientError> {
        let response = self.client.get(self.endpoint()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Records for the list view; a single object becomes a one-item list
    pub async fn fetch_equipment_list(&self) -> FetchOutcome<Vec<Value>> {
        match self.get_records().await {
            Ok(Value::Array(records)) => FetchOutcome::Loaded(records),
            Ok(record) => FetchOutcome::Loaded(vec![record]),
            Err(e) => {
                tracing::warn!("Failed to fetch equipment data: {}", e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Distinct full names from previous requests, for autocomplete
    pub async fn fetch_known_names(&self) -> FetchOutcome<NameAutocomplete> {
        match self.get_records().await {
            Ok(records) => FetchOutcome::Loaded(NameAutocomplete::from_records(&records)),
            Err(e) => {
                tracing::debug!("Failed to fetch names: {}", e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    pub async fn submit(&self, payload: &SubmissionPayload) -> SubmitOutcome {
        tracing::info!("Submitting to relay: {:?}", payload);

        let response = match self.client.post(self.endpoint()).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("An error occurred during submission: {}", e);
                return SubmitOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return SubmitOutcome::Failed(e.to_string()),
        };

        if status.is_success() {
            return SubmitOutcome::Submitted(serde_json::from_str(&text).unwrap_or(Value::Null));
        }

        match serde_json::from_str::<Value>(&text) {
            // a `null` error body has no fields to read a message from
            Ok(Value::Null) => {
                tracing::error!("An error occurred during submission: empty error body");
                SubmitOutcome::Failed("Relay returned a null error body".to_string())
            }
            Ok(body) => SubmitOutcome::Rejected {
                status,
                message: rejection_message(&body),
            },
            Err(e) => {
                tracing::error!("An error occurred during submission: {}", e);
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}

/// `message`, then `error`, then a generic fallback
fn rejection_message(body: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|msg| !msg.is_empty())
        .unwrap_or("Unknown error")
        .to_string()
}
