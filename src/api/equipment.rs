//! Equipment relay endpoints

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::{error::AppResult, AppState};

/// List equipment requests from the upstream service
#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "Upstream body, passed through", body = Object),
        (status = 500, description = "Configuration or transport error", body = crate::error::ErrorResponse),
        (status = "default", description = "Upstream failure", body = crate::error::UpstreamErrorResponse)
    )
)]
pub async fn list_equipment(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Value>)> {
    let response = state.services.relay.list().await?;
    Ok((response.status, Json(response.body)))
}

/// Submit an equipment request to the upstream service
///
/// The body is parsed by hand so malformed JSON yields the relay's own
/// 500 error body rather than the extractor's rejection.
#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "equipment",
    request_body = crate::models::SubmissionPayload,
    responses(
        (status = 201, description = "Upstream body, passed through", body = Object),
        (status = 500, description = "Configuration, transport or body error", body = crate::error::ErrorResponse),
        (status = "default", description = "Upstream failure", body = crate::error::UpstreamErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Value>)> {
    let payload: Value = serde_json::from_slice(&body)?;
    let response = state.services.relay.create(payload).await?;
    Ok((response.status, Json(response.body)))
}
