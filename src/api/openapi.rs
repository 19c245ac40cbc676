//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Relay API",
        version = "0.1.0",
        description = "Relay for equipment purchase requests to the upstream records service"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        equipment::list_equipment,
        equipment::create_equipment,
    ),
    components(
        schemas(
            crate::models::EquipmentRequest,
            crate::models::SubmissionPayload,
            crate::models::BankName,
            health::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::UpstreamErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment request relay")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
