//! Route handlers for the planning API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::schema::TrajectoryStep;

use super::error::{ApiError, ApiErrorResponse};
use super::AppState;

/// Request body for the /api/plan endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlanRequest {
    /// Base64-encoded workspace snapshot, optionally data-URL-prefixed.
    pub image: String,
    /// Natural-language instruction for the arm.
    pub instruction: String,
}

/// Response for the /api/plan endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlanResponse {
    pub success: bool,
    pub trajectory: Vec<TrajectoryStep>,
}

/// Handle the /api/plan POST endpoint.
///
/// Runs the full pipeline: prompt construction, planner call, parse and
/// validation. Any failure surfaces as the uniform error envelope.
#[utoipa::path(
    post,
    path = "/api/plan",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Validated trajectory plan", body = PlanResponse),
        (status = 400, description = "Missing or empty image/instruction", body = ApiErrorResponse),
        (status = 502, description = "External planner transport failure", body = ApiErrorResponse),
        (status = 500, description = "Planner output unusable or misconfiguration", body = ApiErrorResponse),
    )
)]
pub async fn plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = state
        .pipeline
        .plan(&request.image, &request.instruction)
        .await?;
    Ok(Json(PlanResponse {
        success: true,
        trajectory: plan.steps,
    }))
}

/// Handle the /health GET endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(plan, health),
    components(schemas(PlanRequest, PlanResponse, ApiErrorResponse))
)]
pub struct ApiDoc;

/// Handle the /openapi.json GET endpoint.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
