use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::PlanError;

/// Standardised API error response body.
///
/// Every error returned by the HTTP layer serialises as:
/// ```json
/// { "error": "<classification>", "details": "<diagnostic>" }
/// ```
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    pub details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse {
                error: error.into(),
                details: details.into(),
            },
        }
    }

    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid request", details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<PlanError> for ApiError {
    fn from(err: PlanError) -> Self {
        let details = err.to_string();
        match err {
            PlanError::Input(_) => Self::new(StatusCode::BAD_REQUEST, "invalid request", details),
            PlanError::ExternalService { .. } => {
                Self::new(StatusCode::BAD_GATEWAY, "planner unavailable", details)
            }
            PlanError::Configuration(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "misconfigured", details)
            }
            PlanError::EmptyResponse(_) | PlanError::Parse(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unusable planner output",
                details,
            ),
            PlanError::SchemaValidation(_) | PlanError::EmptyPlan => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "invalid trajectory",
                details,
            ),
        }
    }
}
