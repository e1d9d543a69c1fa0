pub mod api;
pub mod station;
pub mod validation;

pub use api::ApiError;
pub use station::StationError;
pub use validation::{FieldError, ValidationError};

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::StationError(e) => {
                let severity = match e {
                    // Not-found is a warning-grade outcome, not a hard failure.
                    StationError::NotFound => "warning",
                    StationError::HasReadings => "error",
                };
                let status = e.status_code();
                (
                    status,
                    json!({
                        "error": {
                            "code": status.as_u16(),
                            "severity": severity,
                            "message": e.to_string(),
                        }
                    }),
                )
            }
            ApiError::ValidationError(e) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                (
                    status,
                    json!({
                        "error": {
                            "code": status.as_u16(),
                            "severity": "error",
                            "message": e.to_string(),
                            "fields": e.errors,
                        }
                    }),
                )
            }
            ApiError::DatabaseError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": {
                            "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                            "severity": "error",
                            "message": "Internal server error",
                            "error_id": error_id.to_string(),
                        }
                    }),
                )
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": {
                            "code": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                            "severity": "error",
                            "message": "Internal server error",
                            "error_id": error_id.to_string(),
                        }
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
