use axum::{Json, http::StatusCode};
use marker::error::MarkerError;
use sea_orm::DbErr;
use serde::Serialize;
use tracing::error;
use validator::ValidationErrors;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Payload of error responses.
#[derive(Serialize, Default)]
pub struct Empty;

/// Error half of every handler's `Result`.
pub type ApiError = (StatusCode, Json<ApiResponse<Empty>>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Joins every field message into a single `400 Bad Request`.
pub fn validation_error(errors: &ValidationErrors) -> ApiError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect::<Vec<_>>()
        .join("; ");
    api_error(StatusCode::BAD_REQUEST, message)
}

/// Maps a grading or late-submission failure onto a status code.
///
/// | Error                     | Status |
/// |---------------------------|--------|
/// | `LabExpired`              | 403    |
/// | `StudentExecution`        | 422    |
/// | `InvalidInput`            | 400    |
/// | `InvalidLateTransition`   | 400    |
/// | `NotFound`                | 404    |
/// | `ExecutionService`        | 502    |
/// | `AssessmentUnavailable`   | 502    |
/// | `LabMisconfigured`        | 500    |
/// | `Storage`                 | 500    |
pub fn marker_error(err: MarkerError) -> ApiError {
    let status = match &err {
        MarkerError::LabExpired { .. } => StatusCode::FORBIDDEN,
        MarkerError::StudentExecution(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MarkerError::InvalidInput(_) | MarkerError::InvalidLateTransition(_) => {
            StatusCode::BAD_REQUEST
        }
        MarkerError::NotFound(_) => StatusCode::NOT_FOUND,
        MarkerError::ExecutionService(_) | MarkerError::AssessmentUnavailable(_) => {
            StatusCode::BAD_GATEWAY
        }
        MarkerError::LabMisconfigured(_) | MarkerError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }
    api_error(status, err.to_string())
}

pub fn db_error(err: DbErr) -> ApiError {
    match err {
        DbErr::RecordNotFound(message) => api_error(StatusCode::NOT_FOUND, message),
        other => {
            error!(error = %other, "Database error");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {other}"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use marker::traits::executor::ExecutionFailure;

    #[test]
    fn rejections_map_to_client_facing_statuses() {
        let (status, _) = marker_error(MarkerError::LabExpired {
            expired_at: Utc::now(),
        });
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, Json(body)) = marker_error(MarkerError::StudentExecution(
            ExecutionFailure::Compile("expected ';'".to_string()),
        ));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!body.success);
    }

    #[test]
    fn misconfigured_lab_is_a_server_error() {
        let (status, Json(body)) =
            marker_error(MarkerError::LabMisconfigured("segfault".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.message.contains("misconfigured"));
    }

    #[test]
    fn record_not_found_is_404() {
        let (status, _) = db_error(DbErr::RecordNotFound("Target code not found".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
