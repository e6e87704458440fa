use crate::response::{ApiError, ApiResponse, marker_error, validation_error};
use crate::routes::assignments::common::ApproveLateRequest;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use marker::types::LateSubmission;
use validator::Validate;

/// PUT /api/assignments/{assignment_id}/targets/{target_code_id}/late-requests/{student_id}/approve
///
/// A lecturer approves a pending late request. `max_score` caps what the late
/// attempt can earn; omitted means the target code's full points. Approving an
/// already approved request replaces the cap.
///
/// ### Request Body
/// ```json
/// { "max_score": 5 }
/// ```
///
/// ### Responses
/// - `200 OK` with the late-submission state
/// - `400 Bad Request` nothing was requested, or `max_score` is negative
/// - `404 Not Found` unknown assignment or target code
pub async fn approve_late(
    State(app_state): State<AppState>,
    Path((assignment_id, target_code_id, student_id)): Path<(i64, i64, i64)>,
    Json(req): Json<ApproveLateRequest>,
) -> Result<Json<ApiResponse<LateSubmission>>, ApiError> {
    req.validate().map_err(|e| validation_error(&e))?;

    let late = app_state
        .submissions()
        .approve_late(assignment_id, target_code_id, student_id, req.max_score)
        .await
        .map_err(marker_error)?;

    Ok(Json(ApiResponse::success(late, "Late submission approved")))
}
