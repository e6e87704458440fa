use crate::response::{ApiError, ApiResponse, marker_error};
use crate::routes::assignments::common::AttemptResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /api/assignments/{assignment_id}/students/{student_id}/attempts
///
/// The student's latest attempt for every target code they have submitted to,
/// ordered by target code id. Late-submission state is included per attempt.
pub async fn get_attempts(
    State(app_state): State<AppState>,
    Path((assignment_id, student_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<AttemptResponse>>>, ApiError> {
    let attempts = app_state
        .submissions()
        .attempts_for(assignment_id, student_id)
        .await
        .map_err(marker_error)?;

    let mut attempts: Vec<AttemptResponse> = attempts
        .into_iter()
        .map(|(target_code_id, attempt)| AttemptResponse {
            target_code_id,
            attempt,
        })
        .collect();
    attempts.sort_by_key(|a| a.target_code_id);

    Ok(Json(ApiResponse::success(
        attempts,
        "Attempts retrieved successfully",
    )))
}
