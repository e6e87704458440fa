use crate::response::{ApiError, ApiResponse, marker_error};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use marker::types::StudentId;
use serde::Serialize;

/// Routes:
/// - `GET /students/{student_id}/score` → the student's ledger total
pub fn student_routes() -> Router<AppState> {
    Router::new().route("/{student_id}/score", get(get_score))
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub student_id: StudentId,
    pub total_score: f64,
}

/// GET /api/students/{student_id}/score
///
/// Students who never earned credit have a total of 0.
pub async fn get_score(
    State(app_state): State<AppState>,
    Path(student_id): Path<StudentId>,
) -> Result<Json<ApiResponse<ScoreResponse>>, ApiError> {
    let total_score = app_state
        .submissions()
        .student_total(student_id)
        .await
        .map_err(marker_error)?;

    Ok(Json(ApiResponse::success(
        ScoreResponse {
            student_id,
            total_score,
        },
        "Score retrieved successfully",
    )))
}
