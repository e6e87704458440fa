use crate::response::{ApiError, ApiResponse, Empty, api_error, db_error};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::assigned_challenge;
use tracing::info;

/// DELETE /api/assignments/{assignment_id}
///
/// Unassign a challenge. The class's attempts and late grants for it are
/// deleted with it; credited ledger totals are left as they are.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found`
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let deleted = assigned_challenge::Model::delete_by_id(app_state.db(), assignment_id)
        .await
        .map_err(db_error)?;
    if !deleted {
        return Err(api_error(StatusCode::NOT_FOUND, "Assignment not found"));
    }

    info!(assignment_id, "Challenge unassigned");
    Ok(Json(ApiResponse::success(Empty, "Assignment removed successfully")))
}
