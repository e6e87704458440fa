use crate::response::{ApiError, ApiResponse, db_error, validation_error};
use crate::routes::challenges::common::TargetCodeRequest;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::put,
};
use db::models::target_code;
use marker::types::TargetCode;
use tracing::info;
use validator::Validate;

/// Routes:
/// - `PUT /targets/{target_code_id}` → replace a target code's editable fields
pub fn target_routes() -> Router<AppState> {
    Router::new().route("/{target_code_id}", put(edit_target))
}

/// PUT /api/targets/{target_code_id}
///
/// Replaces the code, description, enforced statement, threshold, points and
/// test cases of a target code. Existing attempts keep the score they were
/// graded with.
///
/// ### Responses
/// - `200 OK` with the updated target code
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` if the target code does not exist
pub async fn edit_target(
    State(app_state): State<AppState>,
    Path(target_code_id): Path<i64>,
    Json(req): Json<TargetCodeRequest>,
) -> Result<Json<ApiResponse<TargetCode>>, ApiError> {
    req.validate().map_err(|e| validation_error(&e))?;

    let model = target_code::Model::edit(app_state.db(), target_code_id, req.into())
        .await
        .map_err(db_error)?;
    info!(target_code_id, "Target code updated");

    Ok(Json(ApiResponse::success(
        model.to_domain().map_err(db_error)?,
        "Target code updated successfully",
    )))
}
