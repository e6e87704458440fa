use crate::response::{ApiError, ApiResponse, api_error, db_error};
use crate::routes::challenges::common::ChallengeResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{lab_challenge, target_code};

/// GET /api/challenges/{challenge_id}
///
/// Fetch a challenge with all of its target codes, ordered by id.
///
/// ### Responses
/// - `200 OK`
/// - `404 Not Found` if the challenge does not exist
pub async fn get_challenge(
    State(app_state): State<AppState>,
    Path(challenge_id): Path<i64>,
) -> Result<Json<ApiResponse<ChallengeResponse>>, ApiError> {
    let db = app_state.db();
    let challenge = lab_challenge::Model::get_by_id(db, challenge_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Challenge not found"))?;

    let mut models = target_code::Model::find_by_challenge(db, challenge_id)
        .await
        .map_err(db_error)?;
    models.sort_by_key(|m| m.id);
    let targets = models
        .iter()
        .map(|m| m.to_domain())
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_error)?;

    Ok(Json(ApiResponse::success(
        ChallengeResponse {
            challenge: challenge.to_domain(),
            targets,
        },
        "Challenge retrieved successfully",
    )))
}
