//! Challenge and target code creation routes.

use crate::response::{ApiError, ApiResponse, api_error, db_error, validation_error};
use crate::routes::challenges::common::{
    ChallengeResponse, CreateChallengeRequest, TargetCodeRequest,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use db::models::{lab_challenge, target_code};
use marker::types::TargetCode;
use tracing::info;
use validator::Validate;

/// POST /api/challenges
///
/// Create a lab challenge (one week of a lab) together with its target codes.
///
/// ### Request Body
/// ```json
/// {
///   "lab_name": "COS132 Practicals",
///   "week": 3,
///   "title": "Loops",
///   "language": "cpp",
///   "targets": [
///     {
///       "code": "#include <iostream>\nint main(){ for(int i=0;i<3;i++) std::cout<<i; }",
///       "description": "Print 0 to 2",
///       "enforced_statement": "for",
///       "required_output_similarity": 95,
///       "points": 10,
///       "test_cases": [""]
///     }
///   ]
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the challenge and its target codes
/// - `400 Bad Request` when any field fails validation
/// - `500 Internal Server Error` on database failure
pub async fn create_challenge(
    State(app_state): State<AppState>,
    Json(req): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ChallengeResponse>>), ApiError> {
    req.validate().map_err(|e| validation_error(&e))?;
    for target in &req.targets {
        target.validate().map_err(|e| validation_error(&e))?;
    }

    let db = app_state.db();
    let challenge =
        lab_challenge::Model::create(db, &req.lab_name, req.week, &req.title, req.language)
            .await
            .map_err(db_error)?;

    let mut targets = Vec::with_capacity(req.targets.len());
    for target in req.targets {
        let model = target_code::Model::create(db, challenge.id, target.into())
            .await
            .map_err(db_error)?;
        targets.push(model.to_domain().map_err(db_error)?);
    }

    info!(
        challenge_id = challenge.id,
        week = challenge.week,
        targets = targets.len(),
        "Lab challenge created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            ChallengeResponse {
                challenge: challenge.to_domain(),
                targets,
            },
            "Challenge created successfully",
        )),
    ))
}

/// POST /api/challenges/{challenge_id}/targets
///
/// Add one target code to an existing challenge. The body has the same shape
/// as one entry of `targets` in `POST /api/challenges`.
///
/// ### Responses
/// - `201 Created` with the new target code
/// - `400 Bad Request` on validation failure
/// - `404 Not Found` if the challenge does not exist
pub async fn add_target(
    State(app_state): State<AppState>,
    Path(challenge_id): Path<i64>,
    Json(req): Json<TargetCodeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TargetCode>>), ApiError> {
    req.validate().map_err(|e| validation_error(&e))?;

    let db = app_state.db();
    if lab_challenge::Model::get_by_id(db, challenge_id)
        .await
        .map_err(db_error)?
        .is_none()
    {
        return Err(api_error(StatusCode::NOT_FOUND, "Challenge not found"));
    }

    let model = target_code::Model::create(db, challenge_id, req.into())
        .await
        .map_err(db_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            model.to_domain().map_err(db_error)?,
            "Target code created successfully",
        )),
    ))
}
