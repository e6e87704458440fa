//! Assignment creation and grading routes.

use crate::response::{ApiError, ApiResponse, api_error, db_error, marker_error, validation_error};
use crate::routes::assignments::common::{
    AssignmentResponse, CreateAssignmentRequest, LateRequest, SubmissionRequest,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use db::models::{assigned_challenge, lab_challenge};
use marker::GradeOutcome;
use marker::types::LateSubmission;
use tracing::info;
use validator::Validate;

/// POST /api/assignments
///
/// Assign a challenge to a class, optionally with an expiry date.
///
/// ### Request Body
/// ```json
/// {
///   "challenge_id": 1,
///   "class_id": 7,
///   "expiry_date": "2025-10-31T23:59:59Z"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `404 Not Found` if the challenge does not exist
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AssignmentResponse>>), ApiError> {
    let db = app_state.db();
    if lab_challenge::Model::get_by_id(db, req.challenge_id)
        .await
        .map_err(db_error)?
        .is_none()
    {
        return Err(api_error(StatusCode::NOT_FOUND, "Challenge not found"));
    }

    let model =
        assigned_challenge::Model::create(db, req.challenge_id, req.class_id, req.expiry_date)
            .await
            .map_err(db_error)?;
    info!(
        assignment_id = model.id,
        challenge_id = model.challenge_id,
        class_id = model.class_id,
        "Challenge assigned"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            AssignmentResponse::from(model),
            "Challenge assigned successfully",
        )),
    ))
}

/// POST /api/assignments/{assignment_id}/targets/{target_code_id}/submissions
///
/// Grade a student's code against one target code and record the attempt.
///
/// ### Request Body
/// ```json
/// {
///   "student_id": 42,
///   "code": "print(sum(int(x) for x in input().split()))",
///   "language": "python"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` with the graded attempt, the per-case comparison, the amount
///   credited to the student's total and an optional notice
/// ```json
/// {
///   "success": true,
///   "data": {
///     "attempt": { "status": "good", "score": 9.0, "completed": true, ... },
///     "comparison": { "mode": "execution", "average_similarity": 97, "cases": [...] },
///     "score_delta": 9.0,
///     "notice": null
///   },
///   "message": "Submission graded"
/// }
/// ```
///
/// - `400 Bad Request` empty code
/// - `403 Forbidden` lab expired with no approved late submission
/// - `404 Not Found` unknown assignment or target code
/// - `422 Unprocessable Entity` the student's code failed to compile or run
/// - `500 Internal Server Error` the reference solution itself failed
/// - `502 Bad Gateway` the execution service could not be reached
pub async fn submit(
    State(app_state): State<AppState>,
    Path((assignment_id, target_code_id)): Path<(i64, i64)>,
    Json(req): Json<SubmissionRequest>,
) -> Result<Json<ApiResponse<GradeOutcome>>, ApiError> {
    req.validate().map_err(|e| validation_error(&e))?;

    let outcome = app_state
        .submissions()
        .submit(
            assignment_id,
            target_code_id,
            req.student_id,
            req.code,
            req.language,
            Utc::now(),
        )
        .await
        .map_err(marker_error)?;

    Ok(Json(ApiResponse::success(outcome, "Submission graded")))
}

/// POST /api/assignments/{assignment_id}/targets/{target_code_id}/late-requests
///
/// A student asks to submit after the deadline. Only allowed once the lab has
/// expired; asking again while a request is pending is a no-op.
///
/// ### Responses
/// - `200 OK` with the late-submission state
/// - `400 Bad Request` lab not expired yet, or already approved
/// - `404 Not Found` unknown assignment or target code
pub async fn request_late(
    State(app_state): State<AppState>,
    Path((assignment_id, target_code_id)): Path<(i64, i64)>,
    Json(req): Json<LateRequest>,
) -> Result<Json<ApiResponse<LateSubmission>>, ApiError> {
    let late = app_state
        .submissions()
        .request_late(assignment_id, target_code_id, req.student_id, Utc::now())
        .await
        .map_err(marker_error)?;

    Ok(Json(ApiResponse::success(late, "Late submission requested")))
}
