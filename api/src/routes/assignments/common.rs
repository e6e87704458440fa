use chrono::{DateTime, Utc};
use marker::types::{StudentId, StudentLabAttempt, TargetCodeId};
use serde::{Deserialize, Serialize};
use util::languages::Language;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub challenge_id: i64,
    pub class_id: i64,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub challenge_id: i64,
    pub class_id: i64,
    pub expiry_date: Option<String>,
    pub created_at: String,
}

impl From<db::models::assigned_challenge::Model> for AssignmentResponse {
    fn from(model: db::models::assigned_challenge::Model) -> Self {
        Self {
            id: model.id,
            challenge_id: model.challenge_id,
            class_id: model.class_id,
            expiry_date: model.expiry_date.map(|d| d.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmissionRequest {
    pub student_id: StudentId,
    #[validate(length(min = 1, message = "Code must not be empty"))]
    pub code: String,
    /// Defaults to the challenge's language.
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct LateRequest {
    pub student_id: StudentId,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ApproveLateRequest {
    #[validate(range(min = 0.0, message = "Max score must not be negative"))]
    pub max_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub target_code_id: TargetCodeId,
    #[serde(flatten)]
    pub attempt: StudentLabAttempt,
}
