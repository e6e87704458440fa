//! Request and response models shared by the challenge and target code routes.

use db::models::target_code::TargetCodeFields;
use marker::types::{EnforcedStatement, LabChallenge, TargetCode};
use serde::{Deserialize, Serialize};
use util::languages::Language;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct TargetCodeRequest {
    #[validate(length(min = 1, message = "Target code must not be empty"))]
    pub code: String,

    #[serde(default)]
    pub description: String,

    pub enforced_statement: Option<EnforcedStatement>,

    #[validate(range(max = 100, message = "Required output similarity must be between 0 and 100"))]
    pub required_output_similarity: Option<u32>,

    #[validate(range(min = 0.0, message = "Points must not be negative"))]
    pub points: f64,

    /// Stdin payloads; omitted or empty means one run with empty input.
    #[serde(default)]
    pub test_cases: Vec<String>,
}

impl From<TargetCodeRequest> for TargetCodeFields {
    fn from(req: TargetCodeRequest) -> Self {
        Self {
            code: req.code,
            description: req.description,
            enforced_statement: req.enforced_statement,
            required_output_similarity: req.required_output_similarity,
            points: req.points,
            test_cases: req.test_cases,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, message = "Lab name is required"))]
    pub lab_name: String,

    #[validate(range(min = 1, message = "Week must be a positive number"))]
    pub week: i32,

    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub language: Language,

    #[serde(default)]
    pub targets: Vec<TargetCodeRequest>,
}

#[derive(Debug, Serialize)]
pub struct ChallengeResponse {
    #[serde(flatten)]
    pub challenge: LabChallenge,
    pub targets: Vec<TargetCode>,
}
