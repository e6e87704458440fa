//!
//! # Assessor Trait
//!
//! An assessor reviews student code qualitatively. It is only consulted for
//! failing attempts, and its errors never abort grading.

use crate::error::MarkerError;
use crate::types::AiAssessment;
use async_trait::async_trait;
use util::languages::Language;

#[async_trait]
pub trait Assessor: Send + Sync {
    /// Review `code` and score it on the fixed skill dimensions.
    ///
    /// # Errors
    /// Returns [`MarkerError::AssessmentUnavailable`] when the service cannot
    /// produce a usable review.
    async fn assess(&self, code: &str, language: Language) -> Result<AiAssessment, MarkerError>;
}
