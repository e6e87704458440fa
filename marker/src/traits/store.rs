//!
//! # Lab Store Trait
//!
//! Persistence seam for the submission service. A store must apply
//! [`LabStore::commit_grade`] atomically: the attempt write and the student's
//! total score update either both happen or neither does.

use crate::error::MarkerError;
use crate::types::{
    AssignedChallengeInfo, AssignmentId, AttemptKey, LateSubmission, StudentId, StudentLabAttempt,
    TargetCode, TargetCodeId,
};
use async_trait::async_trait;

#[async_trait]
pub trait LabStore: Send + Sync {
    /// Loads an assignment with its progress and late-submission maps.
    async fn assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Option<AssignedChallengeInfo>, MarkerError>;

    async fn target_code(
        &self,
        target_code_id: TargetCodeId,
    ) -> Result<Option<TargetCode>, MarkerError>;

    /// Upserts the late-submission state of one slot.
    async fn put_late_submission(
        &self,
        key: &AttemptKey,
        late: &LateSubmission,
    ) -> Result<(), MarkerError>;

    /// Replaces the attempt for `key` and adds `score_delta` to the student's total.
    async fn commit_grade(
        &self,
        key: &AttemptKey,
        attempt: &StudentLabAttempt,
        score_delta: f64,
    ) -> Result<(), MarkerError>;

    /// The student's running total. Unknown students have a total of zero.
    async fn student_total(&self, student_id: StudentId) -> Result<f64, MarkerError>;
}
