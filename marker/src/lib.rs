//! # Marker Library
//!
//! This crate grades lab submissions. A submission is executed against every
//! test case of a lecturer's reference solution (the *target code*), the outputs
//! are compared by edit-distance similarity, an optional required statement is
//! searched for, and the result becomes a status, a score and a ledger delta.
//!
//! ## Key Concepts
//! - **GradingJob**: grades one submission against one target code.
//! - **SubmissionService**: serializes grading per student and commits results
//!   through a [`LabStore`](traits::store::LabStore).
//! - **Executors and assessors**: external services behind traits, so tests can
//!   script them (see the `testing` module).

pub mod comparators;
pub mod detectors;
pub mod error;
pub mod feedback;
pub mod late_submission;
pub mod ledger;
pub mod runner;
pub mod scorer;
pub mod store;
pub mod submission;
pub mod traits;
pub mod types;
pub mod utilities;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use crate::detectors::check_statement;
use crate::error::MarkerError;
use crate::runner::{OutputComparison, run_against_targets};
use crate::traits::assessor::Assessor;
use crate::traits::executor::CodeExecutor;
use crate::types::{
    AssignedChallengeInfo, StatementCheck, StudentId, StudentLabAttempt, TargetCode,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use util::languages::Language;

/// Shown to the student when the AI review could not be produced.
pub const ASSESSMENT_UNAVAILABLE_NOTICE: &str =
    "AI feedback is unavailable right now; your attempt was still graded.";

/// One student's code, as submitted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub student_id: StudentId,
    pub code: String,
    pub language: Language,
    pub submitted_at: DateTime<Utc>,
}

/// Everything a successful grading call produced.
#[derive(Debug, Clone, Serialize)]
pub struct GradeOutcome {
    pub attempt: StudentLabAttempt,
    pub comparison: OutputComparison,
    /// Amount added to the student's total score. Never negative.
    pub score_delta: f64,
    /// Soft, non-fatal message for the student.
    pub notice: Option<String>,
}

/// Grades a single submission against a single target code.
///
/// The job borrows its collaborators; the caller owns persistence. On success
/// the new attempt is already recorded in the assignment passed to
/// [`GradingJob::grade`]. On error the assignment is left untouched.
pub struct GradingJob<'a> {
    executor: &'a dyn CodeExecutor,
    assessor: Option<&'a dyn Assessor>,
}

impl<'a> GradingJob<'a> {
    pub fn new(executor: &'a dyn CodeExecutor) -> Self {
        Self {
            executor,
            assessor: None,
        }
    }

    /// Enable AI review of failing attempts.
    pub fn with_assessor(mut self, assessor: &'a dyn Assessor) -> Self {
        self.assessor = Some(assessor);
        self
    }

    /// Run the grading pipeline.
    ///
    /// # Steps
    /// 1. Reject if the lab has expired, unless this slot was already completed
    ///    or a late submission was approved.
    /// 2. Check the enforced statement, if any.
    /// 3. Execute and compare outputs over every test case.
    /// 4. Decide the status from the pass threshold and the statement check.
    /// 5. Ask for an AI review when the attempt failed and the language is supported.
    /// 6. Score against the late cap or the target's points, then record the attempt.
    ///
    /// # Errors
    /// [`MarkerError::LabExpired`], [`MarkerError::StudentExecution`],
    /// [`MarkerError::LabMisconfigured`] or [`MarkerError::ExecutionService`].
    /// AI assessment failures never surface as errors.
    pub async fn grade(
        &self,
        assignment: &mut AssignedChallengeInfo,
        target: &TargetCode,
        submission: Submission,
    ) -> Result<GradeOutcome, MarkerError> {
        let student_id = submission.student_id;
        let previous = assignment.attempt(student_id, target.id).cloned();
        let late = assignment.late_submission(student_id, target.id);

        let already_completed = previous.as_ref().is_some_and(|p| p.completed);
        if let Some(expired_at) = assignment.expiry_date {
            if assignment.is_expired(submission.submitted_at)
                && !already_completed
                && !late.is_approved()
            {
                info!(
                    assignment_id = assignment.assignment_id,
                    student_id,
                    target_code_id = target.id,
                    "Rejected submission to expired lab"
                );
                return Err(MarkerError::LabExpired { expired_at });
            }
        }

        let statement_check = target
            .enforced_statement
            .as_ref()
            .map(|required| StatementCheck {
                required: required.clone(),
                found: check_statement(&submission.code, required, submission.language),
            });

        let comparison = run_against_targets(
            self.executor,
            &submission.code,
            &target.code,
            &target.test_cases,
            submission.language,
        )
        .await?;
        let similarity = comparison.average_similarity;

        let threshold = scorer::pass_threshold(target, submission.language);
        let meets = scorer::meets_requirements(similarity, threshold, statement_check.as_ref());
        let status = scorer::classify(similarity, meets);

        let mut notice = None;
        let mut assessment = None;
        if !meets && submission.language.is_assessable() {
            if let Some(assessor) = self.assessor {
                match assessor.assess(&submission.code, submission.language).await {
                    Ok(review) => assessment = Some(review),
                    Err(e) => {
                        warn!(student_id, target_code_id = target.id, error = %e, "AI assessment failed");
                        notice = Some(ASSESSMENT_UNAVAILABLE_NOTICE.to_string());
                    }
                }
            }
        }

        let max_points = late.late_submission_max_score.unwrap_or(target.points);
        let score = scorer::compute_score(similarity, max_points, status);
        let score_delta = ledger::score_delta(previous.as_ref(), score);

        let attempt = StudentLabAttempt {
            student_code: submission.code,
            statement_check,
            status,
            average_output_similarity: similarity,
            score,
            best_score: ledger::best_score_after(previous.as_ref(), score),
            completed: status.is_completed(),
            language: submission.language,
            assessment,
            late,
            graded_at: submission.submitted_at,
        };
        assignment.record_attempt(student_id, target.id, attempt.clone());

        info!(
            assignment_id = assignment.assignment_id,
            student_id,
            target_code_id = target.id,
            %status,
            similarity,
            score,
            score_delta,
            "Graded submission"
        );

        Ok(GradeOutcome {
            attempt,
            comparison,
            score_delta,
            notice,
        })
    }
}
