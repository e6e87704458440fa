//! # Submission Service
//!
//! Entry point used by the HTTP layer. It loads the assignment and target code
//! from a [`LabStore`], runs a [`GradingJob`], and commits the attempt together
//! with the ledger delta.
//!
//! All writes for one student are serialized through a per-student lock, so two
//! concurrent submissions can never both read the same previous attempt and
//! double-credit the ledger.

use crate::error::MarkerError;
use crate::late_submission;
use crate::traits::assessor::Assessor;
use crate::traits::executor::CodeExecutor;
use crate::traits::store::LabStore;
use crate::types::{
    AssignedChallengeInfo, AssignmentId, LateSubmission, StudentId, StudentLabAttempt, TargetCode,
    TargetCodeId,
};
use crate::{GradeOutcome, GradingJob, Submission};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};
use util::languages::Language;

pub struct SubmissionService<S: LabStore> {
    store: Arc<S>,
    executor: Arc<dyn CodeExecutor>,
    assessor: Option<Arc<dyn Assessor>>,
    student_locks: Mutex<HashMap<StudentId, Arc<Mutex<()>>>>,
}

impl<S: LabStore> SubmissionService<S> {
    pub fn new(store: Arc<S>, executor: Arc<dyn CodeExecutor>) -> Self {
        Self {
            store,
            executor,
            assessor: None,
            student_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_assessor(mut self, assessor: Option<Arc<dyn Assessor>>) -> Self {
        self.assessor = assessor;
        self
    }

    /// Runs `work` while holding the student's lock. The lock's map entry is
    /// dropped again once no other task holds or waits on it.
    async fn serialized<T>(&self, student_id: StudentId, work: impl Future<Output = T>) -> T {
        let lock = self
            .student_locks
            .lock()
            .await
            .entry(student_id)
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            work.await
        };

        let mut locks = self.student_locks.lock().await;
        // One reference in the map, one here.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&student_id);
        }
        result
    }

    #[cfg(test)]
    async fn tracked_students(&self) -> usize {
        self.student_locks.lock().await.len()
    }

    /// Loads the assignment and a target code that belongs to its challenge.
    async fn load_slot(
        &self,
        assignment_id: AssignmentId,
        target_code_id: TargetCodeId,
    ) -> Result<(AssignedChallengeInfo, TargetCode), MarkerError> {
        let assignment = self
            .store
            .assignment(assignment_id)
            .await?
            .ok_or_else(|| MarkerError::NotFound(format!("Assignment {assignment_id}")))?;
        let target = self
            .store
            .target_code(target_code_id)
            .await?
            .filter(|t| t.challenge_id == assignment.challenge_id)
            .ok_or_else(|| {
                MarkerError::NotFound(format!(
                    "Target code {target_code_id} in assignment {assignment_id}"
                ))
            })?;
        Ok((assignment, target))
    }

    /// Grades `code` and commits the attempt and ledger delta atomically.
    ///
    /// `language` defaults to the assigned challenge's language.
    #[instrument(skip(self, code, now))]
    pub async fn submit(
        &self,
        assignment_id: AssignmentId,
        target_code_id: TargetCodeId,
        student_id: StudentId,
        code: String,
        language: Option<Language>,
        now: DateTime<Utc>,
    ) -> Result<GradeOutcome, MarkerError> {
        if code.trim().is_empty() {
            return Err(MarkerError::InvalidInput("code must not be empty".to_string()));
        }

        self.serialized(student_id, async move {
            let (mut assignment, target) = self.load_slot(assignment_id, target_code_id).await?;
            let language = language.unwrap_or(assignment.language);

            let mut job = GradingJob::new(self.executor.as_ref());
            if let Some(assessor) = &self.assessor {
                job = job.with_assessor(assessor.as_ref());
            }

            let outcome = job
                .grade(
                    &mut assignment,
                    &target,
                    Submission {
                        student_id,
                        code,
                        language,
                        submitted_at: now,
                    },
                )
                .await?;

            let key = assignment.key(student_id, target_code_id);
            self.store
                .commit_grade(&key, &outcome.attempt, outcome.score_delta)
                .await?;

            Ok::<_, MarkerError>(outcome)
        })
        .await
    }

    #[instrument(skip(self, now))]
    pub async fn request_late(
        &self,
        assignment_id: AssignmentId,
        target_code_id: TargetCodeId,
        student_id: StudentId,
        now: DateTime<Utc>,
    ) -> Result<LateSubmission, MarkerError> {
        self.serialized(student_id, async move {
            let (assignment, _) = self.load_slot(assignment_id, target_code_id).await?;
            let current = assignment.late_submission(student_id, target_code_id);
            let next = late_submission::request_late(&current, assignment.expiry_date, now)?;

            if next != current {
                self.store
                    .put_late_submission(&assignment.key(student_id, target_code_id), &next)
                    .await?;
                info!(assignment_id, target_code_id, student_id, "Late submission requested");
            }
            Ok::<_, MarkerError>(next)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn approve_late(
        &self,
        assignment_id: AssignmentId,
        target_code_id: TargetCodeId,
        student_id: StudentId,
        max_score: Option<f64>,
    ) -> Result<LateSubmission, MarkerError> {
        self.serialized(student_id, async move {
            let (assignment, target) = self.load_slot(assignment_id, target_code_id).await?;
            let current = assignment.late_submission(student_id, target_code_id);
            let next = late_submission::approve_late(&current, max_score, target.points)?;

            self.store
                .put_late_submission(&assignment.key(student_id, target_code_id), &next)
                .await?;
            info!(
                assignment_id,
                target_code_id,
                student_id,
                max_score = next.late_submission_max_score,
                "Late submission approved"
            );
            Ok::<_, MarkerError>(next)
        })
        .await
    }

    pub async fn student_total(&self, student_id: StudentId) -> Result<f64, MarkerError> {
        self.store.student_total(student_id).await
    }

    /// The student's latest attempt per target code in one assignment.
    pub async fn attempts_for(
        &self,
        assignment_id: AssignmentId,
        student_id: StudentId,
    ) -> Result<HashMap<TargetCodeId, StudentLabAttempt>, MarkerError> {
        let assignment = self
            .store
            .assignment(assignment_id)
            .await?
            .ok_or_else(|| MarkerError::NotFound(format!("Assignment {assignment_id}")))?;
        Ok(assignment
            .progress
            .get(&student_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryLabStore;
    use crate::testing::{FailingAssessor, ScriptedExecutor};
    use crate::traits::executor::ExecutionResult;
    use crate::types::{AttemptStatus, LateRequestStatus};
    use chrono::Duration;

    const TARGET_SRC: &str = "print('ok')";

    async fn service(
        expiry: Option<DateTime<Utc>>,
        exec: ScriptedExecutor,
    ) -> SubmissionService<InMemoryLabStore> {
        let store = Arc::new(InMemoryLabStore::new());
        store
            .insert_assignment(AssignedChallengeInfo::new(1, 10, 100, Language::Python, expiry))
            .await;
        store
            .insert_target_code(TargetCode {
                id: 7,
                challenge_id: 10,
                code: TARGET_SRC.to_string(),
                description: "Print ok".to_string(),
                enforced_statement: None,
                required_output_similarity: None,
                points: 10.0,
                test_cases: vec![],
            })
            .await;
        store
            .insert_target_code(TargetCode {
                id: 8,
                challenge_id: 99,
                code: TARGET_SRC.to_string(),
                description: "Other challenge".to_string(),
                enforced_statement: None,
                required_output_similarity: None,
                points: 5.0,
                test_cases: vec![],
            })
            .await;
        SubmissionService::new(store, Arc::new(exec))
    }

    fn exec() -> ScriptedExecutor {
        ScriptedExecutor::new()
            .on(TARGET_SRC, "", ExecutionResult::success("ok"))
            .on("good", "", ExecutionResult::success("ok"))
            .on("half", "", ExecutionResult::success("ok!!xx"))
            .on("bad", "", ExecutionResult::success("zz"))
    }

    #[tokio::test]
    async fn ledger_only_moves_up() {
        let svc = service(None, exec()).await;
        let now = Utc::now();

        let first = svc.submit(1, 7, 5, "half".into(), None, now).await.unwrap();
        assert_eq!(first.attempt.status, AttemptStatus::Fail);
        let after_first = svc.student_total(5).await.unwrap();
        assert_eq!(after_first, first.attempt.score);

        let second = svc.submit(1, 7, 5, "good".into(), None, now).await.unwrap();
        assert_eq!(second.attempt.score, 10.0);
        assert_eq!(svc.student_total(5).await.unwrap(), 10.0);

        let third = svc.submit(1, 7, 5, "bad".into(), None, now).await.unwrap();
        assert_eq!(third.score_delta, 0.0);
        assert_eq!(svc.student_total(5).await.unwrap(), 10.0);

        let attempts = svc.attempts_for(1, 5).await.unwrap();
        assert_eq!(attempts[&7].student_code, "bad");
        assert_eq!(attempts[&7].best_score, 10.0);
    }

    #[tokio::test]
    async fn rejected_submissions_change_nothing() {
        let svc = service(None, exec()).await;
        let err = svc
            .submit(1, 7, 5, "crash".into(), None, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, MarkerError::StudentExecution(_)));
        assert_eq!(svc.student_total(5).await.unwrap(), 0.0);
        assert!(svc.attempts_for(1, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_or_foreign_targets_are_not_found() {
        let svc = service(None, exec()).await;
        let now = Utc::now();
        assert!(matches!(
            svc.submit(2, 7, 5, "good".into(), None, now).await,
            Err(MarkerError::NotFound(_))
        ));
        assert!(matches!(
            svc.submit(1, 8, 5, "good".into(), None, now).await,
            Err(MarkerError::NotFound(_))
        ));
        assert!(matches!(
            svc.submit(1, 7, 5, "   ".into(), None, now).await,
            Err(MarkerError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn late_flow_unlocks_expired_lab() {
        let now = Utc::now();
        let svc = service(Some(now - Duration::days(2)), exec()).await;

        assert!(matches!(
            svc.submit(1, 7, 5, "good".into(), None, now).await,
            Err(MarkerError::LabExpired { .. })
        ));
        assert!(matches!(
            svc.approve_late(1, 7, 5, Some(4.0)).await,
            Err(MarkerError::InvalidLateTransition(_))
        ));

        let requested = svc.request_late(1, 7, 5, now).await.unwrap();
        assert_eq!(requested.late_request_status, Some(LateRequestStatus::Requested));
        assert_eq!(svc.request_late(1, 7, 5, now).await.unwrap(), requested);

        let approved = svc.approve_late(1, 7, 5, Some(4.0)).await.unwrap();
        assert_eq!(approved.late_submission_max_score, Some(4.0));
        assert!(matches!(
            svc.request_late(1, 7, 5, now).await,
            Err(MarkerError::InvalidLateTransition(_))
        ));

        let outcome = svc.submit(1, 7, 5, "good".into(), None, now).await.unwrap();
        assert_eq!(outcome.attempt.score, 4.0);
        assert_eq!(outcome.attempt.late, approved);
        assert_eq!(svc.student_total(5).await.unwrap(), 4.0);
    }

    #[tokio::test]
    async fn late_request_before_expiry_is_rejected() {
        let now = Utc::now();
        let svc = service(Some(now + Duration::days(1)), exec()).await;
        assert!(matches!(
            svc.request_late(1, 7, 5, now).await,
            Err(MarkerError::InvalidLateTransition(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_submissions_credit_once() {
        let svc = Arc::new(service(None, exec()).await);
        let now = Utc::now();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.submit(1, 7, 5, "good".into(), None, now).await })
            })
            .collect();
        let mut credited = 0.0;
        for handle in handles {
            credited += handle.await.unwrap().unwrap().score_delta;
        }

        assert_eq!(credited, 10.0);
        assert_eq!(svc.student_total(5).await.unwrap(), 10.0);
    }

    #[tokio::test]
    async fn student_locks_are_released_after_use() {
        let svc = Arc::new(service(None, exec()).await);
        let now = Utc::now();

        let handles: Vec<_> = (1..=3)
            .map(|student| {
                let svc = Arc::clone(&svc);
                tokio::spawn(async move { svc.submit(1, 7, student, "good".into(), None, now).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        svc.submit(1, 7, 1, "bad".into(), None, now).await.unwrap();
        svc.submit(1, 99, 2, "good".into(), None, now).await.unwrap_err();

        assert_eq!(svc.tracked_students().await, 0);
    }

    #[tokio::test]
    async fn assessor_outage_is_soft() {
        let svc = service(None, exec())
            .await
            .with_assessor(Some(Arc::new(FailingAssessor)));
        let outcome = svc
            .submit(1, 7, 5, "bad".into(), None, Utc::now())
            .await
            .unwrap();
        assert!(outcome.notice.is_some());
        assert_eq!(svc.attempts_for(1, 5).await.unwrap().len(), 1);
    }
}
