//! [`LabStore`] backed by sea-orm.
//!
//! `commit_grade` writes the attempt and the student's total inside one
//! transaction, so a failure part-way leaves neither change behind.

use crate::models::{
    assigned_challenge, lab_challenge, late_submission_grant, student, student_lab_attempt,
    target_code,
};
use async_trait::async_trait;
use marker::error::MarkerError;
use marker::traits::store::LabStore;
use marker::types::{
    AssignedChallengeInfo, AssignmentId, AttemptKey, LateSubmission, StudentId, StudentLabAttempt,
    TargetCode, TargetCodeId,
};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::error;

fn storage(e: DbErr) -> MarkerError {
    error!(error = %e, "Database operation failed");
    MarkerError::Storage(e.to_string())
}

#[derive(Clone)]
pub struct SeaOrmLabStore {
    db: DatabaseConnection,
}

impl SeaOrmLabStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LabStore for SeaOrmLabStore {
    async fn assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Option<AssignedChallengeInfo>, MarkerError> {
        let Some(assigned) = assigned_challenge::Model::get_by_id(&self.db, assignment_id)
            .await
            .map_err(storage)?
        else {
            return Ok(None);
        };
        let challenge = lab_challenge::Model::get_by_id(&self.db, assigned.challenge_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| {
                MarkerError::NotFound(format!("Lab challenge {}", assigned.challenge_id))
            })?;

        let mut info = AssignedChallengeInfo::new(
            assigned.id,
            assigned.challenge_id,
            assigned.class_id,
            challenge.language.into(),
            assigned.expiry_date,
        );

        let grants = late_submission_grant::Model::find_for_assignment(&self.db, assignment_id)
            .await
            .map_err(storage)?;
        for grant in grants {
            info.late_submissions
                .entry(grant.student_id)
                .or_default()
                .insert(grant.target_code_id, grant.to_domain());
        }

        let attempts = student_lab_attempt::Model::find_for_assignment(&self.db, assignment_id)
            .await
            .map_err(storage)?;
        for row in attempts {
            let late = info.late_submission(row.student_id, row.target_code_id);
            let attempt = row.to_domain(late).map_err(storage)?;
            info.record_attempt(row.student_id, row.target_code_id, attempt);
        }

        Ok(Some(info))
    }

    async fn target_code(
        &self,
        target_code_id: TargetCodeId,
    ) -> Result<Option<TargetCode>, MarkerError> {
        target_code::Model::get_by_id(&self.db, target_code_id)
            .await
            .map_err(storage)?
            .map(|model| model.to_domain().map_err(storage))
            .transpose()
    }

    async fn put_late_submission(
        &self,
        key: &AttemptKey,
        late: &LateSubmission,
    ) -> Result<(), MarkerError> {
        late_submission_grant::Model::upsert(&self.db, key, late)
            .await
            .map_err(storage)
    }

    async fn commit_grade(
        &self,
        key: &AttemptKey,
        attempt: &StudentLabAttempt,
        score_delta: f64,
    ) -> Result<(), MarkerError> {
        let txn = self.db.begin().await.map_err(storage)?;
        student_lab_attempt::Model::upsert(&txn, key, attempt)
            .await
            .map_err(storage)?;
        student::Model::add_to_total(&txn, key.student_id, score_delta)
            .await
            .map_err(storage)?;
        txn.commit().await.map_err(storage)
    }

    async fn student_total(&self, student_id: StudentId) -> Result<f64, MarkerError> {
        student::Model::total_score(&self.db, student_id)
            .await
            .map_err(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::target_code::TargetCodeFields;
    use crate::test_utils::setup_test_db;
    use chrono::Utc;
    use marker::types::{AttemptStatus, LateRequestStatus};
    use util::languages::Language;

    struct Seeded {
        store: SeaOrmLabStore,
        assignment_id: i64,
        target_id: i64,
    }

    async fn seed() -> Seeded {
        let db = setup_test_db().await;
        let challenge = lab_challenge::Model::create(&db, "Lab 4", 4, "Sums", Language::Python)
            .await
            .unwrap();
        let target = target_code::Model::create(
            &db,
            challenge.id,
            TargetCodeFields {
                code: "print(sum(map(int, input().split())))".into(),
                description: "Sum a line".into(),
                enforced_statement: None,
                required_output_similarity: None,
                points: 10.0,
                test_cases: vec!["1 2".into()],
            },
        )
        .await
        .unwrap();
        let assigned = assigned_challenge::Model::create(&db, challenge.id, 7, None)
            .await
            .unwrap();
        Seeded {
            store: SeaOrmLabStore::new(db),
            assignment_id: assigned.id,
            target_id: target.id,
        }
    }

    fn attempt(score: f64, best: f64) -> StudentLabAttempt {
        StudentLabAttempt {
            student_code: "print(3)".into(),
            statement_check: None,
            status: AttemptStatus::Good,
            average_output_similarity: 97,
            score,
            best_score: best,
            completed: true,
            language: Language::Python,
            assessment: Some(marker::testing::sample_assessment()),
            late: LateSubmission::default(),
            graded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_commit_grade_persists_attempt_and_total() {
        let s = seed().await;
        let info = s.store.assignment(s.assignment_id).await.unwrap().unwrap();
        assert_eq!(info.language, Language::Python);
        let key = info.key(21, s.target_id);

        s.store.commit_grade(&key, &attempt(8.73, 8.73), 8.73).await.unwrap();
        s.store.commit_grade(&key, &attempt(9.5, 9.5), 0.77).await.unwrap();

        let info = s.store.assignment(s.assignment_id).await.unwrap().unwrap();
        let stored = info.attempt(21, s.target_id).unwrap();
        assert_eq!(stored.score, 9.5);
        assert_eq!(stored.assessment, Some(marker::testing::sample_assessment()));
        assert_eq!(s.store.student_total(21).await.unwrap(), 9.5);
    }

    #[tokio::test]
    async fn test_late_grants_are_attached_to_attempts() {
        let s = seed().await;
        let key = AttemptKey {
            assignment_id: s.assignment_id,
            student_id: 3,
            target_code_id: s.target_id,
        };
        s.store.commit_grade(&key, &attempt(2.0, 2.0), 2.0).await.unwrap();

        let approved = LateSubmission {
            late_request_status: Some(LateRequestStatus::Approved),
            late_submission_max_score: Some(7.0),
        };
        s.store.put_late_submission(&key, &approved).await.unwrap();

        let info = s.store.assignment(s.assignment_id).await.unwrap().unwrap();
        assert_eq!(info.late_submission(3, s.target_id), approved);
        assert_eq!(info.attempt(3, s.target_id).unwrap().late, approved);
    }

    #[tokio::test]
    async fn test_missing_rows_are_none() {
        let s = seed().await;
        assert!(s.store.assignment(999).await.unwrap().is_none());
        assert!(s.store.target_code(999).await.unwrap().is_none());
        assert_eq!(s.store.student_total(999).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_failed_commit_rolls_back_total() {
        let s = seed().await;
        // No such assignment: the attempt insert violates its foreign key.
        let key = AttemptKey {
            assignment_id: 4242,
            student_id: 5,
            target_code_id: s.target_id,
        };
        let result = s.store.commit_grade(&key, &attempt(5.0, 5.0), 5.0).await;
        assert!(matches!(result, Err(MarkerError::Storage(_))));
        assert_eq!(s.store.student_total(5).await.unwrap(), 0.0);
    }
}
