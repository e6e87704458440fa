//! In-memory [`LabStore`], used by tests and by the API when no database is wired.

use crate::error::MarkerError;
use crate::ledger::apply_score_delta;
use crate::traits::store::LabStore;
use crate::types::{
    AssignedChallengeInfo, AssignmentId, AttemptKey, LateSubmission, StudentId, StudentLabAttempt,
    TargetCode, TargetCodeId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    assignments: HashMap<AssignmentId, AssignedChallengeInfo>,
    targets: HashMap<TargetCodeId, TargetCode>,
    totals: HashMap<StudentId, f64>,
}

/// All tables sit behind one lock, so a commit is atomic.
#[derive(Default)]
pub struct InMemoryLabStore {
    tables: RwLock<Tables>,
}

impl InMemoryLabStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_assignment(&self, assignment: AssignedChallengeInfo) {
        self.tables
            .write()
            .await
            .assignments
            .insert(assignment.assignment_id, assignment);
    }

    pub async fn insert_target_code(&self, target: TargetCode) {
        self.tables.write().await.targets.insert(target.id, target);
    }
}

#[async_trait]
impl LabStore for InMemoryLabStore {
    async fn assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Option<AssignedChallengeInfo>, MarkerError> {
        Ok(self.tables.read().await.assignments.get(&assignment_id).cloned())
    }

    async fn target_code(
        &self,
        target_code_id: TargetCodeId,
    ) -> Result<Option<TargetCode>, MarkerError> {
        Ok(self.tables.read().await.targets.get(&target_code_id).cloned())
    }

    async fn put_late_submission(
        &self,
        key: &AttemptKey,
        late: &LateSubmission,
    ) -> Result<(), MarkerError> {
        let mut tables = self.tables.write().await;
        let assignment = tables
            .assignments
            .get_mut(&key.assignment_id)
            .ok_or_else(|| MarkerError::NotFound(format!("Assignment {}", key.assignment_id)))?;
        assignment.set_late_submission(key.student_id, key.target_code_id, late.clone());
        Ok(())
    }

    async fn commit_grade(
        &self,
        key: &AttemptKey,
        attempt: &StudentLabAttempt,
        score_delta: f64,
    ) -> Result<(), MarkerError> {
        let mut tables = self.tables.write().await;
        let assignment = tables
            .assignments
            .get_mut(&key.assignment_id)
            .ok_or_else(|| MarkerError::NotFound(format!("Assignment {}", key.assignment_id)))?;
        assignment.record_attempt(key.student_id, key.target_code_id, attempt.clone());

        let total = tables.totals.entry(key.student_id).or_insert(0.0);
        *total = apply_score_delta(*total, score_delta);
        Ok(())
    }

    async fn student_total(&self, student_id: StudentId) -> Result<f64, MarkerError> {
        Ok(self
            .tables
            .read()
            .await
            .totals
            .get(&student_id)
            .copied()
            .unwrap_or(0.0))
    }
}
