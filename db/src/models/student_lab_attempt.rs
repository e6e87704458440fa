use chrono::{DateTime, Utc};
use marker::types::{AttemptKey, LateSubmission, StatementCheck};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Latest graded attempt for one (assignment, student, target code) slot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_lab_attempts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub target_code_id: i64,
    #[sea_orm(column_type = "Text")]
    pub student_code: String,
    pub required_statement: Option<String>,
    pub statement_found: Option<bool>,
    pub status: AttemptStatus,
    pub average_output_similarity: i32,
    #[sea_orm(column_type = "Double")]
    pub score: f64,
    #[sea_orm(column_type = "Double")]
    pub best_score: f64,
    pub completed: bool,
    pub language: String,
    pub assessment: Option<Json>,
    pub graded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attempt_status_enum")]
pub enum AttemptStatus {
    #[sea_orm(string_value = "well-done")]
    WellDone,
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "fail")]
    Fail,
}

impl From<marker::types::AttemptStatus> for AttemptStatus {
    fn from(status: marker::types::AttemptStatus) -> Self {
        match status {
            marker::types::AttemptStatus::WellDone => AttemptStatus::WellDone,
            marker::types::AttemptStatus::Good => AttemptStatus::Good,
            marker::types::AttemptStatus::Fail => AttemptStatus::Fail,
        }
    }
}

impl From<AttemptStatus> for marker::types::AttemptStatus {
    fn from(status: AttemptStatus) -> Self {
        match status {
            AttemptStatus::WellDone => marker::types::AttemptStatus::WellDone,
            AttemptStatus::Good => marker::types::AttemptStatus::Good,
            AttemptStatus::Fail => marker::types::AttemptStatus::Fail,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assigned_challenge::Entity",
        from = "Column::AssignmentId",
        to = "super::assigned_challenge::Column::Id"
    )]
    AssignedChallenge,
    #[sea_orm(
        belongs_to = "super::target_code::Entity",
        from = "Column::TargetCodeId",
        to = "super::target_code::Column::Id"
    )]
    TargetCode,
}

impl Related<super::assigned_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedChallenge.def()
    }
}

impl Related<super::target_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn fill(
    active_model: &mut ActiveModel,
    attempt: &marker::types::StudentLabAttempt,
) -> Result<(), DbErr> {
    let assessment = attempt
        .assessment
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    active_model.student_code = Set(attempt.student_code.clone());
    active_model.required_statement = Set(attempt
        .statement_check
        .as_ref()
        .map(|c| c.required.to_string()));
    active_model.statement_found = Set(attempt.statement_check.as_ref().map(|c| c.found));
    active_model.status = Set(attempt.status.into());
    active_model.average_output_similarity = Set(attempt.average_output_similarity as i32);
    active_model.score = Set(attempt.score);
    active_model.best_score = Set(attempt.best_score);
    active_model.completed = Set(attempt.completed);
    active_model.language = Set(attempt.language.to_string());
    active_model.assessment = Set(assessment);
    active_model.graded_at = Set(attempt.graded_at);
    Ok(())
}

impl Model {
    pub async fn find_by_key<C: ConnectionTrait>(
        conn: &C,
        key: &AttemptKey,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(key.assignment_id))
            .filter(Column::StudentId.eq(key.student_id))
            .filter(Column::TargetCodeId.eq(key.target_code_id))
            .one(conn)
            .await
    }

    pub async fn find_for_assignment<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .all(conn)
            .await
    }

    /// Replaces the slot's attempt, inserting it on first submission.
    pub async fn upsert<C: ConnectionTrait>(
        conn: &C,
        key: &AttemptKey,
        attempt: &marker::types::StudentLabAttempt,
    ) -> Result<Model, DbErr> {
        match Self::find_by_key(conn, key).await? {
            Some(existing) => {
                let mut active_model: ActiveModel = existing.into();
                fill(&mut active_model, attempt)?;
                active_model.update(conn).await
            }
            None => {
                let mut active_model = ActiveModel {
                    assignment_id: Set(key.assignment_id),
                    student_id: Set(key.student_id),
                    target_code_id: Set(key.target_code_id),
                    ..Default::default()
                };
                fill(&mut active_model, attempt)?;
                active_model.insert(conn).await
            }
        }
    }

    /// Rebuilds the domain attempt. Late state lives in its own table and is passed in.
    pub fn to_domain(
        &self,
        late: LateSubmission,
    ) -> Result<marker::types::StudentLabAttempt, DbErr> {
        let statement_check = match (&self.required_statement, self.statement_found) {
            (Some(required), Some(found)) => Some(StatementCheck {
                required: required.parse().map_err(DbErr::Custom)?,
                found,
            }),
            _ => None,
        };
        let assessment = self
            .assessment
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| DbErr::Custom(format!("Corrupt assessment on attempt {}: {e}", self.id)))?;

        Ok(marker::types::StudentLabAttempt {
            student_code: self.student_code.clone(),
            statement_check,
            status: self.status.into(),
            average_output_similarity: self.average_output_similarity.max(0) as u32,
            score: self.score,
            best_score: self.best_score,
            completed: self.completed,
            language: self.language.parse().map_err(DbErr::Custom)?,
            assessment,
            late,
            graded_at: self.graded_at,
        })
    }
}
