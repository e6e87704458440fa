use chrono::{DateTime, Utc};
use marker::types::{AttemptKey, LateRequestStatus, LateSubmission};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "late_submission_grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub target_code_id: i64,
    pub status: GrantStatus,
    pub max_score: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "late_request_status_enum"
)]
pub enum GrantStatus {
    #[sea_orm(string_value = "requested")]
    Requested,
    #[sea_orm(string_value = "approved")]
    Approved,
}

impl From<LateRequestStatus> for GrantStatus {
    fn from(status: LateRequestStatus) -> Self {
        match status {
            LateRequestStatus::Requested => GrantStatus::Requested,
            LateRequestStatus::Approved => GrantStatus::Approved,
        }
    }
}

impl From<GrantStatus> for LateRequestStatus {
    fn from(status: GrantStatus) -> Self {
        match status {
            GrantStatus::Requested => LateRequestStatus::Requested,
            GrantStatus::Approved => LateRequestStatus::Approved,
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
}

impl Related<super::assigned_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedChallenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

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

    /// Writes the late state of one slot. A state without a status removes the row.
    pub async fn upsert<C: ConnectionTrait>(
        conn: &C,
        key: &AttemptKey,
        late: &LateSubmission,
    ) -> Result<(), DbErr> {
        let existing = Self::find_by_key(conn, key).await?;
        let Some(status) = late.late_request_status else {
            if let Some(model) = existing {
                model.delete(conn).await?;
            }
            return Ok(());
        };

        match existing {
            Some(model) => {
                let mut active_model: ActiveModel = model.into();
                active_model.status = Set(status.into());
                active_model.max_score = Set(late.late_submission_max_score);
                active_model.updated_at = Set(Utc::now());
                active_model.update(conn).await?;
            }
            None => {
                ActiveModel {
                    assignment_id: Set(key.assignment_id),
                    student_id: Set(key.student_id),
                    target_code_id: Set(key.target_code_id),
                    status: Set(status.into()),
                    max_score: Set(late.late_submission_max_score),
                    updated_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(conn)
                .await?;
            }
        }
        Ok(())
    }

    pub fn to_domain(&self) -> LateSubmission {
        LateSubmission {
            late_request_status: Some(self.status.into()),
            late_submission_max_score: self.max_score,
        }
    }
}
