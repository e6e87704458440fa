use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A lab challenge handed out to one class, with an optional deadline.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assigned_challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub challenge_id: i64,
    pub class_id: i64,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lab_challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::lab_challenge::Column::Id"
    )]
    LabChallenge,
    #[sea_orm(has_many = "super::student_lab_attempt::Entity")]
    StudentLabAttempt,
    #[sea_orm(has_many = "super::late_submission_grant::Entity")]
    LateSubmissionGrant,
}

impl Related<super::lab_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabChallenge.def()
    }
}

impl Related<super::student_lab_attempt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentLabAttempt.def()
    }
}

impl Related<super::late_submission_grant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LateSubmissionGrant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        challenge_id: i64,
        class_id: i64,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Result<Model, DbErr> {
        ActiveModel {
            challenge_id: Set(challenge_id),
            class_id: Set(class_id),
            expiry_date: Set(expiry_date),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Deletes the assignment; attempts and late grants cascade with it.
    pub async fn delete_by_id(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}
