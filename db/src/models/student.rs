use chrono::{DateTime, Utc};
use marker::ledger::apply_score_delta;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// A student's running total across every lab.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    #[sea_orm(column_type = "Double")]
    pub total_score: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Zero for students that have never been credited.
    pub async fn total_score<C: ConnectionTrait>(conn: &C, id: i64) -> Result<f64, DbErr> {
        Ok(Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(|s| s.total_score)
            .unwrap_or(0.0))
    }

    /// Adds a non-negative delta, creating the row on first credit.
    pub async fn add_to_total<C: ConnectionTrait>(
        conn: &C,
        id: i64,
        delta: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        match Entity::find_by_id(id).one(conn).await? {
            Some(existing) => {
                let total = apply_score_delta(existing.total_score, delta);
                let mut active_model: ActiveModel = existing.into();
                active_model.total_score = Set(total);
                active_model.updated_at = Set(now);
                active_model.update(conn).await
            }
            None => {
                ActiveModel {
                    id: Set(id),
                    total_score: Set(apply_score_delta(0.0, delta)),
                    updated_at: Set(now),
                }
                .insert(conn)
                .await
            }
        }
    }
}
