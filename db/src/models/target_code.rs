use chrono::{DateTime, Utc};
use marker::types::EnforcedStatement;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "target_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub challenge_id: i64,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    pub description: String,
    pub enforced_statement: Option<String>,
    pub required_output_similarity: Option<i32>,
    #[sea_orm(column_type = "Double")]
    pub points: f64,
    /// JSON array of stdin payloads.
    #[sea_orm(column_type = "Text")]
    pub test_cases: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lab_challenge::Entity",
        from = "Column::ChallengeId",
        to = "super::lab_challenge::Column::Id"
    )]
    LabChallenge,
}

impl Related<super::lab_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LabChallenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Editable fields of a target code.
#[derive(Debug, Clone)]
pub struct TargetCodeFields {
    pub code: String,
    pub description: String,
    pub enforced_statement: Option<EnforcedStatement>,
    pub required_output_similarity: Option<u32>,
    pub points: f64,
    pub test_cases: Vec<String>,
}

fn encode_test_cases(test_cases: &[String]) -> Result<String, DbErr> {
    serde_json::to_string(test_cases).map_err(|e| DbErr::Custom(e.to_string()))
}

impl Model {
    pub async fn create(
        db: &DbConn,
        challenge_id: i64,
        fields: TargetCodeFields,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            challenge_id: Set(challenge_id),
            code: Set(fields.code),
            description: Set(fields.description),
            enforced_statement: Set(fields.enforced_statement.map(String::from)),
            required_output_similarity: Set(fields.required_output_similarity.map(|s| s as i32)),
            points: Set(fields.points),
            test_cases: Set(encode_test_cases(&fields.test_cases)?),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn get_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_challenge(db: &DbConn, challenge_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ChallengeId.eq(challenge_id))
            .all(db)
            .await
    }

    pub async fn edit(db: &DbConn, id: i64, fields: TargetCodeFields) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Target code not found".to_string()))?;

        let mut active_model: ActiveModel = model.into();
        active_model.code = Set(fields.code);
        active_model.description = Set(fields.description);
        active_model.enforced_statement = Set(fields.enforced_statement.map(String::from));
        active_model.required_output_similarity =
            Set(fields.required_output_similarity.map(|s| s as i32));
        active_model.points = Set(fields.points);
        active_model.test_cases = Set(encode_test_cases(&fields.test_cases)?);
        active_model.updated_at = Set(Utc::now());
        active_model.update(db).await
    }

    pub fn to_domain(&self) -> Result<marker::types::TargetCode, DbErr> {
        let test_cases: Vec<String> = serde_json::from_str(&self.test_cases)
            .map_err(|e| DbErr::Custom(format!("Corrupt test cases for target {}: {e}", self.id)))?;
        let enforced_statement = self
            .enforced_statement
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<EnforcedStatement>())
            .transpose()
            .map_err(DbErr::Custom)?;

        Ok(marker::types::TargetCode {
            id: self.id,
            challenge_id: self.challenge_id,
            code: self.code.clone(),
            description: self.description.clone(),
            enforced_statement,
            required_output_similarity: self
                .required_output_similarity
                .map(|s| s.clamp(0, 100) as u32),
            points: self.points,
            test_cases,
        })
    }
}
