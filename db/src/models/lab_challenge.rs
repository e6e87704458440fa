use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use util::languages::Language;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lab_challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub lab_name: String,
    pub week: i32,
    pub title: String,
    pub language: LabLanguage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "lab_language_enum")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LabLanguage {
    #[sea_orm(string_value = "cpp")]
    Cpp,
    #[sea_orm(string_value = "c")]
    C,
    #[sea_orm(string_value = "java")]
    Java,
    #[sea_orm(string_value = "csharp")]
    CSharp,
    #[sea_orm(string_value = "python")]
    Python,
    #[sea_orm(string_value = "javascript")]
    JavaScript,
    #[sea_orm(string_value = "react")]
    React,
    #[sea_orm(string_value = "html")]
    Html,
}

impl From<Language> for LabLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::Cpp => LabLanguage::Cpp,
            Language::C => LabLanguage::C,
            Language::Java => LabLanguage::Java,
            Language::CSharp => LabLanguage::CSharp,
            Language::Python => LabLanguage::Python,
            Language::JavaScript => LabLanguage::JavaScript,
            Language::React => LabLanguage::React,
            Language::Html => LabLanguage::Html,
        }
    }
}

impl From<LabLanguage> for Language {
    fn from(language: LabLanguage) -> Self {
        match language {
            LabLanguage::Cpp => Language::Cpp,
            LabLanguage::C => Language::C,
            LabLanguage::Java => Language::Java,
            LabLanguage::CSharp => Language::CSharp,
            LabLanguage::Python => Language::Python,
            LabLanguage::JavaScript => Language::JavaScript,
            LabLanguage::React => Language::React,
            LabLanguage::Html => Language::Html,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::target_code::Entity")]
    TargetCode,
    #[sea_orm(has_many = "super::assigned_challenge::Entity")]
    AssignedChallenge,
}

impl Related<super::target_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TargetCode.def()
    }
}

impl Related<super::assigned_challenge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedChallenge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        lab_name: &str,
        week: i32,
        title: &str,
        language: Language,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            lab_name: Set(lab_name.to_owned()),
            week: Set(week),
            title: Set(title.to_owned()),
            language: Set(language.into()),
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

    pub fn to_domain(&self) -> marker::types::LabChallenge {
        marker::types::LabChallenge {
            id: self.id,
            lab_name: self.lab_name.clone(),
            week: self.week,
            title: self.title.clone(),
            language: self.language.into(),
        }
    }
}
