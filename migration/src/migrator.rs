use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_lab_challenges::Migration),
            Box::new(migrations::m202510010002_create_target_codes::Migration),
            Box::new(migrations::m202510010003_create_students::Migration),
            Box::new(migrations::m202510010004_create_assigned_challenges::Migration),
            Box::new(migrations::m202510010005_create_student_lab_attempts::Migration),
            Box::new(migrations::m202510010006_create_late_submission_grants::Migration),
        ]
    }
}
