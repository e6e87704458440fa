use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_student_lab_attempts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("student_lab_attempts"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("assignment_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("student_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("target_code_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("student_code")).text().not_null())
                    .col(ColumnDef::new(Alias::new("required_statement")).string().null())
                    .col(ColumnDef::new(Alias::new("statement_found")).boolean().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("attempt_status_enum"),
                                vec![
                                    Alias::new("well-done"),
                                    Alias::new("good"),
                                    Alias::new("fail"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("average_output_similarity")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("score")).double().not_null())
                    .col(ColumnDef::new(Alias::new("best_score")).double().not_null())
                    .col(ColumnDef::new(Alias::new("completed")).boolean().not_null())
                    .col(ColumnDef::new(Alias::new("language")).string().not_null())
                    .col(ColumnDef::new(Alias::new("assessment")).json().null())
                    .col(ColumnDef::new(Alias::new("graded_at")).timestamp().not_null())
                    .index(
                        Index::create()
                            .name("uq_attempt_slot")
                            .col(Alias::new("assignment_id"))
                            .col(Alias::new("student_id"))
                            .col(Alias::new("target_code_id"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_lab_attempts"), Alias::new("assignment_id"))
                            .to(Alias::new("assigned_challenges"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_lab_attempts"), Alias::new("target_code_id"))
                            .to(Alias::new("target_codes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("student_lab_attempts")).to_owned())
            .await
    }
}
