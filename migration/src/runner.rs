use colored::*;
use futures::FutureExt;
use migration::Migrator;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigrationStatus;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

fn print_label(label: String) {
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{label}{dots} ");
    let _ = io::stdout().flush();
}

/// Applies pending migrations one at a time so each gets its own status line.
/// Returns how many were applied.
pub async fn apply_pending(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        println!("{}", "Schema is up to date".dimmed());
        return Ok(0);
    }

    println!("Applying {} migration(s)...", pending.len());
    for migration in &pending {
        print_label(format!("Applying {}", migration.name().bold()));

        let start = Instant::now();
        let result = std::panic::AssertUnwindSafe(Migrator::up(db, Some(1)))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(())) => {
                let time_str = format!("({:.2?})", start.elapsed()).dimmed();
                println!("{} {}", "done".green(), time_str);
            }
            Ok(Err(e)) => {
                println!("{}", "failed".red());
                return Err(e);
            }
            Err(_) => {
                println!("{}", "panicked".red());
                return Err(DbErr::Migration(format!(
                    "{} panicked",
                    migration.name()
                )));
            }
        }
    }
    Ok(pending.len())
}

/// Reverts the most recently applied migration.
pub async fn rollback_last(db: &DatabaseConnection) -> Result<(), DbErr> {
    let applied = Migrator::get_applied_migrations(db).await?;
    let Some(last) = applied.last() else {
        println!("{}", "Nothing to roll back".dimmed());
        return Ok(());
    };

    print_label(format!("Reverting {}", last.name().bold()));
    Migrator::down(db, Some(1)).await?;
    println!("{}", "done".yellow());
    Ok(())
}

/// Lists every known migration with whether it has been applied.
pub async fn print_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    for migration in Migrator::get_migration_with_status(db).await? {
        let status = match migration.status() {
            MigrationStatus::Applied => "applied".green(),
            MigrationStatus::Pending => "pending".yellow(),
        };
        print_label(migration.name().to_string());
        println!("{status}");
    }
    Ok(())
}
