//! Schema CLI for the grading database.
//!
//! ```text
//! migration            apply pending migrations
//! migration fresh      delete the database file, then migrate from scratch
//! migration clean      delete the database file
//! migration rollback   revert the last applied migration
//! migration status     list migrations and whether they are applied
//! ```

use colored::*;
use sea_orm::{Database, DatabaseConnection};
use std::{env, fs, path::Path, process};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let command = env::args().nth(1).unwrap_or_else(|| "up".to_string());

    match command.as_str() {
        "clean" => {
            remove_db_file(&db_path);
            return;
        }
        "fresh" => remove_db_file(&db_path),
        "up" | "rollback" | "status" => {}
        other => {
            eprintln!("Unknown command `{other}`; expected up, fresh, clean, rollback or status");
            process::exit(2);
        }
    }

    let db = connect(&db_path).await;
    let result = match command.as_str() {
        "rollback" => runner::rollback_last(&db).await,
        "status" => runner::print_status(&db).await,
        _ => runner::apply_pending(&db).await.map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Migration failed:".red());
        process::exit(1);
    }
}

/// `DATABASE_PATH` may be a SQLite file path or a full DSN.
async fn connect(db_path: &str) -> DatabaseConnection {
    let url = if db_path.starts_with("sqlite:") {
        db_path.to_string()
    } else {
        if let Some(parent) = Path::new(db_path).parent() {
            let _ = fs::create_dir_all(parent);
        }
        format!("sqlite://{db_path}?mode=rwc")
    };

    match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Database connection failed:".red());
            process::exit(1);
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if !db_path.exists() {
        println!("DB file does not exist: {}", db_path.display());
        return;
    }
    match fs::remove_file(db_path) {
        Ok(()) => println!("Deleted DB: {}", db_path.display()),
        Err(e) => {
            eprintln!("{} {e}", "Failed to delete DB file:".red());
            process::exit(1);
        }
    }
}
