//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check
//! - `/challenges` → lab challenges and their target codes (lecturer side)
//! - `/targets` → editing a single target code
//! - `/assignments` → assigning challenges to classes, submissions and late requests
//! - `/students` → per-student ledger totals

use crate::routes::{
    assignments::assignment_routes, challenges::challenge_routes, health::health_routes,
    students::student_routes, targets::target_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod assignments;
pub mod challenges;
pub mod health;
pub mod students;
pub mod targets;

/// Builds the complete application router for all HTTP endpoints.
///
/// Mount the result under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/challenges", challenge_routes())
        .nest("/targets", target_routes())
        .nest("/assignments", assignment_routes())
        .nest("/students", student_routes())
        .with_state(app_state)
}
