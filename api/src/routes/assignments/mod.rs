//! # Assignment Routes
//!
//! A challenge assigned to a class, and everything students do against it.
//!
//! - `post.rs` — assign a challenge, submit code, request a late submission
//! - `put.rs` — approve a late submission
//! - `get.rs` — a student's attempts
//! - `delete.rs` — unassign

use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use delete::delete_assignment;
use get::get_attempts;
use post::{create_assignment, request_late, submit};
use put::approve_late;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Routes:
/// - `POST   /assignments`
/// - `DELETE /assignments/{assignment_id}`
/// - `POST   /assignments/{assignment_id}/targets/{target_code_id}/submissions`
/// - `POST   /assignments/{assignment_id}/targets/{target_code_id}/late-requests`
/// - `PUT    /assignments/{assignment_id}/targets/{target_code_id}/late-requests/{student_id}/approve`
/// - `GET    /assignments/{assignment_id}/students/{student_id}/attempts`
pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment))
        .route("/{assignment_id}", delete(delete_assignment))
        .route(
            "/{assignment_id}/targets/{target_code_id}/submissions",
            post(submit),
        )
        .route(
            "/{assignment_id}/targets/{target_code_id}/late-requests",
            post(request_late),
        )
        .route(
            "/{assignment_id}/targets/{target_code_id}/late-requests/{student_id}/approve",
            put(approve_late),
        )
        .route(
            "/{assignment_id}/students/{student_id}/attempts",
            get(get_attempts),
        )
}
