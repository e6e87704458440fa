//! # Challenge Routes
//!
//! Lecturer-side management of lab challenges under `/api/challenges`.
//!
//! - `post.rs` — create a challenge, add a target code
//! - `get.rs` — fetch a challenge with its target codes
//! - `common.rs` — request/response models, also used by `/api/targets`

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use get::get_challenge;
use post::{add_target, create_challenge};

pub mod common;
pub mod get;
pub mod post;

/// Routes:
/// - `POST /challenges`                          → create a challenge with target codes
/// - `GET  /challenges/{challenge_id}`           → challenge with its target codes
/// - `POST /challenges/{challenge_id}/targets`   → add a target code
pub fn challenge_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_challenge))
        .route("/{challenge_id}", get(get_challenge))
        .route("/{challenge_id}/targets", post(add_target))
}
