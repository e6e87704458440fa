//! HTTP surface of the lab grading service.
//!
//! Everything is mounted under `/api` and answers with the [`response::ApiResponse`]
//! envelope. Grading itself lives in the `marker` crate; this crate only parses
//! requests, calls the [`state::AppState`] services and maps their errors onto
//! status codes.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
