//! Shared building blocks for the lab grading workspace.
//!
//! - [`config`]: process-wide configuration loaded from `.env` and the environment.
//! - [`languages`]: the programming languages a lab can be written in, grouped by family.
//! - [`test_helpers`]: small helpers used by the integration tests of the other crates.

pub mod config;
pub mod languages;
pub mod test_helpers;
