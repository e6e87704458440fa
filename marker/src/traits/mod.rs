//!
//! Traits Module
//!
//! This module contains the seams of the grading pipeline. Each external
//! collaborator is reached through one of these traits so it can be swapped for
//! a scripted double in tests.
//!
//! - [`executor`]: Runs code against stdin on the execution service.
//! - [`assessor`]: Produces an AI review of a failing submission.
//! - [`detector`]: Finds a required statement in source code.
//! - [`store`]: Loads assignments and commits grading results atomically.

pub mod assessor;
pub mod detector;
pub mod executor;
pub mod store;
