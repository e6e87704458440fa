//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which encapsulates every way a
//! grading call, a late-submission action or a store operation can fail.
//!
//! Three variants are *rejections* of a submission and never mutate any state:
//! [`MarkerError::LabExpired`], [`MarkerError::StudentExecution`] and
//! [`MarkerError::LabMisconfigured`]. The first two are student-facing, the third
//! one flags a problem with the lecturer's reference solution.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_code(code: &str) -> Result<(), MarkerError> {
//!     if code.trim().is_empty() {
//!         return Err(MarkerError::InvalidInput("code must not be empty".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use crate::traits::executor::ExecutionFailure;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The assignment's expiry date has passed and no late submission was approved.
    #[error("This lab expired on {expired_at}; request a late submission to continue")]
    LabExpired { expired_at: DateTime<Utc> },
    /// The student's own code failed to compile, crashed, or could not be executed.
    #[error("{0}")]
    StudentExecution(ExecutionFailure),
    /// The reference solution failed to run: a lecturer-side data problem.
    #[error("Lab is misconfigured: the reference solution failed to run ({0})")]
    LabMisconfigured(String),
    /// The execution service could not run the reference solution.
    #[error("Code execution service unavailable: {0}")]
    ExecutionService(String),
    /// The AI assessment service failed. Never aborts grading.
    #[error("AI assessment unavailable: {0}")]
    AssessmentUnavailable(String),
    /// A late-submission request/approval was not allowed in the current state.
    #[error("{0}")]
    InvalidLateTransition(String),
    /// A referenced assignment, target code or attempt does not exist.
    #[error("{0} not found")]
    NotFound(String),
    /// The persistence layer failed.
    #[error("Storage error: {0}")]
    Storage(String),
    /// Request data failed validation.
    #[error("{0}")]
    InvalidInput(String),
}
