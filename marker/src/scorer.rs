//! # Scorer Module
//!
//! Turns an average output similarity into a pass/fail status and a point score.
//!
//! - The pass threshold is the target's `required_output_similarity`, or 100 for
//!   web languages and 95 for everything else.
//! - A submission meets requirements when the similarity reaches the threshold and
//!   any enforced statement was found.
//! - Meeting requirements with a similarity of at least 99.5 is `well-done`;
//!   otherwise `good`. Not meeting them is `fail`.
//! - Score is `similarity / 100 * max_points * multiplier`, rounded to two decimals.
//!   A failing attempt still earns partial credit at the 0.8 multiplier.

use crate::types::{AttemptStatus, StatementCheck, TargetCode};
use util::languages::Language;

pub const DEFAULT_THRESHOLD: u32 = 95;
pub const WEB_DEFAULT_THRESHOLD: u32 = 100;
pub const WELL_DONE_SIMILARITY: f64 = 99.5;

/// Round a float to two decimal places.
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn pass_threshold(target: &TargetCode, language: Language) -> u32 {
    target.required_output_similarity.unwrap_or(if language.is_web() {
        WEB_DEFAULT_THRESHOLD
    } else {
        DEFAULT_THRESHOLD
    })
}

pub fn meets_requirements(
    similarity: u32,
    threshold: u32,
    statement_check: Option<&StatementCheck>,
) -> bool {
    similarity >= threshold && statement_check.is_none_or(|check| check.found)
}

pub fn classify(similarity: u32, meets_requirements: bool) -> AttemptStatus {
    if !meets_requirements {
        AttemptStatus::Fail
    } else if f64::from(similarity) >= WELL_DONE_SIMILARITY {
        AttemptStatus::WellDone
    } else {
        AttemptStatus::Good
    }
}

pub fn compute_score(similarity: u32, max_points: f64, status: AttemptStatus) -> f64 {
    round2(f64::from(similarity) / 100.0 * max_points * status.multiplier())
}
