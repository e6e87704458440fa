//! Score ledger arithmetic.
//!
//! A student's total only ever moves up. Each (assignment, student, target) slot
//! has a credited amount: the best score it has ever contributed. A new attempt
//! adds the amount by which it beats that credit, and nothing otherwise.

use crate::scorer::round2;
use crate::types::StudentLabAttempt;

/// What the slot has already contributed to the student's total.
pub fn credited_score(previous: Option<&StudentLabAttempt>) -> f64 {
    previous
        .map(|attempt| attempt.best_score.max(attempt.score))
        .unwrap_or(0.0)
}

/// The positive-only amount to add to the student's total for `new_score`.
pub fn score_delta(previous: Option<&StudentLabAttempt>, new_score: f64) -> f64 {
    round2((new_score - credited_score(previous)).max(0.0))
}

/// The slot's credit after `new_score` has been recorded.
pub fn best_score_after(previous: Option<&StudentLabAttempt>, new_score: f64) -> f64 {
    credited_score(previous).max(new_score)
}

pub fn apply_score_delta(total: f64, delta: f64) -> f64 {
    round2(total + delta.max(0.0))
}
