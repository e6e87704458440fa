//! Late-submission state machine.
//!
//! `none -> requested -> approved`. A request is only possible once the
//! assignment has expired; repeating it while pending is a no-op, and asking
//! again after approval is rejected. Approval can be repeated to change the cap.

use crate::error::MarkerError;
use crate::types::{LateRequestStatus, LateSubmission};
use chrono::{DateTime, Utc};

pub fn request_late(
    current: &LateSubmission,
    expiry_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<LateSubmission, MarkerError> {
    match expiry_date {
        Some(expiry) if now > expiry => {}
        _ => {
            return Err(MarkerError::InvalidLateTransition(
                "Late submission can only be requested after the lab has expired".to_string(),
            ));
        }
    }

    match current.late_request_status {
        None => Ok(LateSubmission {
            late_request_status: Some(LateRequestStatus::Requested),
            late_submission_max_score: None,
        }),
        Some(LateRequestStatus::Requested) => Ok(current.clone()),
        Some(LateRequestStatus::Approved) => Err(MarkerError::InvalidLateTransition(
            "Late submission has already been approved".to_string(),
        )),
    }
}

/// Approves a pending (or re-approves an approved) request.
///
/// `max_score` caps the points a late attempt can earn; it defaults to the
/// target's full points.
pub fn approve_late(
    current: &LateSubmission,
    max_score: Option<f64>,
    target_points: f64,
) -> Result<LateSubmission, MarkerError> {
    if current.late_request_status.is_none() {
        return Err(MarkerError::InvalidLateTransition(
            "There is no late submission request to approve".to_string(),
        ));
    }
    let max_score = max_score.unwrap_or(target_points);
    if !max_score.is_finite() || max_score < 0.0 {
        return Err(MarkerError::InvalidInput(
            "max_score must be a non-negative number".to_string(),
        ));
    }

    Ok(LateSubmission {
        late_request_status: Some(LateRequestStatus::Approved),
        late_submission_max_score: Some(max_score),
    })
}
