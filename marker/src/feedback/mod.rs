//! # Feedback Module
//!
//! Qualitative feedback for failing submissions.
//!
//! - [`ai_assessment`]: Reviews code with Google's Gemini API and scores it on five
//!   skill dimensions, plus an overall score and recommendations.

pub mod ai_assessment;
