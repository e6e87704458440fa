//!
//! # Statement Detector Trait
//!
//! Each language family implements its own comment stripping and pattern set.
//! See [`crate::detectors`] for the implementations.

use crate::types::EnforcedStatement;

pub trait StatementDetector: Send + Sync {
    /// Removes comments so commented-out code never satisfies a requirement.
    fn strip_comments(&self, code: &str) -> String;

    /// Searches comment-free code for the statement.
    fn detect(&self, stripped: &str, statement: &EnforcedStatement) -> bool;

    fn contains(&self, code: &str, statement: &EnforcedStatement) -> bool {
        let stripped = self.strip_comments(code);
        self.detect(&stripped, statement)
    }
}
