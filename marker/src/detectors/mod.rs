//! Enforced-statement detection.
//!
//! Detection is purely lexical: comments are stripped first, then a per-family
//! regular expression set is applied. String literals are not parsed, so a
//! keyword inside a string can still satisfy a requirement.

pub mod c_like;
pub mod python;

use crate::traits::detector::StatementDetector;
use crate::types::EnforcedStatement;
use regex::Regex;
use util::languages::Language;

pub use c_like::CLikeDetector;
pub use python::PythonDetector;

/// Picks the detector for a language. Only Python uses Python rules; the web
/// languages share the C-family rules.
pub fn detector_for(language: Language) -> &'static dyn StatementDetector {
    static PYTHON: PythonDetector = PythonDetector;
    static C_LIKE: CLikeDetector = CLikeDetector;

    if language.uses_python_syntax() {
        &PYTHON
    } else {
        &C_LIKE
    }
}

/// Whether `code` contains `required` once comments are removed.
pub fn check_statement(code: &str, required: &EnforcedStatement, language: Language) -> bool {
    detector_for(language).contains(code, required)
}

/// Word-bounded search for a free-form keyword.
pub(crate) fn contains_keyword(code: &str, keyword: &str) -> bool {
    match Regex::new(&format!(r"\b{}\b", regex::escape(keyword))) {
        Ok(re) => re.is_match(code),
        Err(_) => code.contains(keyword),
    }
}
