use super::contains_keyword;
use crate::traits::detector::StatementDetector;
use crate::types::EnforcedStatement;
use once_cell::sync::Lazy;
use regex::Regex;

static DOUBLE_DOCSTRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)""".*?""""#).unwrap());
static SINGLE_DOCSTRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)'''.*?'''").unwrap());
static HASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^\n]*").unwrap());

static IF_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bif\b[^\n]*:").unwrap());
static ELSE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\belse\s*:").unwrap());

/// Python rules. Python has no do-while, pointers or C arrays, so those
/// requirements are never satisfied.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonDetector;

impl StatementDetector for PythonDetector {
    fn strip_comments(&self, code: &str) -> String {
        let code = DOUBLE_DOCSTRING.replace_all(code, "");
        let code = SINGLE_DOCSTRING.replace_all(&code, "");
        HASH_COMMENT.replace_all(&code, "").into_owned()
    }

    fn detect(&self, code: &str, statement: &EnforcedStatement) -> bool {
        match statement {
            EnforcedStatement::If => contains_keyword(code, "if"),
            EnforcedStatement::IfElse => IF_HEADER.is_match(code) && ELSE_HEADER.is_match(code),
            EnforcedStatement::Switch => contains_keyword(code, "switch"),
            EnforcedStatement::For => contains_keyword(code, "for"),
            EnforcedStatement::While => contains_keyword(code, "while"),
            EnforcedStatement::DoWhile | EnforcedStatement::Pointer | EnforcedStatement::Array => {
                false
            }
            EnforcedStatement::Keyword(keyword) => contains_keyword(code, keyword),
        }
    }
}
