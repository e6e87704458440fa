use super::contains_keyword;
use crate::traits::detector::StatementDetector;
use crate::types::EnforcedStatement;
use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").unwrap());

static IF_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bif\s*\(").unwrap());
static ELSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\belse\b").unwrap());
static WHILE_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bwhile\s*\(").unwrap());
static DO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdo\b").unwrap());
static POINTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_]\w*\s*\*+\s*[A-Za-z_]\w*|\*[A-Za-z_]\w*").unwrap()
});
static ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_]\w*\s+[A-Za-z_]\w*\s*\[[^\]]*\]").unwrap());

/// Rules shared by C, C++, Java, C# and the web languages.
#[derive(Debug, Default, Clone, Copy)]
pub struct CLikeDetector;

impl StatementDetector for CLikeDetector {
    fn strip_comments(&self, code: &str) -> String {
        let without_blocks = BLOCK_COMMENT.replace_all(code, "");
        LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
    }

    fn detect(&self, code: &str, statement: &EnforcedStatement) -> bool {
        match statement {
            EnforcedStatement::If => contains_keyword(code, "if"),
            EnforcedStatement::IfElse => IF_CALL.is_match(code) && ELSE.is_match(code),
            EnforcedStatement::Switch => contains_keyword(code, "switch"),
            EnforcedStatement::For => contains_keyword(code, "for"),
            EnforcedStatement::While => contains_keyword(code, "while"),
            EnforcedStatement::DoWhile => DO.is_match(code) && WHILE_CALL.is_match(code),
            EnforcedStatement::Pointer => POINTER.is_match(code),
            EnforcedStatement::Array => ARRAY.is_match(code),
            EnforcedStatement::Keyword(keyword) => contains_keyword(code, keyword),
        }
    }
}
