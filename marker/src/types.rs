//! Domain types shared by the grading pipeline, the stores and the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use util::languages::Language;

pub type StudentId = i64;
pub type TargetCodeId = i64;
pub type AssignmentId = i64;
pub type ChallengeId = i64;

/// Identifies one (assignment, student, target code) attempt slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptKey {
    pub assignment_id: AssignmentId,
    pub student_id: StudentId,
    pub target_code_id: TargetCodeId,
}

/// A construct a lecturer can require the student's code to contain.
///
/// Anything outside the fixed set is treated as a bare keyword to search for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EnforcedStatement {
    If,
    IfElse,
    Switch,
    For,
    While,
    DoWhile,
    Pointer,
    Array,
    Keyword(String),
}

impl EnforcedStatement {
    pub fn as_str(&self) -> &str {
        match self {
            EnforcedStatement::If => "if",
            EnforcedStatement::IfElse => "if-else",
            EnforcedStatement::Switch => "switch",
            EnforcedStatement::For => "for",
            EnforcedStatement::While => "while",
            EnforcedStatement::DoWhile => "do-while",
            EnforcedStatement::Pointer => "pointer",
            EnforcedStatement::Array => "array",
            EnforcedStatement::Keyword(keyword) => keyword,
        }
    }
}

impl fmt::Display for EnforcedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnforcedStatement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "" => return Err("Enforced statement must not be empty".to_string()),
            "if" => EnforcedStatement::If,
            "if-else" | "if_else" | "ifelse" => EnforcedStatement::IfElse,
            "switch" => EnforcedStatement::Switch,
            "for" => EnforcedStatement::For,
            "while" => EnforcedStatement::While,
            "do-while" | "do_while" | "dowhile" => EnforcedStatement::DoWhile,
            "pointer" => EnforcedStatement::Pointer,
            "array" => EnforcedStatement::Array,
            _ => EnforcedStatement::Keyword(trimmed.to_string()),
        })
    }
}

impl TryFrom<String> for EnforcedStatement {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EnforcedStatement> for String {
    fn from(value: EnforcedStatement) -> Self {
        value.as_str().to_string()
    }
}

/// One programming exercise inside a lab week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabChallenge {
    pub id: ChallengeId,
    pub lab_name: String,
    pub week: i32,
    pub title: String,
    pub language: Language,
}

/// The lecturer's reference solution for one exercise within a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCode {
    pub id: TargetCodeId,
    pub challenge_id: ChallengeId,
    pub code: String,
    pub description: String,
    pub enforced_statement: Option<EnforcedStatement>,
    /// Pass threshold (0-100). Absent means the language default.
    pub required_output_similarity: Option<u32>,
    pub points: f64,
    /// Stdin payloads. An empty list means "run once with empty input".
    #[serde(default)]
    pub test_cases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptStatus {
    WellDone,
    Good,
    Fail,
}

impl AttemptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptStatus::WellDone => "well-done",
            AttemptStatus::Good => "good",
            AttemptStatus::Fail => "fail",
        }
    }

    /// Score multiplier applied on top of the similarity ratio.
    pub fn multiplier(self) -> f64 {
        match self {
            AttemptStatus::WellDone => 1.0,
            AttemptStatus::Good => 0.9,
            AttemptStatus::Fail => 0.8,
        }
    }

    pub fn is_completed(self) -> bool {
        self != AttemptStatus::Fail
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttemptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "well-done" => Ok(AttemptStatus::WellDone),
            "good" => Ok(AttemptStatus::Good),
            "fail" => Ok(AttemptStatus::Fail),
            other => Err(format!("Unknown attempt status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LateRequestStatus {
    Requested,
    Approved,
}

impl LateRequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LateRequestStatus::Requested => "requested",
            LateRequestStatus::Approved => "approved",
        }
    }
}

impl FromStr for LateRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(LateRequestStatus::Requested),
            "approved" => Ok(LateRequestStatus::Approved),
            other => Err(format!("Unknown late request status: {other}")),
        }
    }
}

/// Late-submission state for one (student, target code) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LateSubmission {
    pub late_request_status: Option<LateRequestStatus>,
    pub late_submission_max_score: Option<f64>,
}

impl LateSubmission {
    pub fn is_approved(&self) -> bool {
        self.late_request_status == Some(LateRequestStatus::Approved)
    }
}

/// Whether the required construct was found in the student's code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementCheck {
    pub required: EnforcedStatement,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub name: String,
    /// 0-100
    pub score: u8,
    pub feedback: String,
}

/// Qualitative review produced by the AI assessment service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    pub skills: Vec<SkillScore>,
    pub overall_score: u8,
    pub recommendations: Vec<String>,
}

/// The latest graded result for one (assignment, student, target code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLabAttempt {
    pub student_code: String,
    pub statement_check: Option<StatementCheck>,
    pub status: AttemptStatus,
    pub average_output_similarity: u32,
    pub score: f64,
    /// Highest score ever credited to the ledger for this slot.
    pub best_score: f64,
    pub completed: bool,
    pub language: Language,
    pub assessment: Option<AiAssessment>,
    #[serde(flatten)]
    pub late: LateSubmission,
    pub graded_at: DateTime<Utc>,
}

/// Progress and late-submission state of one challenge assigned to a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedChallengeInfo {
    pub assignment_id: AssignmentId,
    pub challenge_id: ChallengeId,
    pub class_id: i64,
    /// Language of the assigned challenge; the default for submissions.
    pub language: Language,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub progress: HashMap<StudentId, HashMap<TargetCodeId, StudentLabAttempt>>,
    #[serde(default)]
    pub late_submissions: HashMap<StudentId, HashMap<TargetCodeId, LateSubmission>>,
}

impl AssignedChallengeInfo {
    pub fn new(
        assignment_id: AssignmentId,
        challenge_id: ChallengeId,
        class_id: i64,
        language: Language,
        expiry_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            assignment_id,
            challenge_id,
            class_id,
            language,
            expiry_date,
            progress: HashMap::new(),
            late_submissions: HashMap::new(),
        }
    }

    pub fn key(&self, student_id: StudentId, target_code_id: TargetCodeId) -> AttemptKey {
        AttemptKey {
            assignment_id: self.assignment_id,
            student_id,
            target_code_id,
        }
    }

    /// True when an expiry date exists and `now` is strictly after it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| now > expiry)
    }

    pub fn attempt(
        &self,
        student_id: StudentId,
        target_code_id: TargetCodeId,
    ) -> Option<&StudentLabAttempt> {
        self.progress
            .get(&student_id)
            .and_then(|attempts| attempts.get(&target_code_id))
    }

    pub fn late_submission(
        &self,
        student_id: StudentId,
        target_code_id: TargetCodeId,
    ) -> LateSubmission {
        self.late_submissions
            .get(&student_id)
            .and_then(|grants| grants.get(&target_code_id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn record_attempt(
        &mut self,
        student_id: StudentId,
        target_code_id: TargetCodeId,
        attempt: StudentLabAttempt,
    ) {
        self.progress
            .entry(student_id)
            .or_default()
            .insert(target_code_id, attempt);
    }

    /// Stores the late state and mirrors it onto an existing attempt.
    pub fn set_late_submission(
        &mut self,
        student_id: StudentId,
        target_code_id: TargetCodeId,
        late: LateSubmission,
    ) {
        if let Some(attempt) = self
            .progress
            .get_mut(&student_id)
            .and_then(|attempts| attempts.get_mut(&target_code_id))
        {
            attempt.late = late.clone();
        }
        self.late_submissions
            .entry(student_id)
            .or_default()
            .insert(target_code_id, late);
    }
}
