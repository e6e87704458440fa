//! Runs a student submission and the reference solution over every test case.
//!
//! Cases run serially. For each case the student's code runs first; any failure
//! aborts the whole run without executing the remaining cases. Web-family
//! languages are never executed: their normalized sources are compared instead.

use crate::comparators::similarity_comparator::text_similarity;
use crate::error::MarkerError;
use crate::traits::executor::{CodeExecutor, ExecutionFailure, ExecutionRequest};
use crate::utilities::normalization::normalize;
use serde::Serialize;
use tracing::{debug, warn};
use util::languages::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    Execution,
    SourceEquality,
}

/// Per-case detail kept for the attempt report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    pub input: String,
    pub student_output: String,
    pub target_output: String,
    pub similarity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputComparison {
    pub mode: ComparisonMode,
    pub cases: Vec<CaseOutcome>,
    pub average_similarity: u32,
}

impl OutputComparison {
    pub fn per_case_similarity(&self) -> Vec<u32> {
        self.cases.iter().map(|c| c.similarity).collect()
    }
}

/// Compares `student_code` against `target_code` for every entry in `test_cases`.
///
/// An empty `test_cases` list runs a single case with empty stdin.
///
/// # Errors
/// - [`MarkerError::StudentExecution`] if the student's code fails on any case.
/// - [`MarkerError::LabMisconfigured`] if the reference solution fails to compile or run.
/// - [`MarkerError::ExecutionService`] if the reference run cannot reach the service.
pub async fn run_against_targets(
    executor: &dyn CodeExecutor,
    student_code: &str,
    target_code: &str,
    test_cases: &[String],
    language: Language,
) -> Result<OutputComparison, MarkerError> {
    if language.is_web() {
        let equal = normalize(student_code, true) == normalize(target_code, true);
        let score = if equal { 100 } else { 0 };
        debug!(%language, score, "Compared web sources");
        return Ok(OutputComparison {
            mode: ComparisonMode::SourceEquality,
            cases: vec![CaseOutcome {
                input: String::new(),
                student_output: student_code.to_string(),
                target_output: target_code.to_string(),
                similarity: score,
            }],
            average_similarity: score,
        });
    }

    let default_case = [String::new()];
    let inputs: &[String] = if test_cases.is_empty() {
        &default_case
    } else {
        test_cases
    };

    let mut cases = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let student = executor
            .execute(ExecutionRequest {
                code: student_code.to_string(),
                input: input.clone(),
                language,
            })
            .await;
        if let Some(failure) = student.failure() {
            debug!(case = index, %failure, "Student code failed");
            return Err(MarkerError::StudentExecution(failure));
        }

        let target = executor
            .execute(ExecutionRequest {
                code: target_code.to_string(),
                input: input.clone(),
                language,
            })
            .await;
        match target.failure() {
            Some(ExecutionFailure::Network(msg)) => {
                warn!(case = index, error = %msg, "Code runner unreachable for reference solution");
                return Err(MarkerError::ExecutionService(msg));
            }
            Some(failure) => {
                warn!(case = index, %failure, "Reference solution failed");
                return Err(MarkerError::LabMisconfigured(failure.to_string()));
            }
            None => {}
        }

        let student_output = student.stdout().to_string();
        let target_output = target.stdout().to_string();
        let score = text_similarity(&student_output, &target_output, false);
        debug!(case = index, similarity = score, "Compared case output");

        cases.push(CaseOutcome {
            input: input.clone(),
            student_output,
            target_output,
            similarity: score,
        });
    }

    let total: u32 = cases.iter().map(|c| c.similarity).sum();
    let average_similarity = (f64::from(total) / cases.len() as f64).round() as u32;

    Ok(OutputComparison {
        mode: ComparisonMode::Execution,
        cases,
        average_similarity,
    })
}
