//! Scripted doubles for the external services, for unit and integration tests.
//!
//! Enabled inside this crate's tests and, for other crates, through the
//! `testing` feature.

use crate::error::MarkerError;
use crate::traits::assessor::Assessor;
use crate::traits::executor::{CodeExecutor, ExecutionRequest, ExecutionResult};
use crate::types::{AiAssessment, SkillScore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use util::languages::Language;

/// Answers executions from a table keyed by (code, stdin).
///
/// Unscripted pairs return a runtime error so a missing entry is loud.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<(String, String), ExecutionResult>,
    calls: Mutex<Vec<ExecutionRequest>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, code: &str, input: &str, result: ExecutionResult) -> Self {
        self.responses
            .insert((code.to_string(), input.to_string()), result);
        self
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CodeExecutor for ScriptedExecutor {
    async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let key = (request.code.clone(), request.input.clone());
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        self.responses.get(&key).cloned().unwrap_or_else(|| {
            ExecutionResult::runtime_error(format!("no scripted response for input {:?}", key.1))
        })
    }
}

/// Always returns the same assessment and counts how often it was asked.
pub struct StaticAssessor {
    assessment: AiAssessment,
    calls: AtomicUsize,
}

impl StaticAssessor {
    pub fn new(assessment: AiAssessment) -> Self {
        Self {
            assessment,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Assessor for StaticAssessor {
    async fn assess(&self, _code: &str, _language: Language) -> Result<AiAssessment, MarkerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assessment.clone())
    }
}

/// An assessor whose service is always down.
pub struct FailingAssessor;

#[async_trait]
impl Assessor for FailingAssessor {
    async fn assess(&self, _code: &str, _language: Language) -> Result<AiAssessment, MarkerError> {
        Err(MarkerError::AssessmentUnavailable(
            "service unavailable".to_string(),
        ))
    }
}

/// A plausible review used by tests that only need *some* assessment.
pub fn sample_assessment() -> AiAssessment {
    let skill = |name: &str, score: u8| SkillScore {
        name: name.to_string(),
        score,
        feedback: format!("{name} looks reasonable"),
    };
    AiAssessment {
        skills: vec![
            skill("correctness", 40),
            skill("efficiency", 70),
            skill("readability", 80),
            skill("structure", 75),
            skill("best practices", 60),
        ],
        overall_score: 65,
        recommendations: vec!["Check the loop bounds against the expected output".to_string()],
    }
}
