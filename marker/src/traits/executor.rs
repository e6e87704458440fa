//!
//! # Code Executor Trait
//!
//! The execution service compiles and runs a program against one stdin payload.
//! Failures come back as data inside [`ExecutionResult`]; only the student/target
//! distinction decides which [`MarkerError`](crate::error::MarkerError) a failure
//! becomes, so the trait itself never returns an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use util::languages::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
    pub input: String,
    pub language: Language,
}

/// Result of one execution. At most one of the error fields is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: Option<String>,
    pub stderr: Option<String>,
    pub compile_error: Option<String>,
    pub runtime_error: Option<String>,
    /// Transport-level failure reaching the service.
    pub network_error: Option<String>,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Default::default()
        }
    }

    pub fn compile_error(message: impl Into<String>) -> Self {
        Self {
            compile_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self {
            runtime_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self {
            network_error: Some(message.into()),
            ..Default::default()
        }
    }

    /// The first failure reported, checked in compile, runtime, network order.
    pub fn failure(&self) -> Option<ExecutionFailure> {
        if let Some(msg) = &self.compile_error {
            return Some(ExecutionFailure::Compile(msg.clone()));
        }
        if let Some(msg) = &self.runtime_error {
            return Some(ExecutionFailure::Runtime(msg.clone()));
        }
        self.network_error
            .as_ref()
            .map(|msg| ExecutionFailure::Network(msg.clone()))
    }

    pub fn stdout(&self) -> &str {
        self.output.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum ExecutionFailure {
    Compile(String),
    Runtime(String),
    Network(String),
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionFailure::Compile(msg) => write!(f, "Compilation error: {msg}"),
            ExecutionFailure::Runtime(msg) => write!(f, "Runtime error: {msg}"),
            ExecutionFailure::Network(msg) => write!(f, "Could not reach the code runner: {msg}"),
        }
    }
}

#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> ExecutionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_prefers_compile_errors() {
        let result = ExecutionResult {
            compile_error: Some("missing ;".into()),
            runtime_error: Some("segfault".into()),
            ..Default::default()
        };
        assert_eq!(result.failure(), Some(ExecutionFailure::Compile("missing ;".into())));
        assert_eq!(ExecutionResult::success("ok").failure(), None);
        assert_eq!(ExecutionResult::default().stdout(), "");
    }
}
