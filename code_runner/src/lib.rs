//! HTTP client for the external code execution service.
//!
//! The service exposes `POST {CODE_RUNNER_URL}/run` taking
//! `{ "code", "input", "language" }` and replying with the program's stdout or
//! a compile/runtime error. Anything that prevents a well-formed reply (refused
//! connection, timeout, non-2xx status, undecodable body) is reported as a
//! `network_error` so the grader can tell service outages from broken code.

use async_trait::async_trait;
use marker::traits::executor::{CodeExecutor, ExecutionRequest, ExecutionResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use util::config;

/// Reply body of the execution service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunResponse {
    output: Option<String>,
    stderr: Option<String>,
    #[serde(alias = "compileError")]
    compile_error: Option<String>,
    #[serde(alias = "runtimeError")]
    runtime_error: Option<String>,
}

impl From<RunResponse> for ExecutionResult {
    fn from(body: RunResponse) -> Self {
        ExecutionResult {
            output: body.output,
            stderr: body.stderr,
            compile_error: body.compile_error.filter(|e| !e.trim().is_empty()),
            runtime_error: body.runtime_error.filter(|e| !e.trim().is_empty()),
            network_error: None,
        }
    }
}

#[derive(Clone)]
pub struct HttpCodeExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCodeExecutor {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Uses `CODE_RUNNER_URL` and `CODE_RUNNER_TIMEOUT_SECS`.
    pub fn from_config() -> Self {
        Self::new(
            config::code_runner_url(),
            Duration::from_secs(config::code_runner_timeout_secs()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CodeExecutor for HttpCodeExecutor {
    async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let url = format!("{}/run", self.base_url);
        debug!(%url, language = %request.language, "Dispatching code execution");

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "Code runner request failed");
                return ExecutionResult::network_error(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "Code runner returned an error status");
            return ExecutionResult::network_error(format!("code runner returned {status}: {body}"));
        }

        match response.json::<RunResponse>().await {
            Ok(body) => body.into(),
            Err(e) => ExecutionResult::network_error(format!("invalid code runner reply: {e}")),
        }
    }
}
