//! Delegation of Python, Java and PHP snippets to a remote service.
//!
//! The service receives `{ "code": ..., "language": ... }` and answers with
//! optional `error`, `stdout`, `stderr` and `return_value` fields. Every
//! outcome, including transport failures, ends up as a [`RunReport`].

use crate::error::ExecError;
use crate::language::Language;
use crate::report::{OutputStatus, RunReport};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body sent to the execution service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecRequest {
    pub code: String,
    pub language: Language,
}

/// Body returned by the execution service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub return_value: Option<serde_json::Value>,
}

/// Something that can execute a request, usually over HTTP.
pub trait RemoteExecutor: Send + Sync {
    fn execute(&self, request: &ExecRequest) -> Result<ExecResponse, ExecError>;
}

/// Port named in the remediation hint, taken from the endpoint URL.
pub fn backend_port(endpoint: &str) -> Option<u16> {
    url::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.port_or_known_default())
}

/// Turns executor results into output-panel reports.
#[derive(Clone)]
pub struct RemoteRunner {
    executor: Arc<dyn RemoteExecutor>,
    backend_hint: String,
}

impl RemoteRunner {
    /// `endpoint` is only used to word the hint shown on transport failures.
    pub fn new(executor: Arc<dyn RemoteExecutor>, endpoint: &str) -> Self {
        let backend_hint = match backend_port(endpoint) {
            Some(port) => format!("Make sure the backend server is running on port {port}."),
            None => format!("Make sure the backend server at {endpoint} is reachable."),
        };
        Self {
            executor,
            backend_hint,
        }
    }

    /// Run `code` remotely. Blocks until the executor returns.
    pub fn run(&self, code: &str, language: Language) -> RunReport {
        if !language.runs_remotely() {
            return RunReport::warning(format!("Language {language} is not supported yet."));
        }

        let request = ExecRequest {
            code: code.to_string(),
            language,
        };
        log::debug!("Executing {} snippet remotely ({} bytes)", language, code.len());

        match self.executor.execute(&request) {
            Ok(response) => report_response(&response, language),
            Err(err) => {
                log::warn!("Remote execution of {} code failed: {}", language, err);
                RunReport::error(format!(
                    "Failed to execute {language} code: {err}\n\n{}",
                    self.backend_hint
                ))
            }
        }
    }
}

fn display_return_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn report_response(response: &ExecResponse, language: Language) -> RunReport {
    if let Some(error) = response.error.as_deref().filter(|e| !e.is_empty()) {
        return RunReport::error(format!("Error: {error}"));
    }

    let mut parts = Vec::new();
    if let Some(stdout) = response.stdout.as_deref().filter(|s| !s.is_empty()) {
        parts.push(stdout.to_string());
    }
    let stderr = response.stderr.as_deref().filter(|s| !s.is_empty());
    if let Some(stderr) = stderr {
        parts.push(format!("STDERR: {stderr}"));
    }
    if let Some(value) = response.return_value.as_ref().filter(|v| !v.is_null()) {
        parts.push(format!("Return value: {}", display_return_value(value)));
    }

    if parts.is_empty() {
        return RunReport::neutral(format!("{language} code executed successfully (no output)."));
    }

    let status = if stderr.is_some() {
        OutputStatus::Warning
    } else {
        OutputStatus::Neutral
    };
    RunReport::new(parts.join("\n"), status)
}
