//! Diming Model Runtime Layer
//!
//! Implementations of the `ModelRuntime` trait from `diming-domain`.
//!
//! # Architecture
//!
//! The model is never linked in. It runs as a separate local process that
//! takes the prompt on stdin and writes its completion to stdout:
//!
//! ```text
//! prompt → stdin → [ollama run <model>] → stdout → raw output
//!                                        → stderr → warning log
//! ```
//!
//! # Runtimes
//!
//! - `ProcessRuntime`: spawns the configured runtime binary per call
//! - `MockRuntime`: deterministic canned responses for testing
//!
//! # Examples
//!
//! ```
//! use diming_llm::MockRuntime;
//! use diming_domain::ModelRuntime;
//!
//! let runtime = MockRuntime::new("[]");
//! let output = runtime.invoke("any prompt", "qwen2.5:7b").unwrap();
//! assert_eq!(output, "[]");
//! ```

#![warn(missing_docs)]

pub mod process;

use diming_domain::ModelRuntime;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use process::{ProcessRuntime, RuntimeConfig};

/// Errors raised while running the external model process
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The runtime binary could not be started
    #[error("failed to start model runtime '{program}': {source}")]
    Spawn {
        /// Program that was launched
        program: String,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// Reading the process output failed
    #[error("I/O error while talking to model runtime: {0}")]
    Io(#[from] io::Error),

    /// The process exited with a failure status or was killed
    #[error("model runtime exited abnormally ({}): {stderr}", exit_label(.code))]
    AbnormalExit {
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Everything the process wrote to stderr
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Mock runtime for deterministic testing
///
/// Returns pre-configured responses without launching anything.
///
/// # Examples
///
/// ```
/// use diming_llm::MockRuntime;
/// use diming_domain::ModelRuntime;
///
/// let mut runtime = MockRuntime::default();
/// runtime.add_response("prompt1", r#"[{"place_name":"东海","count":2}]"#);
/// assert_eq!(runtime.invoke("prompt2", "m").unwrap(), "[]");
/// assert_eq!(runtime.invoke("prompt1", "m").unwrap(), r#"[{"place_name":"东海","count":2}]"#);
/// ```
#[derive(Debug, Clone)]
pub struct MockRuntime {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_model: Arc<Mutex<Option<String>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Output(String),
    Failure,
}

impl MockRuntime {
    /// Create a new MockRuntime with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_model: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockReply::Output(response.into()));
    }

    /// Configure to fail as if the process exited abnormally for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockReply::Failure);
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Model id seen by the most recent call
    pub fn last_model(&self) -> Option<String> {
        self.last_model.lock().unwrap().clone()
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl ModelRuntime for MockRuntime {
    type Error = ProcessError;

    fn invoke(&self, prompt: &str, model_id: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_model.lock().unwrap() = Some(model_id.to_string());

        let responses = self.responses.lock().unwrap();
        match responses.get(prompt) {
            Some(MockReply::Output(response)) => Ok(response.clone()),
            Some(MockReply::Failure) => Err(ProcessError::AbnormalExit {
                code: Some(1),
                stderr: "mock failure".to_string(),
            }),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_runtime_default() {
        let runtime = MockRuntime::new("Test response");
        let result = runtime.invoke("any prompt", "model");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_runtime_specific_responses() {
        let mut runtime = MockRuntime::default();
        runtime.add_response("hello", "world");
        runtime.add_response("foo", "bar");

        assert_eq!(runtime.invoke("hello", "m").unwrap(), "world");
        assert_eq!(runtime.invoke("foo", "m").unwrap(), "bar");
        assert_eq!(runtime.invoke("unknown", "m").unwrap(), "[]");
    }

    #[test]
    fn test_mock_runtime_call_count_shared_across_clones() {
        let runtime = MockRuntime::new("x");
        let clone = runtime.clone();

        runtime.invoke("a", "m").unwrap();
        clone.invoke("b", "m").unwrap();

        assert_eq!(runtime.call_count(), 2);
        assert_eq!(clone.call_count(), 2);
    }

    #[test]
    fn test_mock_runtime_records_model() {
        let runtime = MockRuntime::default();
        assert_eq!(runtime.last_model(), None);

        runtime.invoke("p", "qwen2.5:7b").unwrap();
        assert_eq!(runtime.last_model().as_deref(), Some("qwen2.5:7b"));
    }

    #[test]
    fn test_mock_runtime_error() {
        let mut runtime = MockRuntime::default();
        runtime.add_error("bad prompt");

        let result = runtime.invoke("bad prompt", "m");
        assert!(matches!(
            result.unwrap_err(),
            ProcessError::AbnormalExit { code: Some(1), .. }
        ));
    }

    #[test]
    fn test_abnormal_exit_display() {
        let err = ProcessError::AbnormalExit {
            code: None,
            stderr: "killed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "model runtime exited abnormally (terminated by signal): killed"
        );

        let err = ProcessError::AbnormalExit {
            code: Some(1),
            stderr: "model 'nope' not found".to_string(),
        };
        assert!(err.to_string().contains("exit code 1"));
    }
}
