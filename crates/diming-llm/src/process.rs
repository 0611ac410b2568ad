//! External process runtime
//!
//! Runs a local model by launching its runtime binary once per call. With the
//! default configuration this is `ollama run <model>`.
//!
//! # Behaviour
//!
//! - The prompt is written to stdin in full, then stdin is closed
//! - The call blocks until the process exits and returns all of stdout
//! - Anything on stderr is logged as a warning; many runtimes print progress there
//! - A non-zero exit (including "model not found") or a signal is an error
//! - There is no timeout; callers that need one must kill the process themselves
//!
//! # Examples
//!
//! ```no_run
//! use diming_llm::ProcessRuntime;
//! use diming_domain::ModelRuntime;
//!
//! let runtime = ProcessRuntime::default();
//! let output = runtime.invoke("列出地名：东海", "qwen2.5:7b")?;
//! # Ok::<(), diming_llm::ProcessError>(())
//! ```

use crate::ProcessError;
use diming_domain::ModelRuntime;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::process::{ChildStdin, Command, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Default runtime binary
pub const DEFAULT_PROGRAM: &str = "ollama";

/// Default arguments placed before the model id
pub const DEFAULT_ARGS: &[&str] = &["run"];

/// How to launch the model runtime
///
/// The command line is `program args... <model_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Runtime binary, resolved through `PATH`
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the model id
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

impl RuntimeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("runtime program must not be empty".to_string());
        }
        Ok(())
    }
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_args() -> Vec<String> {
    DEFAULT_ARGS.iter().map(|a| a.to_string()).collect()
}

/// Model runtime backed by a child process
///
/// Holds only launch settings, so one instance can serve concurrent callers;
/// each call gets its own process and pipes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRuntime {
    config: RuntimeConfig,
}

impl ProcessRuntime {
    /// Create a runtime from launch settings
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Launch settings in use
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run the model once and collect its stdout
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The runtime binary cannot be started (`ProcessError::Spawn`)
    /// - Collecting output fails (`ProcessError::Io`)
    /// - The process exits non-zero or is killed (`ProcessError::AbnormalExit`)
    pub fn run(&self, prompt: &str, model_id: &str) -> Result<String, ProcessError> {
        debug!(
            "Launching '{} {} {}' with {} byte prompt",
            self.config.program,
            self.config.args.join(" "),
            model_id,
            prompt.len()
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(model_id)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            ProcessError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "child stdin was not captured",
            ))
        })?;

        // Feed stdin from its own thread so a child that writes before it has
        // drained its input cannot block on a full stdout pipe.
        let payload = prompt.to_owned();
        let writer = thread::spawn(move || write_prompt(stdin, &payload));

        let output = child.wait_with_output()?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Model runtime did not accept the full prompt: {}", e),
            Err(_) => warn!("Prompt writer thread panicked"),
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(ProcessError::AbnormalExit {
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!("Model runtime stderr ({}): {}", model_id, stderr);
        }

        let stdout = decode_stdout(output.stdout, model_id);
        debug!("Model runtime returned {} bytes", stdout.len());

        Ok(stdout)
    }
}

/// Decode stdout as UTF-8, replacing invalid sequences with U+FFFD
fn decode_stdout(bytes: Vec<u8>, model_id: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!(
                "Model runtime output is not valid UTF-8 ({}): {}; invalid bytes replaced",
                model_id,
                e.utf8_error()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Write the whole prompt, then close stdin by dropping it
fn write_prompt(mut stdin: ChildStdin, prompt: &str) -> io::Result<()> {
    stdin.write_all(prompt.as_bytes())?;
    stdin.flush()
}

impl ModelRuntime for ProcessRuntime {
    type Error = ProcessError;

    fn invoke(&self, prompt: &str, model_id: &str) -> Result<String, Self::Error> {
        self.run(prompt, model_id)
    }
}
