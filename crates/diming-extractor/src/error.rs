//! Error types for the Extractor

use diming_llm::ProcessError;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Stage errors are wrapped as-is so callers can tell a runtime failure from
/// unusable output.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The model process failed to start or exited abnormally
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Output came back but held no recoverable place list
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Model output that could not be decoded into a place list
///
/// Carries the untouched output so a caller can show what the model said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not recover a place list from model output: {reason}")]
pub struct ParseError {
    /// Output exactly as returned by the runtime
    pub raw_output: String,

    /// Why the last decoding attempt failed
    pub reason: String,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(raw_output: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            raw_output: raw_output.into(),
            reason: reason.into(),
        }
    }
}
