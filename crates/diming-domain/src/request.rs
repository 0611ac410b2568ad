//! Request module - input to a single extraction

/// Text to analyze plus the model that should analyze it
///
/// Created per call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Raw text, any length
    pub text: String,

    /// Model identifier passed to the runtime (e.g. "qwen2.5:7b")
    pub model: String,
}

impl ExtractionRequest {
    /// Create a new request
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}
