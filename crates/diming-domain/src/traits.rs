//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for a model runtime that completes a prompt
///
/// Implemented by the infrastructure layer (diming-llm). Each call is
/// independent: implementations must not share a process or pipe between
/// invocations.
pub trait ModelRuntime {
    /// Error type for runtime operations
    type Error;

    /// Send `prompt` to `model_id` and return the full text output
    fn invoke(&self, prompt: &str, model_id: &str) -> Result<String, Self::Error>;
}
