//! Diming Domain Layer
//!
//! Core data model for place-name extraction. This crate performs no I/O; it
//! defines the records the pipeline produces, the shapes upstream document
//! readers hand over, and the trait seam behind which the model runtime lives.
//!
//! ## Key Concepts
//!
//! - **Mention**: one (place name, occurrence count) record reported by the model
//! - **Extraction result**: the ordered mentions for one piece of text
//! - **Text source**: a section or page that flattens into plain text
//! - **Model runtime**: anything that turns a prompt into free text

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mention;
pub mod request;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use mention::{ExtractionResult, PlaceMention};
pub use request::ExtractionRequest;
pub use source::{flatten_sources, Page, Section, TextSource};
pub use traits::ModelRuntime;
