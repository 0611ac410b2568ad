//! Diming Extractor
//!
//! Extracts place-name mentions from narrative text using a local language
//! model.
//!
//! # Overview
//!
//! The model is asked to answer with nothing but a JSON array of
//! `{"place_name", "count"}` objects. Local models usually comply, but they
//! sometimes wrap the array in prose or code fences, so the answer is treated
//! as untrusted text: it either decodes into a well-formed list or the call
//! fails with the raw output attached.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → ModelRuntime → raw output → parser → ExtractionResult
//! ```
//!
//! Each stage runs once. There is no retry; an empty list (`[]`) is the
//! model's way of saying "no places" and is a success.
//!
//! # Example Usage
//!
//! ```
//! use diming_extractor::{Extractor, ExtractorConfig};
//! use diming_llm::MockRuntime;
//!
//! let runtime = MockRuntime::new(r#"[{"place_name":"东海","count":2}]"#);
//! let extractor = Extractor::new(runtime, ExtractorConfig::default());
//!
//! let result = extractor.extract("途经东海龙宫，又回东海。", "qwen2.5:7b")?;
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.mentions()[0].place_name, "东海");
//! # Ok::<(), diming_extractor::ExtractorError>(())
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;


pub use chunking::TextChunker;
pub use config::{ChunkStrategy, ExtractorConfig};
pub use error::{ExtractorError, ParseError};
pub use extractor::Extractor;
pub use parser::parse_model_output;
pub use prompt::{build_prompt, PromptBuilder, EXCLUDED_CATEGORIES, TEXT_DELIMITER};

pub use diming_domain::{ExtractionRequest, ExtractionResult, PlaceMention};
