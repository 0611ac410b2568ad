//! Core Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_model_output;
use crate::prompt::PromptBuilder;
use diming_domain::{ExtractionRequest, ExtractionResult, ModelRuntime};
use diming_llm::{ProcessError, ProcessRuntime};
use std::time::Instant;
use tracing::{debug, info};

/// The Extractor turns narrative text into place mentions
///
/// Holds no per-call state. Concurrent callers may share one extractor when
/// the runtime allows it; each call still gets its own model process.
pub struct Extractor<R>
where
    R: ModelRuntime<Error = ProcessError>,
{
    runtime: R,
    config: ExtractorConfig,
}

impl Extractor<ProcessRuntime> {
    /// Create an Extractor that launches the runtime described by `config`
    pub fn from_config(config: ExtractorConfig) -> Self {
        let runtime = ProcessRuntime::new(config.runtime.clone());
        Self::new(runtime, config)
    }
}

impl<R> Extractor<R>
where
    R: ModelRuntime<Error = ProcessError>,
{
    /// Create a new Extractor
    pub fn new(runtime: R, config: ExtractorConfig) -> Self {
        Self { runtime, config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Runtime in use
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Extract place mentions from `text` using `model_id`
    ///
    /// Builds the prompt, runs the model once and parses its answer. The first
    /// failing stage decides the error; nothing is retried.
    pub fn extract(&self, text: &str, model_id: &str) -> Result<ExtractionResult, ExtractorError> {
        let start_time = Instant::now();

        info!(
            "Starting extraction with model '{}', text length {} chars",
            model_id,
            text.chars().count()
        );

        let prompt = PromptBuilder::new(text).build();
        debug!("Prompt length: {} chars", prompt.chars().count());

        let raw_output = self.runtime.invoke(&prompt, model_id)?;
        debug!("Model output length: {} chars", raw_output.chars().count());

        let result = parse_model_output(&raw_output)?;

        info!(
            "Extraction complete: {} mentions in {} ms",
            result.len(),
            start_time.elapsed().as_millis()
        );

        Ok(result)
    }

    /// Extract using the text and model carried by `request`
    pub fn extract_request(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractionResult, ExtractorError> {
        self.extract(&request.text, &request.model)
    }

    /// Extract using the configured default model
    pub fn extract_with_default_model(
        &self,
        text: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        self.extract(text, &self.config.model)
    }

    /// Extract from long text one chunk at a time
    ///
    /// Chunks run sequentially and their mentions are concatenated in chunk
    /// order. The same place found in two chunks appears twice; see
    /// [`ExtractionResult::merge_counts`]. The first failing chunk aborts.
    pub fn extract_chunked(
        &self,
        text: &str,
        model_id: &str,
    ) -> Result<ExtractionResult, ExtractorError> {
        let chunker = TextChunker::new(self.config.chunk_strategy, self.config.max_chunk_size);
        let chunks = chunker.chunk(text);

        if chunks.len() > 1 {
            info!("Text exceeds max chunk size, split into {} chunks", chunks.len());
        }

        let mut combined = ExtractionResult::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Extracting chunk {}/{}", idx + 1, chunks.len());
            combined.extend(self.extract(chunk, model_id)?);
        }

        Ok(combined)
    }
}
