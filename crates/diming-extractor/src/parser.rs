//! Parse model output into place mentions
//!
//! Two tiers, never more:
//!
//! 1. Decode the trimmed output strictly as a JSON array of mentions.
//! 2. Otherwise slice from the first `[` to the last `]` and decode that
//!    strictly. This recovers arrays wrapped in prose or code fences.
//!
//! Either every element is well-formed or the whole output is rejected.

use crate::error::ParseError;
use diming_domain::{ExtractionResult, PlaceMention};
use tracing::debug;

/// Recover the place list from raw model output
pub fn parse_model_output(raw_output: &str) -> Result<ExtractionResult, ParseError> {
    let trimmed = raw_output.trim();

    let strict_error = match decode_strict(trimmed) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };
    debug!("Strict decode failed ({}), trying bracket slice", strict_error);

    let slice = bracket_slice(trimmed).ok_or_else(|| {
        ParseError::new(
            raw_output,
            format!("{}; no bracketed array found", strict_error),
        )
    })?;

    let result = decode_strict(slice).map_err(|e| ParseError::new(raw_output, e))?;
    debug!("Recovered {} mentions from bracket slice", result.len());
    Ok(result)
}

/// Decode `json` as a mention array and validate every element
fn decode_strict(json: &str) -> Result<ExtractionResult, String> {
    let mentions: Vec<PlaceMention> =
        serde_json::from_str(json).map_err(|e| format!("JSON parse error: {}", e))?;

    for (idx, mention) in mentions.iter().enumerate() {
        mention
            .validate()
            .map_err(|e| format!("mention {}: {}", idx, e))?;
    }

    Ok(ExtractionResult::from(mentions))
}

/// Substring from the first `[` to the last `]`, inclusive
///
/// Stray brackets in surrounding prose widen the slice, which then fails the
/// strict decode rather than yielding a partial list.
fn bracket_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
