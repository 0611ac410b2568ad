//! Command implementations.

pub mod configure;
pub mod extract;
pub mod parse;
pub mod prompt;

pub use self::configure::execute_config;
pub use self::extract::execute_extract;
pub use self::parse::execute_parse;
pub use self::prompt::execute_prompt;

use crate::cli::InputFormat;
use crate::error::Result;
use diming_domain::{flatten_sources, Page, Section};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read the whole input file, or stdin when no path (or "-") is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Turn raw input into the single text the extractor consumes.
///
/// Sections and pages are flattened in the order given.
pub fn flatten_input(input: &str, format: InputFormat) -> Result<String> {
    match format {
        InputFormat::Text => Ok(input.to_string()),
        InputFormat::Sections => {
            let sections: Vec<Section> = serde_json::from_str(input)?;
            Ok(flatten_sources(&sections))
        }
        InputFormat::Pages => {
            let pages: Vec<Page> = serde_json::from_str(input)?;
            Ok(flatten_sources(&pages))
        }
    }
}
