//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::commands::{flatten_input, read_input};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use diming_extractor::{Extractor, ExtractorError};
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = flatten_input(&read_input(args.input.as_deref())?, args.input_format)?;
    let model = args
        .model
        .unwrap_or_else(|| config.extractor.model.clone());

    info!("Extracting place names with model '{}'", model);

    let extractor = Extractor::from_config(config.extractor.clone());
    let outcome = if args.chunk {
        extractor.extract_chunked(&text, &model)
    } else {
        extractor.extract(&text, &model)
    };

    let result = match outcome {
        Ok(result) => result,
        Err(ExtractorError::Parse(err)) => {
            eprintln!("{}", formatter.parse_failure(&err));
            return Err(ExtractorError::Parse(err).into());
        }
        Err(e) => return Err(e.into()),
    };

    let result = if args.merge {
        result.merge_counts()
    } else {
        result
    };

    println!("{}", formatter.format_mentions(&result)?);
    Ok(())
}
