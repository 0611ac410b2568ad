//! Parse command implementation.

use crate::cli::ParseArgs;
use crate::commands::read_input;
use crate::error::Result;
use crate::output::Formatter;
use diming_extractor::{parse_model_output, ExtractorError};

/// Execute the parse command.
pub fn execute_parse(args: ParseArgs, formatter: &Formatter) -> Result<()> {
    let raw_output = read_input(args.input.as_deref())?;
    let result = match parse_model_output(&raw_output) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", formatter.parse_failure(&err));
            return Err(ExtractorError::Parse(err).into());
        }
    };

    let result = if args.merge {
        result.merge_counts()
    } else {
        result
    };

    println!("{}", formatter.format_mentions(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::fs;

    #[test]
    fn test_parse_reads_model_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        fs::write(&path, r#"[{"place_name": "东海", "count": 1}]"#).unwrap();

        let args = ParseArgs {
            input: Some(path),
            merge: true,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        execute_parse(args, &formatter).unwrap();
    }

    #[test]
    fn test_parse_failure_keeps_raw_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reply.txt");
        fs::write(&path, "地名：东海").unwrap();

        let args = ParseArgs {
            input: Some(path),
            merge: false,
        };
        let formatter = Formatter::new(OutputFormat::Json, false);
        let result = execute_parse(args, &formatter);

        match result {
            Err(CliError::Extractor(ExtractorError::Parse(err))) => {
                assert_eq!(err.raw_output, "地名：东海");
            }
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }
}
