//! Prompt command implementation.

use crate::cli::PromptArgs;
use crate::commands::read_input;
use crate::error::Result;
use diming_extractor::build_prompt;

/// Execute the prompt command.
pub fn execute_prompt(args: PromptArgs) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    println!("{}", build_prompt(&text));
    Ok(())
}
