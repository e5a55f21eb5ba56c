//! Story command - narrate a data file for non-technical readers.

use std::path::PathBuf;

use colored::Colorize;
use sifter::{Assistant, Sifter};

use crate::cli::LlmArgs;

pub fn run(file: PathBuf, llm: LlmArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;

    let provider = super::build_provider(&llm)?
        .ok_or("Stories need a language model. Pass --llm huggingface, ollama, or mock.")?;

    let result = Sifter::new().analyze(&file)?;

    if verbose {
        println!("{}", "Describe:".yellow().bold());
        println!("{}", result.preview.describe);
        println!();
    }

    let story = Assistant::new(provider).data_story(
        &result.preview.head,
        &result.preview.describe,
        &result.columns,
    );
    super::report_fallback(story.error.as_deref());

    println!("{}", story.value);
    Ok(())
}
