//! Suggest command - turn a file's issue report into a cleaning manual.

use std::path::PathBuf;

use colored::Colorize;
use sifter::llm::split_issue_sections;
use sifter::{Assistant, Sifter};

use crate::cli::LlmArgs;

pub fn run(file: PathBuf, llm: LlmArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;

    let provider = super::build_provider(&llm)?.ok_or(
        "Suggestions need a language model. Pass --llm huggingface, ollama, or mock.",
    )?;

    let result = Sifter::new().analyze(&file)?;
    if result.issues.is_clean() {
        println!("{}", "No issues found - nothing to clean.".green());
        return Ok(());
    }

    println!(
        "{} {} with {}",
        "Requesting suggestions for".cyan().bold(),
        file.display().to_string().white(),
        provider.name()
    );

    let manual = Assistant::new(provider).cleaning_suggestions(&result.issues, &result.columns);
    super::report_fallback(manual.error.as_deref());

    let sections = split_issue_sections(&manual.value);
    if verbose {
        println!("{} sections", sections.len());
    }

    for section in sections {
        println!();
        println!("{}", section);
    }

    Ok(())
}
