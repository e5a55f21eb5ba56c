//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sifter: data-quality checks for CSV files
#[derive(Parser)]
#[command(name = "sifter")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and report quality issues
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Analyze a data file and ask a model for cleaning suggestions
    Suggest {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Ask a model to narrate what a data file contains
    Story {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Start the HTTP API and web UI
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        #[command(flatten)]
        llm: LlmArgs,

        /// Maximum upload size in megabytes
        #[arg(long, default_value = "25")]
        max_upload_mb: usize,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
}

/// Language-model selection shared by commands that use one.
#[derive(clap::Args, Clone, Debug)]
pub struct LlmArgs {
    /// LLM provider to use
    #[arg(long, default_value = "none")]
    pub llm: LlmProviderChoice,

    /// Model to use (provider-specific, e.g., "meta-llama/Meta-Llama-3-8B-Instruct", "llama3")
    #[arg(long)]
    pub model: Option<String>,
}

/// LLM provider choice
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LlmProviderChoice {
    /// No LLM - assistant features disabled
    #[default]
    None,
    /// Hugging Face inference router (requires HF_TOKEN)
    HuggingFace,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock provider for testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "huggingface" | "hf" => Ok(LlmProviderChoice::HuggingFace),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, huggingface, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::HuggingFace => write!(f, "huggingface"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!("hf".parse::<LlmProviderChoice>().unwrap(), LlmProviderChoice::HuggingFace);
        assert_eq!("LOCAL".parse::<LlmProviderChoice>().unwrap(), LlmProviderChoice::Ollama);
        assert!("gpt".parse::<LlmProviderChoice>().is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["sifter", "serve", "--llm", "mock"]).unwrap();
        match cli.command {
            Commands::Serve {
                host,
                port,
                llm,
                max_upload_mb,
                no_open,
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8000);
                assert_eq!(llm.llm, LlmProviderChoice::Mock);
                assert_eq!(max_upload_mb, 25);
                assert!(!no_open);
            }
            _ => panic!("expected serve"),
        }
    }
}
