//! CLI interface for the lltrace tool

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lltrace")]
#[command(about = "Trace LL(1) predictive parses against a parsing table")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive a token stream and print the trace and parse tree
    Parse(ParseArgs),

    /// Print every cell of a table document
    Table {
        /// Table document (JSON)
        #[arg(short, long)]
        table: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Table document (JSON)
    #[arg(short, long)]
    pub table: PathBuf,

    /// Whitespace-separated terminals
    #[arg(long, conflicts_with = "input")]
    pub tokens: Option<String>,

    /// File holding whitespace-separated terminals (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Start symbol, overriding the document's
    #[arg(short, long)]
    pub start: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Give up after this many moves
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Only print the trace
    #[arg(long)]
    pub no_tree: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Supported: text, json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from([
            "lltrace",
            "parse",
            "--table",
            "arith.json",
            "--tokens",
            "id + id",
            "--format",
            "JSON",
            "--max-steps",
            "100",
        ])
        .unwrap();

        let Commands::Parse(args) = cli.command else {
            panic!("expected the parse command");
        };
        assert_eq!(args.table, PathBuf::from("arith.json"));
        assert_eq!(args.tokens.as_deref(), Some("id + id"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.max_steps, Some(100));
        assert!(!args.no_tree);
    }

    #[test]
    fn tokens_and_input_conflict() {
        let result = Cli::try_parse_from([
            "lltrace", "parse", "-t", "a.json", "--tokens", "id", "--input", "tokens.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
    }
}
