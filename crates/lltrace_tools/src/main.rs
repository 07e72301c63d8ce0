//! lltrace CLI
//!
//! Drive token streams against LL(1) parsing tables from the command line.

use clap::Parser;
use lltrace_tools::cli::{Cli, Commands};
use lltrace_tools::{CommandError, ParseOptions, TableDocument, list_table, parse_tokens};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

fn read_file(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn load_document(path: &Path) -> Result<TableDocument, CommandError> {
    log::debug!("loading table document {}", path.display());
    Ok(TableDocument::from_json(&read_file(path)?)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Parse(args) => {
            let document = load_document(&args.table)?;
            let tokens = match (args.tokens, &args.input) {
                (Some(tokens), _) => tokens,
                (None, Some(path)) => read_file(path)?,
                (None, None) => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text).map_err(|source| CommandError::Io {
                        path: "<stdin>".to_string(),
                        source,
                    })?;
                    text
                }
            };
            let options = ParseOptions {
                start: args.start,
                format: args.format,
                max_steps: args.max_steps,
                with_tree: !args.no_tree,
            };
            parse_tokens(&document, &tokens, &options)?
        }
        Commands::Table { table } => list_table(&load_document(&table)?)?,
    };

    print!("{output}");
    Ok(())
}
