//! Command implementations, kept free of file and terminal I/O.

use crate::cli::OutputFormat;
use crate::document::TableDocument;
use lltrace::driver::{DriverConfig, drive_with_config};
use lltrace::error::{DriveError, GrammarError, ParseError};
use lltrace::grammar::{NonTerminal, TableEntry, Terminal};
use lltrace::render::{RenderConfig, render_trace, render_tree};
use lltrace::tree::build_tree;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("failed to write JSON output: {0}")]
    Output(#[source] serde_json::Error),

    #[error("invalid table: {0}")]
    Grammar(#[from] GrammarError),

    #[error("no start symbol given and the table document names none")]
    MissingStart,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<DriveError> for CommandError {
    fn from(error: DriveError) -> Self {
        Self::Parse(error.into())
    }
}

/// Settings for [`parse_tokens`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub start: Option<String>,
    pub format: OutputFormat,
    pub max_steps: Option<usize>,
    pub with_tree: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            start: None,
            format: OutputFormat::Text,
            max_steps: None,
            with_tree: true,
        }
    }
}

/// Drive whitespace-separated `tokens` against the document's table and
/// format the result.
///
/// # Errors
///
/// Fails when the document or a token does not classify, when no start
/// symbol is known, or when the input is rejected.
pub fn parse_tokens(document: &TableDocument, tokens: &str, options: &ParseOptions) -> Result<String, CommandError> {
    let table = document.to_table()?;
    let start = options
        .start
        .as_deref()
        .or(document.start.as_deref())
        .ok_or(CommandError::MissingStart)?;
    let start = NonTerminal::new(start)?;
    let tokens = tokens
        .split_whitespace()
        .map(Terminal::new)
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("driving {} tokens from `{start}`", tokens.len());

    let config = DriverConfig {
        max_steps: options.max_steps,
    };
    let trace = drive_with_config(&start, &table, &tokens, config)?;
    let tree = if options.with_tree {
        Some(build_tree(&trace).map_err(ParseError::from)?)
    } else {
        None
    };

    match options.format {
        OutputFormat::Text => {
            let render = RenderConfig::default();
            let mut out = render_trace(&trace, &render);
            if let Some(tree) = &tree {
                out.push('\n');
                out.push_str(&render_tree(tree, &render));
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut value = serde_json::json!({ "trace": trace.to_records() });
            if let Some(tree) = tree {
                value["tree"] = serde_json::to_value(tree).map_err(CommandError::Output)?;
            }
            let text = serde_json::to_string_pretty(&value).map_err(CommandError::Output)?;
            Ok(text + "\n")
        }
    }
}

/// List every cell as `M[N, a] = N → α`, sorted by row then lookahead.
///
/// # Errors
///
/// Fails when the document does not describe a valid table.
pub fn list_table(document: &TableDocument) -> Result<String, CommandError> {
    let table = document.to_table()?;
    let mut out = String::new();
    for (left, lookahead, entry) in table.sorted_entries() {
        let cell = match entry {
            TableEntry::Production(production) => production.to_string(),
            TableEntry::Error => "error".to_string(),
        };
        out.push_str(&format!("M[{left}, {lookahead}] = {cell}\n"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lltrace::testing::arithmetic_table;

    fn arithmetic_document() -> TableDocument {
        TableDocument::from_table(Some("E"), &arithmetic_table())
    }

    #[test]
    fn text_output_has_trace_and_tree() {
        let out = parse_tokens(&arithmetic_document(), "id", &ParseOptions::default()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "step | stack           | input           | action");
        assert_eq!(lines[2], "0    | $ E             | id $            | start");
        assert!(lines.contains(&"E → [T E']"));
        assert!(lines.contains(&"      id (id)"));
    }

    #[test]
    fn no_tree_prints_only_the_trace() {
        let options = ParseOptions {
            with_tree: false,
            ..ParseOptions::default()
        };
        let out = parse_tokens(&arithmetic_document(), "id", &options).unwrap();
        assert_eq!(out.lines().count(), 9);
    }

    #[test]
    fn json_output_has_records_and_tree() {
        let options = ParseOptions {
            format: OutputFormat::Json,
            ..ParseOptions::default()
        };
        let out = parse_tokens(&arithmetic_document(), "id * num", &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let trace = value["trace"].as_array().unwrap();
        assert_eq!(trace[0]["step"], 0);
        assert_eq!(trace[0]["stack"], serde_json::json!(["$", "E"]));
        assert!(trace[0].get("production").is_none());
        assert_eq!(value["tree"]["symbol"], "E");
    }

    #[test]
    fn start_override_and_missing_start() {
        let mut document = arithmetic_document();
        document.start = None;
        assert!(matches!(
            parse_tokens(&document, "id", &ParseOptions::default()),
            Err(CommandError::MissingStart)
        ));

        let options = ParseOptions {
            start: Some("F".into()),
            ..ParseOptions::default()
        };
        assert!(parse_tokens(&document, "( id )", &options).is_ok());
    }

    #[test]
    fn rejected_input_reports_position() {
        let err = parse_tokens(&arithmetic_document(), "id +", &ParseOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error at position 2: no production for `T` on `$`"
        );
    }

    #[test]
    fn step_limit_is_passed_through() {
        let options = ParseOptions {
            max_steps: Some(3),
            ..ParseOptions::default()
        };
        let err = parse_tokens(&arithmetic_document(), "id", &options).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Parse(ParseError::Drive(DriveError::StepLimitExceeded { limit: 3 }))
        ));
    }

    #[test]
    fn output_and_document_errors_are_worded_apart() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let output = CommandError::Output(source);
        assert!(output.to_string().starts_with("failed to write JSON output: "));

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let document = CommandError::from(source);
        assert!(matches!(document, CommandError::Document(_)));
        assert!(document.to_string().starts_with("invalid table document: "));
    }

    #[test]
    fn table_listing_is_sorted() {
        let document = TableDocument::from_json(
            r#"{ "table": { "S": { "b": "error", "a": ["a", "S"], "$": [] } } }"#,
        )
        .unwrap();
        let out = list_table(&document).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&"M[S, a] = S → a S"));
        assert!(lines.contains(&"M[S, b] = error"));
        assert!(lines.contains(&"M[S, $] = S → ε"));
    }
}
