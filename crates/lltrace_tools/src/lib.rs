//! lltrace tools - command-line access to the predictive driver
//!
//! This crate loads parsing tables from JSON documents and prints traces,
//! trees and table listings.

pub mod cli;
pub mod commands;
pub mod document;

pub use commands::{CommandError, ParseOptions, list_table, parse_tokens};
pub use document::TableDocument;
