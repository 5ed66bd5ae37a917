//! extrato-ingest: turn extracted statement text into a reconciled statement.
//!
//! The text is assumed to come out of an upstream PDF/OCR step already;
//! nothing here touches files or the network.

pub mod config;
pub mod grammar;
pub mod header;
pub mod parsers;
pub mod section;
pub mod segment;

use anyhow::Result;

pub use config::ParserConfig;
pub use extrato_core::types::{ParsedStatement, ParsedTransaction, StatementTotals, TransactionKind};
pub use parsers::{EntriesLayoutParser, StatementParser};

/// Parse one block of statement text with the entries layout.
///
/// Only grammar compilation can fail; the text itself never produces an error.
pub fn parse_statement_text(text: &str, config: &ParserConfig) -> Result<ParsedStatement> {
    let parser = EntriesLayoutParser::new(config.clone())?;
    Ok(parser.parse(text))
}
