//! Bank-layout parsers. Each layout owns its grammars and turns extracted text
//! into a reconciled [`ParsedStatement`].

use extrato_core::types::ParsedStatement;

pub mod entries_layout;

pub use entries_layout::EntriesLayoutParser;

/// One statement layout. Implementations never fail on malformed text.
pub trait StatementParser: Send + Sync {
    fn name(&self) -> &'static str;

    fn parse(&self, text: &str) -> ParsedStatement;
}
