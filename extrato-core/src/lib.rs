//! extrato-core: statement types, locale-aware amount/date normalization, and
//! balance reconciliation. No text scanning lives here; see `extrato-ingest`.

pub mod dates;
pub mod money;
pub mod reconcile;
pub mod types;

pub use dates::{PartialDate, ReferenceDate, ReferenceSource, parse_date};
pub use money::{normalize_glyphs, parse_decimal};
pub use reconcile::{ReconciledBalances, reconcile};
pub use types::{ParsedStatement, ParsedTransaction, StatementTotals, TransactionKind};
