use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Debit,
    Credit,
    /// Informational row ("PREVIOUS BALANCE"); only `balance` is meaningful.
    Balance,
}

impl TransactionKind {
    pub fn is_ledger_entry(self) -> bool {
        !matches!(self, TransactionKind::Balance)
    }
}

/// One dated row recovered from statement text.
///
/// Sign convention: debits are negative, credits positive, balance rows zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    /// Running balance after this row, if the statement printed one (or reconciliation filled it).
    pub balance: Option<Decimal>,
    pub kind: TransactionKind,
}

impl ParsedTransaction {
    /// Build a debit/credit row, re-signing `amount` to match `kind`.
    pub fn entry(
        date: NaiveDate,
        description: &str,
        amount: Decimal,
        balance: Option<Decimal>,
        kind: TransactionKind,
    ) -> Self {
        let amount = match kind {
            TransactionKind::Debit => -amount.abs(),
            TransactionKind::Credit => amount.abs(),
            TransactionKind::Balance => Decimal::ZERO,
        };
        Self {
            date,
            description: collapse_whitespace(description),
            amount: amount.round_dp(2),
            balance: balance.map(|b| b.round_dp(2)),
            kind,
        }
    }

    /// Build an informational balance row.
    pub fn balance_row(date: NaiveDate, description: &str, balance: Decimal) -> Self {
        Self::entry(date, description, Decimal::ZERO, Some(balance), TransactionKind::Balance)
    }
}

/// Reconciled statement handed to the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedStatement {
    pub statement_date: NaiveDate,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub credit_limit: Decimal,
    pub available_limit: Decimal,
    /// Sorted ascending by date; rows sharing a date keep their source order.
    pub transactions: Vec<ParsedTransaction>,
}

/// Debit/credit sums over ledger entries (balance rows excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Sum of debit amounts (zero or negative).
    pub debits: Decimal,
    pub credits: Decimal,
    pub net: Decimal,
    pub entry_count: usize,
}

impl ParsedStatement {
    /// The "no data" statement: zero balances, no rows.
    pub fn empty(statement_date: NaiveDate) -> Self {
        Self {
            statement_date,
            opening_balance: Decimal::ZERO,
            closing_balance: Decimal::ZERO,
            credit_limit: Decimal::ZERO,
            available_limit: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Rows that represent money movements; what gets stored as ledger entries.
    pub fn ledger_entries(&self) -> impl Iterator<Item = &ParsedTransaction> {
        self.transactions.iter().filter(|t| t.kind.is_ledger_entry())
    }

    pub fn totals(&self) -> StatementTotals {
        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;
        let mut entry_count = 0;

        for t in self.ledger_entries() {
            match t.kind {
                TransactionKind::Debit => debits = debits.saturating_add(t.amount),
                TransactionKind::Credit => credits = credits.saturating_add(t.amount),
                TransactionKind::Balance => {}
            }
            entry_count += 1;
        }

        StatementTotals {
            debits,
            credits,
            net: debits.saturating_add(credits),
            entry_count,
        }
    }
}

/// Trim and squeeze runs of whitespace into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
