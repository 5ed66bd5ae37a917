//! Human-readable rendering of a parsed statement.

use extrato_ingest::{ParsedStatement, TransactionKind};
use std::fmt::Write;

pub fn render_table(stmt: &ParsedStatement) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Statement date   {}", stmt.statement_date);
    let _ = writeln!(out, "Opening balance  {:>12}", stmt.opening_balance);
    let _ = writeln!(out, "Closing balance  {:>12}", stmt.closing_balance);
    let _ = writeln!(out, "Credit limit     {:>12}", stmt.credit_limit);
    let _ = writeln!(out, "Available limit  {:>12}", stmt.available_limit);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<10}  {:<40}  {:>12}  {:>12}  {}", "DATE", "DESCRIPTION", "AMOUNT", "BALANCE", "KIND");

    for t in &stmt.transactions {
        let balance = t.balance.map(|b| b.to_string()).unwrap_or_default();
        let amount = match t.kind {
            TransactionKind::Balance => String::new(),
            _ => t.amount.to_string(),
        };
        let _ = writeln!(
            out,
            "{:<10}  {:<40}  {:>12}  {:>12}  {:?}",
            t.date,
            truncate(&t.description, 40),
            amount,
            balance,
            t.kind
        );
    }

    out
}

pub fn render_summary(stmt: &ParsedStatement) -> String {
    let totals = stmt.totals();
    let mut out = String::new();

    let _ = writeln!(out, "Statement date   {}", stmt.statement_date);
    let _ = writeln!(out, "Entries          {}", totals.entry_count);
    let _ = writeln!(out, "Debits           {:>12}", totals.debits);
    let _ = writeln!(out, "Credits          {:>12}", totals.credits);
    let _ = writeln!(out, "Net              {:>12}", totals.net);
    let _ = writeln!(out, "Opening balance  {:>12}", stmt.opening_balance);
    let _ = writeln!(out, "Closing balance  {:>12}", stmt.closing_balance);

    let drift = stmt
        .opening_balance
        .saturating_add(totals.net)
        .saturating_sub(stmt.closing_balance);
    if !drift.is_zero() {
        let _ = writeln!(out, "warning: opening + net differs from closing by {drift}");
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut t: String = s.chars().take(max - 1).collect();
    t.push('…');
    t
}
