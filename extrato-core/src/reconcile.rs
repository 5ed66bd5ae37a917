//! Running-total reconciliation: `balance(n) = balance(n-1) + amount(n)`.

use rust_decimal::Decimal;
use tracing::debug;

use crate::types::ParsedTransaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledBalances {
    pub opening: Decimal,
    pub closing: Decimal,
    /// Number of rows whose balance was computed rather than printed.
    pub inferred: usize,
}

/// Fill missing balances in `transactions` (already sorted by date) and settle
/// the opening and closing balances.
///
/// Printed balances are never overwritten; they reset the running total instead.
/// Arithmetic saturates at `Decimal::MAX`/`MIN` rather than panicking.
pub fn reconcile(
    transactions: &mut [ParsedTransaction],
    opening: Option<Decimal>,
    closing: Option<Decimal>,
) -> ReconciledBalances {
    let opening = opening.unwrap_or_else(|| {
        transactions
            .first()
            .and_then(|first| first.balance.map(|b| b.saturating_sub(first.amount)))
            .unwrap_or(Decimal::ZERO)
    });

    let mut inferred = 0;
    let mut running = None;

    if transactions.iter().any(|t| t.balance.is_none()) {
        let mut total = opening;
        for t in transactions.iter_mut() {
            match t.balance {
                Some(printed) => total = printed,
                None => {
                    total = total.saturating_add(t.amount).round_dp(2);
                    t.balance = Some(total);
                    inferred += 1;
                }
            }
        }
        running = Some(total);
    }

    let closing = closing
        .or(running)
        .or_else(|| transactions.last().and_then(|t| t.balance))
        .unwrap_or(Decimal::ZERO);

    debug!(%opening, %closing, inferred, "reconciled balances");

    ReconciledBalances {
        opening: opening.round_dp(2),
        closing: closing.round_dp(2),
        inferred,
    }
}
