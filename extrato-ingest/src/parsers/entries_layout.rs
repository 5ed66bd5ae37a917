//! Parser for the "entries / viewing period" checking-account layout.
//!
//! Expected extracted-text section:
//!   Lançamentos - período de visualização: 01/03/2024 a 31/03/2024
//!   data   lançamento                           valor (R$)     saldo (R$)
//!   01/03  SALDO ANTERIOR                                        1.000,00
//!   02/03  PIX ENVIADO MARKET XYZ                  120,50 D        879,50
//!
//! Pipeline: header scan → section → candidate lines → grammar chain →
//! year resolution → stable date sort → balance reconciliation.

use anyhow::Result;
use tracing::debug;

use extrato_core::dates::ReferenceDate;
use extrato_core::reconcile::reconcile;
use extrato_core::types::{ParsedStatement, ParsedTransaction, TransactionKind};

use super::StatementParser;
use crate::config::ParserConfig;
use crate::grammar::{LineParser, ParsedLine};
use crate::header::HeaderExtractor;
use crate::section::SectionExtractor;
use crate::segment::LineSegmenter;

/// Compiled grammars for one layout. Immutable after construction, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct EntriesLayoutParser {
    config: ParserConfig,
    header: HeaderExtractor,
    section: SectionExtractor,
    segmenter: LineSegmenter,
    lines: LineParser,
}

impl EntriesLayoutParser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            config,
            header: HeaderExtractor::new()?,
            section: SectionExtractor::new()?,
            segmenter: LineSegmenter::new()?,
            lines: LineParser::new()?,
        })
    }

    /// Parse extracted statement text. Never fails: unreadable input degrades
    /// to an empty statement dated today.
    pub fn parse(&self, text: &str) -> ParsedStatement {
        let today = self.config.today();
        if text.trim().is_empty() {
            return ParsedStatement::empty(today);
        }

        let header = self.header.extract(text);
        let section = self.section.extract(text);
        let candidates = self.segmenter.segment(section);

        let mut parsed: Vec<ParsedLine> = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match self.lines.parse_line(candidate) {
                Some(line) => parsed.push(line),
                None if self.config.debug => debug!(line = %candidate, "no grammar matched, line dropped"),
                None => {}
            }
        }

        let latest_transaction = parsed.iter().filter_map(|l| l.date.full()).max();
        let reference = ReferenceDate::resolve(
            header.period_end,
            header.latest_full_date,
            latest_transaction,
            today,
        );

        let mut transactions: Vec<ParsedTransaction> = parsed
            .into_iter()
            .filter_map(|line| self.to_transaction(line, &reference))
            .collect();
        // Stable: same-day rows keep statement order.
        transactions.sort_by_key(|t| t.date);

        let balances = reconcile(&mut transactions, header.opening_balance, header.closing_balance);

        debug!(
            candidates = candidates.len(),
            transactions = transactions.len(),
            inferred_balances = balances.inferred,
            reference = %reference.date,
            "parsed statement"
        );

        ParsedStatement {
            statement_date: reference.date,
            opening_balance: balances.opening,
            closing_balance: balances.closing,
            credit_limit: header.credit_limit.unwrap_or_default().round_dp(2),
            available_limit: header.available_limit.unwrap_or_default().round_dp(2),
            transactions,
        }
    }

    fn to_transaction(&self, line: ParsedLine, reference: &ReferenceDate) -> Option<ParsedTransaction> {
        let Some(date) = line.date.resolve(reference) else {
            if self.config.debug {
                debug!(date = ?line.date, description = %line.description, "invalid calendar date, line dropped");
            }
            return None;
        };

        Some(match line.kind {
            TransactionKind::Balance => {
                ParsedTransaction::balance_row(date, &line.description, line.balance.unwrap_or_default())
            }
            kind => ParsedTransaction::entry(date, &line.description, line.amount, line.balance, kind),
        })
    }
}

impl StatementParser for EntriesLayoutParser {
    fn name(&self) -> &'static str {
        "entries-layout"
    }

    fn parse(&self, text: &str) -> ParsedStatement {
        EntriesLayoutParser::parse(self, text)
    }
}
