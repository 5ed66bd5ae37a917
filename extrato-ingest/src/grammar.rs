//! Entry-line grammars, tried in order; first match wins.
//!
//! Expected rows after PDF-to-text:
//!   01/03       MARKET XYZ                         120,50 D      1.000,00
//!   05/03/2024  SALARY                           3.000,00 C
//!   06/03       SALDO ANTERIOR                                   4.000,00

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::trace;

use extrato_core::dates::{DATE_PATTERN, PartialDate};
use extrato_core::money::{MONEY_PATTERN, normalize_glyphs, parse_decimal};
use extrato_core::types::{TransactionKind, collapse_whitespace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `date description amount [marker] balance`
    WithBalance,
    /// `date description amount`; only balance rows resolve here.
    BalanceOnly,
    /// `date description amount [marker]`
    NoBalance,
}

impl Grammar {
    pub const CHAIN: [Grammar; 3] = [Grammar::WithBalance, Grammar::BalanceOnly, Grammar::NoBalance];

    fn pattern(self) -> String {
        let head = format!(r"^\s*(?P<date>{DATE_PATTERN})\s+(?P<desc>.+?)\s+");
        let marker = r"(?:\s*(?P<marker>[DCdc]))?";
        match self {
            Grammar::WithBalance => {
                format!(r"{head}(?P<amount>{MONEY_PATTERN}){marker}\s+(?P<balance>{MONEY_PATTERN})\s*$")
            }
            Grammar::BalanceOnly => format!(r"{head}(?P<amount>{MONEY_PATTERN})\s*$"),
            Grammar::NoBalance => format!(r"{head}(?P<amount>{MONEY_PATTERN}){marker}\s*$"),
        }
    }
}

/// Debit/credit letter printed next to an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Debit,
    Credit,
}

impl Marker {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'D' => Some(Marker::Debit),
            'C' => Some(Marker::Credit),
            _ => None,
        }
    }
}

/// Fields captured by a grammar, still as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub date: &'a str,
    pub description: &'a str,
    pub amount: &'a str,
    pub marker: Option<Marker>,
    pub balance: Option<&'a str>,
}

impl<'a> RawLine<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        Some(Self {
            date: caps.name("date")?.as_str(),
            description: caps.name("desc")?.as_str(),
            amount: caps.name("amount")?.as_str(),
            marker: caps
                .name("marker")
                .and_then(|m| m.as_str().chars().next())
                .and_then(Marker::from_char),
            balance: caps.name("balance").map(|m| m.as_str()),
        })
    }
}

/// A matched entry line with normalized values; the year may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub date: PartialDate,
    pub description: String,
    /// Canonically signed: debits negative, credits positive, balance rows zero.
    pub amount: Decimal,
    pub balance: Option<Decimal>,
    pub kind: TransactionKind,
    pub grammar: Grammar,
}

#[derive(Debug, Clone)]
pub struct LineParser {
    chain: Vec<(Grammar, Regex)>,
    balance_row: Regex,
}

impl LineParser {
    pub fn new() -> Result<Self> {
        let chain = Grammar::CHAIN
            .iter()
            .map(|&g| {
                Regex::new(&g.pattern())
                    .with_context(|| format!("compile {g:?} grammar"))
                    .map(|re| (g, re))
            })
            .collect::<Result<Vec<_>>>()?;

        let balance_row = Regex::new(concat!(
            r"(?i)previous\s+balance|available\s+balance|^balance(?:\s|$)",
            r"|saldo\s+anterior|saldo\s+dispon[íi]vel|^saldo(?:\s|$)"
        ))
        .context("compile balance-row pattern")?;

        Ok(Self { chain, balance_row })
    }

    pub fn is_balance_row(&self, description: &str) -> bool {
        self.balance_row.is_match(description.trim())
    }

    /// Parse one candidate line. `None` means no grammar matched.
    pub fn parse_line(&self, line: &str) -> Option<ParsedLine> {
        let line = normalize_glyphs(line);

        for (grammar, re) in &self.chain {
            let Some(caps) = re.captures(&line) else {
                continue;
            };
            let Some(raw) = RawLine::from_captures(&caps) else {
                continue;
            };

            let parsed = match grammar {
                Grammar::WithBalance => self.resolve_entry(&raw, *grammar),
                Grammar::BalanceOnly => {
                    if !self.is_balance_row(raw.description) {
                        // Ordinary rows share this shape; let the next grammar take it.
                        continue;
                    }
                    self.resolve_balance_row(&raw, *grammar)
                }
                Grammar::NoBalance => {
                    if self.is_balance_row(raw.description) {
                        self.resolve_balance_row(&raw, *grammar)
                    } else {
                        self.resolve_entry(&raw, *grammar)
                    }
                }
            };

            if let Some(parsed) = parsed {
                trace!(grammar = ?grammar, line = %line, "entry line matched");
                return Some(parsed);
            }
        }

        None
    }

    fn resolve_entry(&self, raw: &RawLine<'_>, grammar: Grammar) -> Option<ParsedLine> {
        let amount = parse_decimal(raw.amount)?;
        let balance = match raw.balance {
            Some(b) => Some(parse_decimal(b)?),
            None => None,
        };

        let kind = match raw.marker {
            Some(Marker::Debit) => TransactionKind::Debit,
            Some(Marker::Credit) => TransactionKind::Credit,
            None if amount < Decimal::ZERO => TransactionKind::Debit,
            None => TransactionKind::Credit,
        };
        let amount = match kind {
            TransactionKind::Debit => -amount.abs(),
            _ => amount.abs(),
        };

        Some(ParsedLine {
            date: PartialDate::parse(raw.date)?,
            description: collapse_whitespace(raw.description),
            amount,
            balance,
            kind,
            grammar,
        })
    }

    fn resolve_balance_row(&self, raw: &RawLine<'_>, grammar: Grammar) -> Option<ParsedLine> {
        Some(ParsedLine {
            date: PartialDate::parse(raw.date)?,
            description: collapse_whitespace(raw.description),
            amount: Decimal::ZERO,
            balance: Some(parse_decimal(raw.amount)?),
            kind: TransactionKind::Balance,
            grammar,
        })
    }
}
