//! Statement-level fields scanned from the full text (not just the entries block).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use extrato_core::dates::{DATE_PATTERN, PartialDate};
use extrato_core::money::{MONEY_PATTERN, parse_decimal};

/// Every field is optional; a statement without a header is still parseable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub period_end: Option<NaiveDate>,
    /// Latest `DD/MM/YYYY` found anywhere in the text.
    pub latest_full_date: Option<NaiveDate>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    pub credit_limit: Option<Decimal>,
    pub available_limit: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    period: Regex,
    full_date: Regex,
    opening: Regex,
    closing: Regex,
    credit_limit: Regex,
    available_limit: Regex,
}

fn labeled_amount(labels: &str) -> Result<Regex> {
    Regex::new(&format!(
        r"(?i)\b(?:{labels})\b[^\d\-\n]{{0,30}}?(?:{DATE_PATTERN}[^\d\-\n]{{0,10}}?)?(?P<value>{MONEY_PATTERN})"
    ))
    .with_context(|| format!("compile header pattern for {labels}"))
}

impl HeaderExtractor {
    pub fn new() -> Result<Self> {
        let period = Regex::new(concat!(
            r"(?i)\bper[íi]od[oe]?\b[^\n]{0,60}?\b(?:from|de)\s+\d{2}/\d{2}/\d{4}",
            r"\s+(?:to|a|at[ée])\s+(?P<end>\d{2}/\d{2}/\d{4})"
        ))
        .context("compile statement period pattern")?;
        let full_date = Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").context("compile full date pattern")?;

        Ok(Self {
            period,
            full_date,
            opening: labeled_amount(
                r"previous\s+balance|initial\s+balance|opening\s+balance|saldo\s+anterior|saldo\s+inicial",
            )?,
            closing: labeled_amount(
                r"final\s+balance|current\s+balance|closing\s+balance|saldo\s+final|saldo\s+atual",
            )?,
            credit_limit: labeled_amount(r"credit\s+limit|limite\s+de\s+cr[ée]dito|limite\s+total")?,
            available_limit: labeled_amount(r"available\s+limit|limite\s+dispon[íi]vel")?,
        })
    }

    pub fn extract(&self, text: &str) -> HeaderFields {
        let period_end = self
            .period
            .captures(text)
            .and_then(|caps| full_date(&caps["end"]));

        let latest_full_date = self
            .full_date
            .find_iter(text)
            .filter_map(|m| full_date(m.as_str()))
            .max();

        HeaderFields {
            period_end,
            latest_full_date,
            opening_balance: first_amount(&self.opening, text),
            closing_balance: first_amount(&self.closing, text),
            credit_limit: first_amount(&self.credit_limit, text),
            available_limit: first_amount(&self.available_limit, text),
        }
    }
}

fn full_date(s: &str) -> Option<NaiveDate> {
    PartialDate::parse(s)?.full()
}

fn first_amount(re: &Regex, text: &str) -> Option<Decimal> {
    re.captures(text)
        .and_then(|caps| parse_decimal(&caps["value"]))
}
