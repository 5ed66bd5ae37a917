//! `DD/MM` and `DD/MM/YYYY` dates, and the year fallback for the short form.

use chrono::{Datelike, NaiveDate};

/// Regex fragment for a statement date token.
pub const DATE_PATTERN: &str = r"\d{2}/\d{2}(?:/\d{4})?";

/// A date as printed on the statement; the year may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub day: u32,
    pub month: u32,
    pub year: Option<i32>,
}

impl PartialDate {
    pub fn parse(s: &str) -> Option<Self> {
        let mut it = s.trim().split('/');
        let day = parse_fixed(it.next()?, 2)?;
        let month = parse_fixed(it.next()?, 2)?;
        let year = match it.next() {
            Some(y) => Some(parse_fixed(y, 4)? as i32),
            None => None,
        };
        if it.next().is_some() || !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { day, month, year })
    }

    /// The date when the year was printed, without guessing.
    pub fn full(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month, self.day)
    }

    /// Fill a missing year with the reference year, as is.
    pub fn resolve(&self, reference: &ReferenceDate) -> Option<NaiveDate> {
        if self.year.is_some() {
            return self.full();
        }
        NaiveDate::from_ymd_opt(reference.date.year(), self.month, self.day)
    }
}

fn parse_fixed(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse `DD/MM/YYYY`, or `DD/MM` using `reference` for the year.
pub fn parse_date(s: &str, reference: &ReferenceDate) -> Option<NaiveDate> {
    PartialDate::parse(s)?.resolve(reference)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSource {
    StatementPeriod,
    LatestTextDate,
    LatestTransaction,
    Today,
}

/// The date that supplies the year for short `DD/MM` dates, and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDate {
    pub date: NaiveDate,
    pub source: ReferenceSource,
}

impl ReferenceDate {
    /// First available of: period end, latest full date in the text,
    /// latest already-parsed transaction, today.
    pub fn resolve(
        period_end: Option<NaiveDate>,
        latest_text_date: Option<NaiveDate>,
        latest_transaction: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let (date, source) = period_end
            .map(|d| (d, ReferenceSource::StatementPeriod))
            .or_else(|| latest_text_date.map(|d| (d, ReferenceSource::LatestTextDate)))
            .or_else(|| latest_transaction.map(|d| (d, ReferenceSource::LatestTransaction)))
            .unwrap_or((today, ReferenceSource::Today));
        Self { date, source }
    }

    pub fn today(today: NaiveDate) -> Self {
        Self {
            date: today,
            source: ReferenceSource::Today,
        }
    }
}
