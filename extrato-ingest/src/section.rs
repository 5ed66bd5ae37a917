//! Isolate the "entries" block of a statement from summaries and future-dated sections.
//!
//! Expected extracted-text layout:
//!   Lançamentos - período de visualização: 01/03/2024 a 31/03/2024
//!   01/03  SALDO ANTERIOR                       1.000,00
//!   ...
//!   Lançamentos futuros

use anyhow::{Context, Result};
use regex::Regex;

/// Phrases that open an unrelated section. Must not include "limit" or
/// "interest": both appear inside entry rows.
const END_ANCHORS: &str = concat!(
    r"(?i)future\s+entries|future\s+outflows|consolidated\s+position",
    r"|lan[çc]amentos\s+futuros|sa[íi]das\s+futuras|posi[çc][ãa]o\s+consolidada"
);

#[derive(Debug, Clone)]
pub struct SectionExtractor {
    start: Regex,
    end: Regex,
}

impl SectionExtractor {
    pub fn new() -> Result<Self> {
        let start = Regex::new(concat!(
            r"(?i)\b(?:entries|lan[çc]amentos)\b[^\p{L}]{0,80}?",
            r"(?:viewing\s+period|per[íi]odo\s+de\s+visualiza[çc][ãa]o)"
        ))
        .context("compile section start anchor")?;
        let end = Regex::new(END_ANCHORS).context("compile section end anchors")?;
        Ok(Self { start, end })
    }

    /// The entries block, starting right after the start anchor match: the anchor
    /// text is left out, anything after it on the same line is kept. Returns the
    /// whole text when no start anchor is present.
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        let Some(anchor) = self.start.find(text) else {
            return text;
        };

        let rest = &text[anchor.end()..];
        match self.end.find(rest) {
            Some(end) => &rest[..end.start()],
            None => rest,
        }
    }
}
