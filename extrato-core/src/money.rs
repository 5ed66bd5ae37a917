//! Locale-formatted money values: `1.234,56`, `943,49-`, `R$ -10,00`.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Regex fragment for a money-shaped token (period thousands, comma decimals,
/// optional leading or trailing minus, optional `R$`).
pub const MONEY_PATTERN: &str = r"-?(?:R\$\s?)?-?(?:\d{1,3}(?:\.\d{3})+|\d+),\d{2}-?";

/// Largest magnitude accepted (10^15). Anything above is extraction noise, and
/// keeping it out leaves room for running totals without overflow.
const MAX_MAGNITUDE: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0);

const MINUS_VARIANTS: [char; 6] = ['\u{2212}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{FE63}', '\u{FF0D}'];
const SPACE_VARIANTS: [char; 2] = ['\u{00A0}', '\u{202F}'];

/// Map unicode minus signs to `-` and non-breaking spaces to ` `.
pub fn normalize_glyphs(s: &str) -> String {
    s.chars()
        .map(|c| {
            if MINUS_VARIANTS.contains(&c) {
                '-'
            } else if SPACE_VARIANTS.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Parse a `1.234,56`-style amount. Returns `None` for anything that isn't one.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let compact: String = normalize_glyphs(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut body = compact.as_str();
    let mut negative = false;

    if let Some(rest) = body.strip_suffix('-') {
        negative = true;
        body = rest;
    }
    if let Some(rest) = body.strip_prefix('-') {
        negative = true;
        body = rest;
    } else if let Some(rest) = body.strip_prefix('+') {
        body = rest;
    }
    if let Some(rest) = body.strip_prefix("R$") {
        body = rest;
        if let Some(rest) = body.strip_prefix('-') {
            negative = true;
            body = rest;
        }
    }

    if !body.starts_with(|c: char| c.is_ascii_digit())
        || !body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        || body.matches(',').count() > 1
    {
        return None;
    }

    // Period groups thousands, comma separates decimals.
    let canonical = body.replace('.', "").replace(',', ".");
    let value = Decimal::from_str(&canonical).ok()?.round_dp(2);
    if value > MAX_MAGNITUDE {
        return None;
    }

    Some(if negative { -value } else { value })
}
