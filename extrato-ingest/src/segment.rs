//! Split section text into candidate entry lines.
//!
//! PDF text extraction sometimes emits a whole page region as one long line.
//! When the newline split looks degenerate we cut at date tokens instead; this
//! is best-effort and tuned for the entries layout only.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use extrato_core::dates::DATE_PATTERN;

/// At or below this many non-blank lines the text is treated as a collapsed blob.
const DEGENERATE_LINE_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct LineSegmenter {
    date_token: Regex,
}

impl LineSegmenter {
    pub fn new() -> Result<Self> {
        // Date preceded by start-of-text or whitespace, so reference codes like
        // "AB01/02" are not split.
        let date_token = Regex::new(&format!(r"(?:^|\s)(?P<date>{DATE_PATTERN})\b"))
            .context("compile date token pattern")?;
        Ok(Self { date_token })
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if lines.len() > DEGENERATE_LINE_COUNT {
            return lines;
        }

        let chunks = self.split_at_dates(text);
        if chunks.len() > lines.len() {
            debug!(lines = lines.len(), chunks = chunks.len(), "using date-token segmentation");
            chunks
        } else {
            lines
        }
    }

    fn split_at_dates(&self, text: &str) -> Vec<String> {
        let starts: Vec<usize> = self
            .date_token
            .captures_iter(text)
            .filter_map(|caps| caps.name("date").map(|m| m.start()))
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                collapse_breaks(&text[start..end])
            })
            .filter(|chunk| !chunk.is_empty())
            .collect()
    }
}

fn collapse_breaks(chunk: &str) -> String {
    chunk
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_split() {
        let s = LineSegmenter::new().unwrap();
        let lines = s.segment("01/03 A 1,00\n\n02/03 B 2,00\r\n03/03 C 3,00\n");
        assert_eq!(lines, vec!["01/03 A 1,00", "02/03 B 2,00", "03/03 C 3,00"]);
    }

    #[test]
    fn test_blob_is_cut_at_date_tokens() {
        let s = LineSegmenter::new().unwrap();
        let blob = "01/03 MARKET 10,00 D 990,00 02/03 BAKERY 5,00 D 985,00 03/03 SALARY 100,00 C 1.085,00";
        let lines = s.segment(blob);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("01/03"));
        assert!(lines[1].starts_with("02/03"));
        assert!(lines[2].starts_with("03/03"));
        assert_eq!(lines[1], "02/03 BAKERY 5,00 D 985,00");
    }

    #[test]
    fn test_embedded_date_is_not_a_cut_point() {
        let s = LineSegmenter::new().unwrap();
        let blob = "01/03 PIX REF99/12 10,00 02/03 BAKERY 5,00";
        let lines = s.segment(blob);
        assert_eq!(lines, vec!["01/03 PIX REF99/12 10,00", "02/03 BAKERY 5,00"]);
    }

    #[test]
    fn test_full_year_tokens() {
        let s = LineSegmenter::new().unwrap();
        let lines = s.segment("header 01/03/2024 A 1,00 02/03/2024 B 2,00 03/03/2024 C 3,00");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("01/03/2024"));
    }

    #[test]
    fn test_keeps_newline_split_when_not_better() {
        let s = LineSegmenter::new().unwrap();
        let lines = s.segment("no dates here\nstill none");
        assert_eq!(lines, vec!["no dates here", "still none"]);
    }

    #[test]
    fn test_empty_text() {
        let s = LineSegmenter::new().unwrap();
        assert!(s.segment("").is_empty());
        assert!(s.segment("   \n  ").is_empty());
    }
}
