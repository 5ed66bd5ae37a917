use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Knobs for a parser instance. Passed explicitly; nothing is read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Trace every candidate line that no grammar accepted.
    pub debug: bool,
    /// Pin "today" (year fallback and the empty-statement date). System date when unset.
    pub today: Option<NaiveDate>,
}

impl ParserConfig {
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
