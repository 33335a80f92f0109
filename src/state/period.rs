//! Date Periods
//!
//! Validated date ranges for the recurrence queries.

use chrono::{Duration, NaiveDate, Utc};

/// Default recurrence window: 180 days back from today.
pub const DEFAULT_WINDOW_DAYS: i64 = 180;

/// An inclusive date range; `end` never precedes `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Default for Period {
    fn default() -> Self {
        Self::last_days(DEFAULT_WINDOW_DAYS)
    }
}

impl Period {
    /// Build a period, rejecting ranges whose end precedes the start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if end < start {
            None
        } else {
            Some(Self { start, end })
        }
    }

    /// The last `days` days, ending today.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        let start = end - Duration::days(days.max(0));
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// ISO value for an `<input type="date">`.
    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// pt-BR display label: "01/03/2026 a 28/08/2026".
    pub fn label(&self) -> String {
        format!(
            "{} a {}",
            self.start.format("%d/%m/%Y"),
            self.end.format("%d/%m/%Y")
        )
    }
}

/// Parse an ISO `YYYY-MM-DD` input value.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
