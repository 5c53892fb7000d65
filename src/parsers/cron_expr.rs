//! # Cron expressions reduced to an interval.
//!
//! The scheduler runs cron-like tasks on a fixed interval, so a cron expression is
//! approximated by the gap between its next two occurrences. This is exact for
//! evenly spaced expressions (`"0 */5 * * * *"`) and an approximation otherwise.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;

use super::{ParseError, ScheduleParser};

/// [`ScheduleParser`] for `sec min hour day-of-month month day-of-week [year]`
/// expressions, backed by the `cron` crate. Standard 5-field expressions
/// (`min hour dom month dow`) fire at second 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct CronParser;

impl ScheduleParser for CronParser {
    fn parse(&self, expr: &str) -> Result<Duration, ParseError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(ParseError::Empty);
        }
        let expr = normalize(expr);
        let schedule =
            ::cron::Schedule::from_str(&expr).map_err(|e| ParseError::Cron(e.to_string()))?;

        let mut upcoming = schedule.upcoming(Utc);
        let (first, second) = match (upcoming.next(), upcoming.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(ParseError::NoUpcoming),
        };
        (second - first).to_std().map_err(|_| ParseError::NoUpcoming)
    }
}

/// Prepends a zero seconds field to standard 5-field expressions.
fn normalize(expr: &str) -> String {
    if expr.split_whitespace().count() == 5 {
        format!("0 {expr}")
    } else {
        expr.to_string()
    }
}
