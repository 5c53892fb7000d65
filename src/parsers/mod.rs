//! # Schedule expression parsers.
//!
//! A cron-like task is scheduled from a string; the scheduler does not interpret the
//! string itself. It hands it to a [`ScheduleParser`] and only needs back the
//! interval between firings.
//!
//! - [`DurationParser`] (default): duration literals like `"100ms"`, `"1h30m"`, `"1.5s"`.
//! - [`CronParser`]: cron expressions (`sec min hour dom month dow [year]`), reduced
//!   to the gap between the next two upcoming occurrences.
//!
//! Custom parsers plug in via
//! [`SchedulerBuilder::with_parser`](crate::SchedulerBuilder::with_parser).

mod cron_expr;
mod duration;

use std::time::Duration;

use thiserror::Error;

pub use cron_expr::CronParser;
pub use duration::{parse_duration, DurationParser};

/// Why an expression could not be turned into an interval.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,
    #[error("negative durations are not allowed")]
    Negative,
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("missing or unknown unit in {0:?}")]
    InvalidUnit(String),
    #[error("invalid cron expression: {0}")]
    Cron(String),
    #[error("cron expression has no upcoming occurrences")]
    NoUpcoming,
}

/// Turns a schedule expression into a recurring interval.
pub trait ScheduleParser: Send + Sync + 'static {
    /// Parses `expr`. Zero is a valid parse result; the scheduler rejects it later.
    fn parse(&self, expr: &str) -> Result<Duration, ParseError>;
}

impl<F> ScheduleParser for F
where
    F: Fn(&str) -> Result<Duration, ParseError> + Send + Sync + 'static,
{
    fn parse(&self, expr: &str) -> Result<Duration, ParseError> {
        self(expr)
    }
}
