//! # Duration literals.
//!
//! Accepts a sequence of `<number><unit>` components, optionally separated by
//! whitespace: `"100ms"`, `"1h30m"`, `"1.5s"`, `"2m 10s"`. Units: `ns`, `us`/`µs`,
//! `ms`, `s`, `m`, `h`. A bare `"0"` is zero. A leading `-` is rejected.

use std::time::Duration;

use super::{ParseError, ScheduleParser};

/// Default [`ScheduleParser`]: the expression is the interval itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct DurationParser;

impl ScheduleParser for DurationParser {
    fn parse(&self, expr: &str) -> Result<Duration, ParseError> {
        parse_duration(expr)
    }
}

/// Parses a duration literal.
pub fn parse_duration(expr: &str) -> Result<Duration, ParseError> {
    let s = expr.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let s = match s.strip_prefix('-') {
        Some(_) => return Err(ParseError::Negative),
        None => s.strip_prefix('+').unwrap_or(s),
    };
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = 0f64;
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(num_len);
        if number.is_empty() {
            return Err(ParseError::InvalidNumber(rest.to_string()));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| ParseError::InvalidNumber(number.to_string()))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.' || c.is_whitespace())
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let nanos_per_unit = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(ParseError::InvalidUnit(expr.trim().to_string())),
        };

        total += value * nanos_per_unit;
        rest = tail.trim_start();
    }

    if !total.is_finite() || total > u64::MAX as f64 {
        return Err(ParseError::InvalidNumber(expr.trim().to_string()));
    }
    Ok(Duration::from_nanos(total.round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("100ms"), Ok(Duration::from_millis(100)));
        assert_eq!(parse_duration("1s"), Ok(Duration::from_secs(1)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("250us"), Ok(Duration::from_micros(250)));
        assert_eq!(parse_duration("10ns"), Ok(Duration::from_nanos(10)));
    }

    #[test]
    fn compound_and_fractional() {
        assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("1m 30s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_duration(""), Err(ParseError::Empty));
        assert_eq!(parse_duration("-1s"), Err(ParseError::Negative));
        assert!(matches!(parse_duration("invalid"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(parse_duration("10"), Err(ParseError::InvalidUnit(_))));
        assert!(matches!(parse_duration("5 parsecs"), Err(ParseError::InvalidUnit(_))));
        assert!(matches!(parse_duration("1..2s"), Err(ParseError::InvalidNumber(_))));
    }
}
