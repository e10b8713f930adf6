//! Line-oriented parsing of interval descriptions.
//!
//! One interval per line as `start finish weight`, separated by whitespace.
//! `#` starts a comment running to the end of the line; blank lines and
//! comment-only lines are skipped.

use thiserror::Error;

use crate::models::{Interval, IntervalError};

/// Errors from parsing interval text. Lines are numbered from 1.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Line {line}: expected 3 fields (start finish weight), found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("Line {line}: cannot parse {text:?} as a number")]
    Number { line: usize, text: String },
    #[error("Line {line}: {source}")]
    Interval { line: usize, source: IntervalError },
}

/// Parse interval text into validated intervals, preserving input order.
///
/// Stops at the first malformed line; nothing is returned for input that
/// fails anywhere.
pub fn parse_intervals(input: &str) -> Result<Vec<Interval>, ParseError> {
    let mut intervals = Vec::new();

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let text = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(ParseError::FieldCount {
                line,
                found: fields.len(),
            });
        }

        let mut values = [0.0f64; 3];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| ParseError::Number {
                line,
                text: field.to_string(),
            })?;
        }

        let interval = Interval::new(values[0], values[1], values[2])
            .map_err(|source| ParseError::Interval { line, source })?;
        intervals.push(interval);
    }

    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_lines() {
        let intervals = parse_intervals("10 20 2\n20 30 3\n").unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].start(), 10.0);
        assert_eq!(intervals[0].finish(), 20.0);
        assert_eq!(intervals[0].weight(), 2.0);
        assert_eq!(intervals[1].start(), 20.0);
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let input = "\n# header comment\n10 20 2\n\n   # indented comment\n20 30 3\n";
        let intervals = parse_intervals(input).unwrap();
        assert_eq!(intervals.len(), 2);
    }

    #[test]
    fn test_trailing_comment_stripped() {
        let intervals = parse_intervals("10 20 2 # standup\n").unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].weight(), 2.0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let intervals = parse_intervals("10 20 2\r\n20 30 3\r\n").unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[1].weight(), 3.0);
    }

    #[test]
    fn test_scientific_and_negative_numbers() {
        let intervals = parse_intervals("-1.5e1 -6 1.1\n").unwrap();
        assert_eq!(intervals[0].start(), -15.0);
        assert_eq!(intervals[0].finish(), -6.0);
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_intervals("10 20 2\n10 20\n").unwrap_err();
        assert_eq!(err, ParseError::FieldCount { line: 2, found: 2 });
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse_intervals("10 20 2 7\n").unwrap_err();
        assert_eq!(err, ParseError::FieldCount { line: 1, found: 4 });
    }

    #[test]
    fn test_unparseable_number() {
        let err = parse_intervals("10 twenty 2\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Number {
                line: 1,
                text: "twenty".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Line 1: cannot parse \"twenty\" as a number"
        );
    }

    #[test]
    fn test_invalid_interval_carries_line_number() {
        let err = parse_intervals("0 1 1\n\n# note\n5 5 1\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Interval {
                line: 4,
                source: IntervalError::NonpositiveDuration {
                    start: 5.0,
                    finish: 5.0
                }
            }
        );
    }

    #[test]
    fn test_infinite_value_rejected_as_interval_error() {
        // f64 parsing accepts "inf", so rejection happens at validation.
        let err = parse_intervals("inf 20 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Interval { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_intervals("").unwrap(), Vec::new());
        assert_eq!(parse_intervals("# only comments\n").unwrap(), Vec::new());
    }
}
