//! Verse ranges such as `2..4`, `3..`, `..2` or `5`

use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid verse range '{0}', expected N, A..B, A.., ..B or ..")]
pub struct ParseRangeError(String);

/// A half-open range of verse indices with optional bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerseRange {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl VerseRange {
    /// Every verse
    pub const ALL: VerseRange = VerseRange {
        start: None,
        end: None,
    };

    /// Only verse `index`
    pub fn single(index: usize) -> Self {
        Self {
            start: Some(index),
            end: Some(index.saturating_add(1)),
        }
    }

    /// Resolve against a poem with `len` verses, clamping both ends
    pub fn apply(&self, len: usize) -> Range<usize> {
        let start = self.start.unwrap_or(0).min(len);
        let end = self.end.unwrap_or(len).clamp(start, len);
        start..end
    }
}

fn range_pattern() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| Regex::new(r"^(\d*)\.\.(\d*)$").unwrap())
}

impl FromStr for VerseRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseRangeError(s.to_string());

        if let Some(caps) = range_pattern().captures(s) {
            let bound = |i: usize| -> Result<Option<usize>, ParseRangeError> {
                match caps.get(i).map(|m| m.as_str()) {
                    None | Some("") => Ok(None),
                    Some(digits) => digits.parse().map(Some).map_err(|_| invalid()),
                }
            };
            return Ok(VerseRange {
                start: bound(1)?,
                end: bound(2)?,
            });
        }

        let index: usize = s.parse().map_err(|_| invalid())?;
        Ok(VerseRange::single(index))
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str("..")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> VerseRange {
        s.parse().unwrap()
    }

    fn range(start: Option<usize>, end: Option<usize>) -> VerseRange {
        VerseRange { start, end }
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse(".."), VerseRange::ALL);
        assert_eq!(parse("1..3"), range(Some(1), Some(3)));
        assert_eq!(parse("2.."), range(Some(2), None));
        assert_eq!(parse("..2"), range(None, Some(2)));
        assert_eq!(parse(" 4 "), VerseRange::single(4));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "a..b", "1...2", "-1", "1..2..3", "99999999999999999999999"] {
            assert!(bad.parse::<VerseRange>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_apply_clamps() {
        assert_eq!(VerseRange::ALL.apply(5), 0..5);
        assert_eq!(parse("1..3").apply(5), 1..3);
        assert_eq!(parse("3..10").apply(5), 3..5);
        assert_eq!(parse("7..").apply(5), 5..5);
        assert_eq!(parse("4..2").apply(5), 4..4);
        assert_eq!(parse("2").apply(5), 2..3);
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("1..").to_string(), "1..");
        assert_eq!(parse("3").to_string(), "3..4");
        assert_eq!(VerseRange::ALL.to_string(), "..");
    }
}
