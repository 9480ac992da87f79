//! Numeric token extraction.
//!
//! A token is an optional sign followed by either a grouped integer
//! (`1,234,567`) or a plain digit run, with an optional fractional part
//! (`.5`). The grouped form is tried first and needs no group at all, so a
//! run of four or more plain digits splits after its first three
//! (`12345` is `123` then `45`). Grouping separators are stripped and
//! digits from other scripts mapped to ASCII before the token is parsed
//! as `f64`.

pub mod patterns;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::error::NumtallyError;
pub use patterns::{DEFAULT_SEPARATOR, NUMBER_PATTERN, digit_value, number_pattern};

/// A numeric literal found in the source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericToken {
    /// Parsed value.
    pub value: f64,
    /// Matched text, separators included.
    pub source: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

/// Extracts numeric tokens using a configurable grouping separator.
#[derive(Debug, Clone)]
pub struct NumberExtractor {
    pattern: Regex,
    separator: char,
}

impl NumberExtractor {
    pub fn new() -> Self {
        Self {
            pattern: NUMBER_PATTERN.clone(),
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Use a different thousands separator.
    pub fn with_separator(separator: char) -> crate::Result<Self> {
        check_separator(separator)?;
        if separator == DEFAULT_SEPARATOR {
            return Ok(Self::new());
        }
        let pattern = number_pattern(separator)
            .map_err(|e| NumtallyError::Config(format!("invalid separator {separator:?}: {e}")))?;
        Ok(Self { pattern, separator })
    }

    /// Lazily scan `text`, yielding tokens left to right.
    ///
    /// Matches that do not parse as `f64` are skipped.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = NumericToken> + 'a {
        self.pattern.find_iter(text).filter_map(move |m| {
            let raw = m.as_str();
            match self.normalize(raw).parse::<f64>() {
                Ok(value) => Some(NumericToken {
                    value,
                    source: raw.to_string(),
                    start: m.start(),
                    end: m.end(),
                }),
                Err(e) => {
                    trace!("Dropping token {:?} at {}: {}", raw, m.start(), e);
                    None
                }
            }
        })
    }

    /// Every token, in order of appearance.
    pub fn extract_all(&self, text: &str) -> Vec<NumericToken> {
        self.tokens(text).collect()
    }

    /// Values only, in order of appearance.
    pub fn values(&self, text: &str) -> Vec<f64> {
        self.tokens(text).map(|t| t.value).collect()
    }

    fn normalize(&self, raw: &str) -> String {
        raw.chars()
            .filter(|c| *c != self.separator)
            .map(|c| {
                if c.is_ascii() {
                    return c;
                }
                digit_value(c)
                    .and_then(|d| char::from_digit(d, 10))
                    .unwrap_or(c)
            })
            .collect()
    }
}

impl Default for NumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract all numbers from text using the default comma separator.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NumberExtractor::new().values(text)
}

/// Reject separators that would collide with the rest of the pattern.
pub fn check_separator(separator: char) -> crate::Result<()> {
    if patterns::is_digit(separator)
        || matches!(separator, '.' | '+' | '-')
        || separator.is_control()
    {
        return Err(NumtallyError::Config(format!(
            "{separator:?} cannot be used as a grouping separator"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_revenue_line() {
        let values = extract_numbers("Revenue: 1,234 and -56.7 units, plus +3");
        assert_eq!(values, vec![1234.0, -56.7, 3.0]);
    }

    #[test]
    fn test_no_digits() {
        assert!(extract_numbers("function f() { return x; }").is_empty());
        assert!(extract_numbers("").is_empty());
    }

    #[test]
    fn test_lone_sign_is_not_a_token() {
        assert!(extract_numbers("a + b - c").is_empty());
        assert_eq!(extract_numbers("x = - 5"), vec![5.0]);
    }

    #[test]
    fn test_grouping_is_stripped() {
        assert_eq!(extract_numbers("1,234.5"), vec![1234.5]);
        assert_eq!(extract_numbers("1,234,567"), vec![1234567.0]);
        assert_eq!(extract_numbers("-12,345.25"), vec![-12345.25]);
    }

    #[test]
    fn test_long_digit_runs_split_after_three() {
        assert_eq!(extract_numbers("12345"), vec![123.0, 45.0]);
        assert_eq!(extract_numbers("1234.5"), vec![123.0, 4.5]);
        assert_eq!(extract_numbers("year 2024"), vec![202.0, 4.0]);
        assert_eq!(extract_numbers("123"), vec![123.0]);
    }

    #[test]
    fn test_irregular_grouping() {
        assert_eq!(extract_numbers("1,23"), vec![1.0, 23.0]);
        assert_eq!(extract_numbers("1234,567"), vec![123.0, 4567.0]);
        assert_eq!(extract_numbers("[1,2,3]"), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_order_of_appearance() {
        let values = extract_numbers("z=9; y=-1; x=4.25; w=9");
        assert_eq!(values, vec![9.0, -1.0, 4.25, 9.0]);
    }

    #[test]
    fn test_adjacent_signs_and_ranges() {
        assert_eq!(extract_numbers("3-4"), vec![3.0, -4.0]);
        assert_eq!(extract_numbers("a1b2"), vec![1.0, 2.0]);
        assert_eq!(extract_numbers("1.2.3"), vec![1.2, 3.0]);
    }

    #[test]
    fn test_digits_from_other_scripts() {
        // U+0663 ARABIC-INDIC DIGIT THREE
        assert_eq!(extract_numbers("\u{0663} 7"), vec![3.0, 7.0]);
        // DEVANAGARI ONE TWO, then FULLWIDTH FOUR POINT FIVE
        assert_eq!(extract_numbers("\u{0967}\u{0968} -\u{FF14}.\u{FF15}"), vec![12.0, -4.5]);
    }

    #[test]
    fn test_token_positions() {
        let extractor = NumberExtractor::new();
        let tokens = extractor.extract_all("ab -1,000 cd");
        assert_eq!(
            tokens,
            vec![NumericToken {
                value: -1000.0,
                source: "-1,000".to_string(),
                start: 3,
                end: 9,
            }]
        );
    }

    #[test]
    fn test_tokens_are_lazy() {
        let extractor = NumberExtractor::new();
        assert_eq!(extractor.tokens("x 2 y 3").next().map(|t| t.value), Some(2.0));
        assert_eq!(extractor.tokens("none").next(), None);
    }

    #[test]
    fn test_custom_separator() {
        let extractor = NumberExtractor::with_separator('_').unwrap();
        assert_eq!(extractor.values("1_000_000 and 1,000"), vec![1000000.0, 1.0, 0.0]);

        let extractor = NumberExtractor::with_separator(' ').unwrap();
        assert_eq!(extractor.values("12 345,5"), vec![12345.0, 5.0]);
    }

    #[test]
    fn test_invalid_separator() {
        assert!(NumberExtractor::with_separator('.').is_err());
        assert!(NumberExtractor::with_separator('7').is_err());
        assert!(NumberExtractor::with_separator('-').is_err());
        assert!(NumberExtractor::with_separator('\u{0663}').is_err());
    }
}
