//! Numeric literal patterns.

use lazy_static::lazy_static;
use regex::Regex;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = ',';

lazy_static! {
    // Optional sign, grouped or plain integer part, optional fraction.
    pub static ref NUMBER_PATTERN: Regex = Regex::new(
        r"[-+]?(?:\d{1,3}(?:,\d{3})*|\d+)(?:\.\d+)?"
    ).unwrap();

    // A single Unicode decimal digit, the same class `\d` matches above.
    static ref DIGIT: Regex = Regex::new(r"^\d$").unwrap();
}

/// Build the numeric literal pattern for an arbitrary grouping separator.
pub fn number_pattern(separator: char) -> Result<Regex, regex::Error> {
    let sep = regex::escape(&separator.to_string());
    Regex::new(&format!(r"[-+]?(?:\d{{1,3}}(?:{sep}\d{{3}})*|\d+)(?:\.\d+)?"))
}

/// True for any character `\d` matches, ASCII or not.
pub fn is_digit(c: char) -> bool {
    let mut buf = [0; 4];
    DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Numeric value of a decimal digit from any script.
///
/// Unicode encodes decimal digits in contiguous runs that start at zero, so
/// the value is the distance from the start of the run, modulo ten.
pub fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_digit(c) {
        return None;
    }
    let mut code = c as u32;
    let mut offset = 0;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_digit(prev) {
            break;
        }
        code -= 1;
        offset += 1;
    }
    Some(offset % 10)
}
