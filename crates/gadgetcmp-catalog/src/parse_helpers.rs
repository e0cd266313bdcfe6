//! Internal byte-scanning primitives for number and unit extraction.
//!
//! All functions operate on pre-lowercased strings unless stated otherwise.
//! This module is `pub(crate)` so that [`crate::parse`] and the feature
//! detector share the same low-level routines without exposing them as
//! part of the public API.

/// A number found in free text and the text that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumberMatch<'a> {
    pub value: f64,
    /// Remainder after the number, with leading spaces and hyphens skipped
    /// so that `"6.7-inch"` and `"6.7 inch"` look the same.
    pub rest: &'a str,
}

/// Scans `s` for decimal numbers and calls `on_match` for each one found.
/// If `on_match` returns `Some(v)`, scanning stops and the value is returned.
///
/// Thousands separators between digits (`"4,500"`) are accepted; a comma
/// followed by a space ends the number (`"3, 41"` is two numbers).
pub(crate) fn scan_numbers<'a, T>(
    s: &'a str,
    mut on_match: impl FnMut(NumberMatch<'a>) -> Option<T>,
) -> Option<T> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        let starts_number = bytes[i].is_ascii_digit()
            || (bytes[i] == b'.' && i + 1 < len && bytes[i + 1].is_ascii_digit());
        if !starts_number {
            i += 1;
            continue;
        }

        let mut digits = String::new();
        let mut has_dot = false;
        while i < len {
            let b = bytes[i];
            if b.is_ascii_digit() {
                digits.push(char::from(b));
            } else if b == b'.' && !has_dot && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                has_dot = true;
                digits.push('.');
            } else if b == b','
                && !has_dot
                && i + 1 < len
                && bytes[i + 1].is_ascii_digit()
                && !digits.is_empty()
            {
                // thousands separator, dropped
            } else {
                break;
            }
            i += 1;
        }

        let mut rest_start = i;
        while rest_start < len && matches!(bytes[rest_start], b' ' | b'-') {
            rest_start += 1;
        }

        if let Ok(value) = digits.parse::<f64>() {
            let found = NumberMatch {
                value,
                rest: &s[rest_start..],
            };
            if let Some(result) = on_match(found) {
                return Some(result);
            }
        }
    }
    None
}

/// Returns every number in `s`, left to right.
pub(crate) fn all_numbers(s: &str) -> Vec<f64> {
    let mut values = Vec::new();
    scan_numbers(s, |m| {
        values.push(m.value);
        None::<()>
    });
    values
}

/// Returns the first number in `s`.
pub(crate) fn first_number(s: &str) -> Option<f64> {
    scan_numbers(s, |m| Some(m.value))
}

/// `true` when `rest` begins with `unit` and the unit is not the prefix of a
/// longer word (so `"w"` does not match `"wh"` and `"in"` does not match
/// `"inverter"`).
pub(crate) fn starts_with_unit(rest: &str, unit: &str) -> bool {
    rest.starts_with(unit)
        && !rest[unit.len()..]
            .chars()
            .next()
            .is_some_and(char::is_alphanumeric)
}

/// Returns every number in `s` that is immediately followed by one of
/// `units`, left to right.
/// Input must be pre-lowercased.
pub(crate) fn values_with_unit(lower: &str, units: &[&str]) -> Vec<f64> {
    let mut values = Vec::new();
    scan_numbers(lower, |m| {
        if units.iter().any(|unit| starts_with_unit(m.rest, unit)) {
            values.push(m.value);
        }
        None::<()>
    });
    values
}

/// Returns the first number followed by one of `units`.
/// Input must be pre-lowercased.
pub(crate) fn first_value_with_unit(lower: &str, units: &[&str]) -> Option<f64> {
    scan_numbers(lower, |m| {
        units
            .iter()
            .any(|unit| starts_with_unit(m.rest, unit))
            .then_some(m.value)
    })
}

/// Largest element of `values`, ignoring NaN.
pub(crate) fn max_of(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .max_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_numbers_reads_decimals_and_thousands() {
        assert_eq!(all_numbers("4,500 mah and 6.7 inch"), vec![4500.0, 6.7]);
    }

    #[test]
    fn comma_space_splits_numbers() {
        assert_eq!(all_numbers("3-cell, 41 wh"), vec![3.0, 41.0]);
    }

    #[test]
    fn leading_dot_is_a_decimal() {
        assert_eq!(first_number("weight .95 kg"), Some(0.95));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(all_numbers("about 7. then 8"), vec![7.0, 8.0]);
    }

    #[test]
    fn unit_must_end_at_word_boundary() {
        assert_eq!(values_with_unit("67w fast, 50wh pack", &["w"]), vec![67.0]);
        assert_eq!(values_with_unit("67w fast, 50wh pack", &["wh"]), vec![50.0]);
    }

    #[test]
    fn unit_after_hyphen_matches() {
        assert_eq!(first_value_with_unit("6.7-inch amoled", &["inch"]), Some(6.7));
    }

    #[test]
    fn no_numbers_returns_empty() {
        assert!(all_numbers("no digits here").is_empty());
        assert!(first_number("").is_none());
    }

    #[test]
    fn max_of_ignores_nan() {
        assert_eq!(max_of(&[1.0, f64::NAN, 3.0]), Some(3.0));
        assert_eq!(max_of(&[]), None);
    }
}
