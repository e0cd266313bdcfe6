//! Numeric parsing of free-text specification strings.
//!
//! These conventions are part of the engine's contract, not incidental:
//!
//! - capacity, weight, and size strings yield the first decimal number, or
//!   `0.0` when there is none; callers treat zero as "unknown";
//! - prices strip every non-digit and parse the rest, with `"NaN"` and empty
//!   strings yielding `0` ("no price");
//! - battery watt-hours prefer explicit `"NN Wh"` figures so that
//!   `"3-cell, 41 Wh"` reads as 41 and not 3.

use crate::parse_helpers::{
    all_numbers, first_number, first_value_with_unit, max_of, values_with_unit,
};

/// First decimal number in a capacity, weight, or size string.
///
/// `"7kg"` → `7.0`, `"260 L"` → `260.0`, `"1.5 Ton"` → `1.5`. Returns `0.0`
/// when no number is present.
#[must_use]
pub fn parse_first_number(text: &str) -> f64 {
    first_number(text).unwrap_or(0.0)
}

/// Star count from an energy-rating string such as `"4 Star"` or `"5-star"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_energy_rating(text: &str) -> Option<u8> {
    let value = first_number(&text.to_lowercase())?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return None;
    }
    Some(value as u8)
}

/// Battery capacity in watt-hours.
///
/// Takes the largest explicit `"NN Wh"` figure. Without one, falls back to
/// the largest number anywhere in the string. Returns `0.0` when the string
/// has no numbers.
#[must_use]
pub fn parse_battery_wh(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let explicit = values_with_unit(&lower, &["wh", "whr", "watt-hours", "watt hours"]);
    max_of(&explicit)
        .or_else(|| max_of(&all_numbers(&lower)))
        .unwrap_or(0.0)
}

/// Battery capacity in milliamp-hours.
///
/// `"4500 mAh"` → `4500.0`. Without an `mAh` unit the first number is used.
/// Returns `0.0` when the string has no numbers.
#[must_use]
pub fn parse_battery_mah(text: &str) -> f64 {
    let lower = text.to_lowercase();
    first_value_with_unit(&lower, &["mah"])
        .or_else(|| first_number(&lower))
        .unwrap_or(0.0)
}

/// Price in whole rupees from a display string.
///
/// Strips every non-digit character and parses what remains, so
/// `"₹24,999"` → `24999`. `"NaN"`, empty, and digit-free strings yield `0`.
#[must_use]
pub fn parse_price(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().unwrap_or(0)
}

/// Price from a raw JSON value, which may be a number or a display string.
///
/// Non-finite and negative numbers yield `0`.
#[must_use]
pub fn parse_price_value(value: &serde_json::Value) -> u64 {
    match value {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .map_or(0, round_price)
        }),
        serde_json::Value::String(s) => parse_price(s),
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_price(value: f64) -> u64 {
    value.round() as u64
}

/// Largest charging wattage in the string (`"67W SUPERVOOC"` → `67.0`).
///
/// Watt-hour figures are not wattages and are ignored.
#[must_use]
pub fn parse_watts(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    max_of(&values_with_unit(&lower, &["w", "watt", "watts"]))
}

/// Largest refresh rate in the string (`"up to 144Hz"` → `144.0`).
#[must_use]
pub fn parse_refresh_hz(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    max_of(&values_with_unit(&lower, &["hz"]))
}

/// Every megapixel figure in the string, in order
/// (`"50MP + 12MP + 10MP"` → `[50.0, 12.0, 10.0]`).
#[must_use]
pub fn parse_megapixels(text: &str) -> Vec<f64> {
    let lower = text.to_lowercase();
    values_with_unit(&lower, &["mp", "megapixel", "megapixels"])
}

/// Memory or storage size in gigabytes. Terabytes convert to `1024` GB each.
///
/// A bare number (`"8"`) is taken as gigabytes.
#[must_use]
pub fn parse_gigabytes(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    if let Some(tb) = first_value_with_unit(&lower, &["tb"]) {
        return Some(tb * 1024.0);
    }
    first_value_with_unit(&lower, &["gb"])
        .or_else(|| first_number(&lower))
        .filter(|gb| *gb > 0.0)
}

/// Screen diagonal in inches.
///
/// Prefers a number tagged with an inch unit, so `"39.62 cm (15.6 inch)"`
/// reads as `15.6`; otherwise the first number in the string.
#[must_use]
pub fn parse_display_inches(text: &str) -> Option<f64> {
    let lower = text.to_lowercase();
    first_value_with_unit(&lower, &["inches", "inch", "in", "\"", "”", "''"])
        .or_else(|| first_number(&lower))
        .filter(|inches| *inches > 0.0)
}

/// Converts the zero sentinel of [`parse_first_number`] and friends into
/// `None` for fields that must not pretend a value exists.
#[must_use]
pub fn non_zero(value: f64) -> Option<f64> {
    (value > 0.0 && value.is_finite()).then_some(value)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
