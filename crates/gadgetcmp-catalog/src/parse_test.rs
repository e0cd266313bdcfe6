use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// parse_first_number
// -----------------------------------------------------------------------

#[test]
fn first_number_capacity_no_space() {
    assert_eq!(parse_first_number("7kg"), 7.0);
}

#[test]
fn first_number_decimal_with_unit() {
    assert_eq!(parse_first_number("1.5 Ton"), 1.5);
}

#[test]
fn first_number_missing_returns_zero() {
    assert_eq!(parse_first_number("Not specified"), 0.0);
    assert_eq!(parse_first_number(""), 0.0);
}

// -----------------------------------------------------------------------
// parse_energy_rating
// -----------------------------------------------------------------------

#[test]
fn energy_rating_star_suffix() {
    assert_eq!(parse_energy_rating("4 Star"), Some(4));
}

#[test]
fn energy_rating_hyphenated() {
    assert_eq!(parse_energy_rating("5-star BEE"), Some(5));
}

#[test]
fn energy_rating_fractional_rejected() {
    assert_eq!(parse_energy_rating("3.5 Star"), None);
}

#[test]
fn energy_rating_missing() {
    assert_eq!(parse_energy_rating("Not rated"), None);
}

// -----------------------------------------------------------------------
// parse_battery_wh
// -----------------------------------------------------------------------

#[test]
fn battery_wh_ignores_cell_count() {
    assert_eq!(parse_battery_wh("3-cell, 41 Wh Li-ion"), 41.0);
}

#[test]
fn battery_wh_plain() {
    assert_eq!(parse_battery_wh("59 Wh"), 59.0);
}

#[test]
fn battery_wh_takes_largest_explicit_figure() {
    assert_eq!(parse_battery_wh("4-cell 70Wh (upgradeable from 56 Wh)"), 70.0);
}

#[test]
fn battery_wh_falls_back_to_largest_number() {
    assert_eq!(parse_battery_wh("4 cell 54"), 54.0);
}

#[test]
fn battery_wh_no_numbers() {
    assert_eq!(parse_battery_wh("Li-ion"), 0.0);
}

// -----------------------------------------------------------------------
// parse_battery_mah
// -----------------------------------------------------------------------

#[test]
fn battery_mah_with_unit() {
    assert_eq!(parse_battery_mah("4500 mAh"), 4500.0);
}

#[test]
fn battery_mah_thousands_separator() {
    assert_eq!(parse_battery_mah("Li-Po 5,000mAh, non-removable"), 5000.0);
}

#[test]
fn battery_mah_bare_number() {
    assert_eq!(parse_battery_mah("6000"), 6000.0);
}

// -----------------------------------------------------------------------
// parse_price / parse_price_value
// -----------------------------------------------------------------------

#[test]
fn price_strips_currency_and_commas() {
    assert_eq!(parse_price("₹24,999"), 24_999);
}

#[test]
fn price_nan_is_zero() {
    assert_eq!(parse_price("NaN"), 0);
}

#[test]
fn price_empty_is_zero() {
    assert_eq!(parse_price(""), 0);
    assert_eq!(parse_price("   "), 0);
}

#[test]
fn price_overflow_is_zero() {
    assert_eq!(parse_price("99999999999999999999999"), 0);
}

#[test]
fn price_value_from_number() {
    assert_eq!(parse_price_value(&json!(23000)), 23_000);
    assert_eq!(parse_price_value(&json!(23000.4)), 23_000);
}

#[test]
fn price_value_negative_and_null_are_zero() {
    assert_eq!(parse_price_value(&json!(-5)), 0);
    assert_eq!(parse_price_value(&json!(null)), 0);
}

#[test]
fn price_value_from_string() {
    assert_eq!(parse_price_value(&json!("Rs. 18,000")), 18_000);
}

// -----------------------------------------------------------------------
// parse_watts / parse_refresh_hz / parse_megapixels
// -----------------------------------------------------------------------

#[test]
fn watts_picks_largest() {
    assert_eq!(parse_watts("120W wired, 50W wireless"), Some(120.0));
}

#[test]
fn watts_ignore_watt_hours() {
    assert_eq!(parse_watts("59 Wh battery"), None);
}

#[test]
fn refresh_hz() {
    assert_eq!(parse_refresh_hz("Up to 144Hz adaptive"), Some(144.0));
    assert_eq!(parse_refresh_hz("60 Hz"), Some(60.0));
    assert_eq!(parse_refresh_hz("Full HD"), None);
}

#[test]
fn megapixels_collects_all_sensors() {
    assert_eq!(
        parse_megapixels("50MP + 12MP + 10 MP"),
        vec![50.0, 12.0, 10.0]
    );
}

// -----------------------------------------------------------------------
// parse_gigabytes / parse_display_inches
// -----------------------------------------------------------------------

#[test]
fn gigabytes_plain_and_terabytes() {
    assert_eq!(parse_gigabytes("8GB"), Some(8.0));
    assert_eq!(parse_gigabytes("1 TB SSD"), Some(1024.0));
    assert_eq!(parse_gigabytes("12"), Some(12.0));
}

#[test]
fn gigabytes_skips_memory_generation() {
    assert_eq!(parse_gigabytes("LPDDR5 16GB"), Some(16.0));
}

#[test]
fn gigabytes_missing() {
    assert_eq!(parse_gigabytes("N/A"), None);
}

#[test]
fn display_inches_prefers_inch_unit() {
    assert_eq!(parse_display_inches("39.62 cm (15.6 inch)"), Some(15.6));
    assert_eq!(parse_display_inches("6.7-inch AMOLED"), Some(6.7));
}

#[test]
fn display_inches_bare_number() {
    assert_eq!(parse_display_inches("6.1"), Some(6.1));
}

#[test]
fn non_zero_filters_sentinel() {
    assert_eq!(non_zero(0.0), None);
    assert_eq!(non_zero(7.0), Some(7.0));
}
