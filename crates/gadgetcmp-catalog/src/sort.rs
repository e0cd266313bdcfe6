//! Card ordering: by an explicit sort key, or by the strength of an active
//! quick-filter feature.
//!
//! Cards missing the sort value always go last, in either direction. Equal
//! values fall back to name and then compare key, flipped along with the
//! key's direction, so every key is a total order and an inverse key gives
//! the exact reverse among measured cards.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use gadgetcmp_core::{FilterGroup, VariantCard};

use crate::facets::range_value;
use crate::features::{detect_feature, FeatureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
    BatteryHigh,
    BatteryLow,
    CapacityHigh,
    CapacityLow,
    WeightLow,
    WeightHigh,
    EnergyRating,
    DisplaySize,
    RefreshRate,
    RamHigh,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

impl SortKey {
    pub const ALL: [SortKey; 14] = [
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
        SortKey::BatteryHigh,
        SortKey::BatteryLow,
        SortKey::CapacityHigh,
        SortKey::CapacityLow,
        SortKey::WeightLow,
        SortKey::WeightHigh,
        SortKey::EnergyRating,
        SortKey::DisplaySize,
        SortKey::RefreshRate,
        SortKey::RamHigh,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
            SortKey::BatteryHigh => "battery-high",
            SortKey::BatteryLow => "battery-low",
            SortKey::CapacityHigh => "capacity-high",
            SortKey::CapacityLow => "capacity-low",
            SortKey::WeightLow => "weight-low",
            SortKey::WeightHigh => "weight-high",
            SortKey::EnergyRating => "energy-rating",
            SortKey::DisplaySize => "display-size",
            SortKey::RefreshRate => "refresh-rate",
            SortKey::RamHigh => "ram-high",
        }
    }

    /// The same measure in the opposite direction, when one exists.
    #[must_use]
    pub fn inverse(self) -> Option<SortKey> {
        match self {
            SortKey::PriceLow => Some(SortKey::PriceHigh),
            SortKey::PriceHigh => Some(SortKey::PriceLow),
            SortKey::BatteryHigh => Some(SortKey::BatteryLow),
            SortKey::BatteryLow => Some(SortKey::BatteryHigh),
            SortKey::CapacityHigh => Some(SortKey::CapacityLow),
            SortKey::CapacityLow => Some(SortKey::CapacityHigh),
            SortKey::WeightLow => Some(SortKey::WeightHigh),
            SortKey::WeightHigh => Some(SortKey::WeightLow),
            _ => None,
        }
    }

    fn direction(self) -> Direction {
        match self {
            SortKey::PriceLow | SortKey::BatteryLow | SortKey::CapacityLow | SortKey::WeightLow => {
                Direction::Ascending
            }
            _ => Direction::Descending,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(self, card: &VariantCard) -> Option<f64> {
        match self {
            SortKey::PriceLow | SortKey::PriceHigh => card.display_price.map(|p| p as f64),
            SortKey::Rating => card.numeric.rating,
            SortKey::Newest => card
                .launched_on()
                .map(|date| f64::from(date.num_days_from_ce())),
            SortKey::BatteryHigh | SortKey::BatteryLow => range_value(card, FilterGroup::Battery),
            SortKey::CapacityHigh | SortKey::CapacityLow => card.numeric.capacity,
            SortKey::WeightLow | SortKey::WeightHigh => card.numeric.weight,
            SortKey::EnergyRating => card.numeric.energy_rating,
            SortKey::DisplaySize => card.numeric.display_inches,
            SortKey::RefreshRate => card.numeric.refresh_hz,
            SortKey::RamHigh => card.numeric.ram_gb,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Orders `cards` for display.
///
/// An explicit `key` wins. Without one, an active `feature` orders cards by
/// detected strength (strongest first, unmeasured last), then price
/// ascending, then name, then compare key. With neither, the input order is
/// returned.
#[must_use]
pub fn sort_cards(
    mut cards: Vec<VariantCard>,
    key: Option<SortKey>,
    feature: Option<FeatureId>,
) -> Vec<VariantCard> {
    match (key, feature) {
        (Some(key), _) => {
            let direction = key.direction();
            cards.sort_by(|a, b| {
                compare_missing_last(key.value(a), key.value(b), direction).then_with(|| {
                    let tie = identity_order(a, b);
                    match direction {
                        Direction::Ascending => tie,
                        Direction::Descending => tie.reverse(),
                    }
                })
            });
        }
        (None, Some(feature)) => {
            cards.sort_by(|a, b| {
                let strength = |c: &VariantCard| detect_feature(c, feature).strength;
                compare_missing_last(strength(a), strength(b), Direction::Descending)
                    .then_with(|| compare_missing_last_u64(a.display_price, b.display_price))
                    .then_with(|| identity_order(a, b))
            });
        }
        (None, None) => {}
    }
    cards
}

fn identity_order(a: &VariantCard, b: &VariantCard) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.compare_key.cmp(&b.compare_key))
}

fn compare_missing_last(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match direction {
            Direction::Ascending => x.total_cmp(&y),
            Direction::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_missing_last_u64(a: Option<u64>, b: Option<u64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use gadgetcmp_core::Category;

    use super::*;
    use crate::test_support::{card, ids};

    fn priced() -> Vec<VariantCard> {
        vec![
            card("mid", Category::Smartphone, Some(20_000)),
            card("none", Category::Smartphone, None),
            card("low", Category::Smartphone, Some(9_999)),
            card("high", Category::Smartphone, Some(80_000)),
        ]
    }

    #[test]
    fn sort_keys_parse_their_names() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!("price_low".parse::<SortKey>(), Ok(SortKey::PriceLow));
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn inverse_pairs_directional_keys() {
        assert_eq!(SortKey::PriceLow.inverse(), Some(SortKey::PriceHigh));
        assert_eq!(SortKey::WeightHigh.inverse(), Some(SortKey::WeightLow));
        assert_eq!(SortKey::Rating.inverse(), None);
    }

    #[test]
    fn price_low_puts_unpriced_last() {
        let sorted = sort_cards(priced(), Some(SortKey::PriceLow), None);
        assert_eq!(ids(&sorted), ["low", "mid", "high", "none"]);
    }

    #[test]
    fn price_high_still_puts_unpriced_last() {
        let sorted = sort_cards(priced(), Some(SortKey::PriceHigh), None);
        assert_eq!(ids(&sorted), ["high", "mid", "low", "none"]);
    }

    #[test]
    fn no_key_and_no_feature_keeps_order() {
        let sorted = sort_cards(priced(), None, None);
        assert_eq!(ids(&sorted), ["mid", "none", "low", "high"]);
    }

    #[test]
    fn ties_break_on_name_regardless_of_input_order() {
        let forward = vec![
            card("a", Category::Laptop, Some(50_000)),
            card("b", Category::Laptop, Some(50_000)),
        ];
        let backward = vec![
            card("b", Category::Laptop, Some(50_000)),
            card("a", Category::Laptop, Some(50_000)),
        ];
        assert_eq!(ids(&sort_cards(forward, Some(SortKey::PriceLow), None)), ["a", "b"]);
        assert_eq!(ids(&sort_cards(backward, Some(SortKey::PriceLow), None)), ["a", "b"]);
    }

    #[test]
    fn same_name_ties_break_on_compare_key() {
        let mut first = card("x", Category::Smartphone, Some(10_000));
        first.compare_key = "p:x:1".to_string();
        let mut second = card("x", Category::Smartphone, Some(10_000));
        second.compare_key = "p:x:0".to_string();
        let sorted = sort_cards(vec![first, second], Some(SortKey::PriceLow), None);
        let keys: Vec<&str> = sorted.iter().map(|c| c.compare_key.as_str()).collect();
        assert_eq!(keys, ["p:x:0", "p:x:1"]);
    }

    #[test]
    fn resorting_by_the_same_key_is_a_no_op() {
        for key in SortKey::ALL {
            let once = sort_cards(priced(), Some(key), None);
            let twice = sort_cards(once.clone(), Some(key), None);
            assert_eq!(ids(&once), ids(&twice), "{key}");
        }
    }

    #[test]
    fn inverse_key_reverses_order_including_ties() {
        let cards = vec![
            card("a", Category::Smartphone, Some(10_000)),
            card("b", Category::Smartphone, Some(10_000)),
            card("c", Category::Smartphone, Some(5_000)),
        ];
        let low = sort_cards(cards, Some(SortKey::PriceLow), None);
        assert_eq!(ids(&low), ["c", "a", "b"]);
        let high = sort_cards(low.clone(), Some(SortKey::PriceHigh), None);
        assert_eq!(ids(&high), ["b", "a", "c"]);

        let mut reversed = ids(&low);
        reversed.reverse();
        assert_eq!(ids(&high), reversed);
    }

    #[test]
    fn newest_treats_bad_dates_as_oldest() {
        let mut old = card("old", Category::Smartphone, None);
        old.launch_date = Some("2022-01-10".to_string());
        let mut new = card("new", Category::Smartphone, None);
        new.launch_date = Some("March 2024".to_string());
        let mut bad = card("bad", Category::Smartphone, None);
        bad.launch_date = Some("coming soon".to_string());
        let sorted = sort_cards(vec![bad, old, new], Some(SortKey::Newest), None);
        assert_eq!(ids(&sorted), ["new", "old", "bad"]);
    }

    #[test]
    fn battery_sort_uses_category_measure() {
        let mut small = card("small", Category::Laptop, None);
        small.numeric.battery_wh = Some(41.0);
        let mut big = card("big", Category::Laptop, None);
        big.numeric.battery_wh = Some(72.0);
        let sorted = sort_cards(vec![small, big], Some(SortKey::BatteryHigh), None);
        assert_eq!(ids(&sorted), ["big", "small"]);
    }

    #[test]
    fn feature_sort_orders_by_strength_then_price() {
        let mut fast = card("fast", Category::Smartphone, Some(30_000));
        fast.details.battery.fast_charging_watts = Some(120.0);
        let mut cheap = card("cheap", Category::Smartphone, Some(15_000));
        cheap.details.battery.fast_charging_watts = Some(33.0);
        let mut pricey = card("pricey", Category::Smartphone, Some(40_000));
        pricey.details.battery.fast_charging_watts = Some(33.0);
        let unknown = card("unknown", Category::Smartphone, Some(1_000));

        let sorted = sort_cards(
            vec![unknown, pricey, cheap, fast],
            None,
            Some(FeatureId::FastCharging),
        );
        assert_eq!(ids(&sorted), ["fast", "cheap", "pricey", "unknown"]);
    }

    #[test]
    fn explicit_key_overrides_feature() {
        let mut fast = card("fast", Category::Smartphone, Some(30_000));
        fast.details.battery.fast_charging_watts = Some(120.0);
        let slow = card("slow", Category::Smartphone, Some(10_000));
        let sorted = sort_cards(
            vec![fast, slow],
            Some(SortKey::PriceLow),
            Some(FeatureId::FastCharging),
        );
        assert_eq!(ids(&sorted), ["slow", "fast"]);
    }
}
