//! Facet computation over the current card set.
//!
//! Facets are a pure function of the cards: the same input yields the same
//! options in the same order. Nominal values are matched on [`facet_key`]
//! (lowercase, whitespace removed) and displayed with the casing of the
//! first card that carried them.
//!
//! Ordering:
//!
//! - brands, types, colors, processors: alphabetical;
//! - RAM, storage, capacity: numeric ascending;
//! - energy rating, refresh rate: numeric descending (higher is better).
//!
//! Range facets use fixed per-category bucket tables and list only buckets
//! that contain at least one card. The type-specific panel appears only when
//! exactly one type is selected.

use std::collections::HashMap;

use gadgetcmp_core::{
    format_rupees, Category, FacetOption, FacetSection, Facets, FilterGroup, PriceRange,
    RangeOption, TypeSpecificFacets, VariantCard,
};

use crate::features::{has_feature, FeatureId};
use crate::fields::spec_keys;
use crate::parse::{parse_energy_rating, parse_first_number, parse_gigabytes, parse_refresh_hz};

/// Matching key for nominal values: lowercase with all whitespace removed,
/// so `"8 GB"` and `"8GB"` are one option.
#[must_use]
pub fn facet_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Computes every facet for `cards`.
///
/// `selected_types` is the current selection of the type filter; the
/// type-specific panel is built only when it holds exactly one value.
#[must_use]
pub fn compute_facets(
    cards: &[VariantCard],
    category: Category,
    selected_types: &[String],
) -> Facets {
    let mut facets = Facets::empty(category);
    let all = || cards.iter();

    facets.brands = nominal_options(all(), FilterGroup::Brand);
    facets.colors = nominal_options(all(), FilterGroup::Color);

    match category {
        Category::Smartphone => {
            facets.ram = nominal_options(all(), FilterGroup::Ram);
            facets.storage = nominal_options(all(), FilterGroup::Storage);
            facets.processors = nominal_options(all(), FilterGroup::Processor);
            facets.refresh_rates = nominal_options(all(), FilterGroup::RefreshRate);
        }
        Category::Laptop => {
            facets.types = nominal_options(all(), FilterGroup::Type);
            facets.ram = nominal_options(all(), FilterGroup::Ram);
            facets.storage = nominal_options(all(), FilterGroup::Storage);
            facets.processors = nominal_options(all(), FilterGroup::Processor);
            facets.gpus = nominal_options(all(), FilterGroup::Gpu);
            facets.refresh_rates = nominal_options(all(), FilterGroup::RefreshRate);
        }
        Category::HomeAppliance => {
            facets.types = nominal_options(all(), FilterGroup::Type);
            facets.sub_types = nominal_options(all(), FilterGroup::SubType);
            facets.capacities = nominal_options(all(), FilterGroup::Capacity);
            facets.energy_ratings = nominal_options(all(), FilterGroup::EnergyRating);
            facets.refresh_rates = nominal_options(all(), FilterGroup::RefreshRate);
        }
    }

    facets.quick_features = quick_feature_options(cards, category);
    facets.price = range_options(cards, FilterGroup::Price, category);
    facets.battery = range_options(cards, FilterGroup::Battery, category);
    facets.display_size = range_options(cards, FilterGroup::DisplaySize, category);
    facets.weight = range_options(cards, FilterGroup::Weight, category);
    facets.ratings = range_options(cards, FilterGroup::Rating, category);
    facets.price_bounds = price_bounds(cards);

    if let [selected] = selected_types {
        facets.type_specific = Some(type_specific(cards, category, selected));
    }

    tracing::debug!(
        %category,
        cards = cards.len(),
        brands = facets.brands.len(),
        "computed facets"
    );
    facets
}

// ---------------------------------------------------------------------------
// Nominal facets
// ---------------------------------------------------------------------------

/// The display value a card contributes to a nominal filter group.
#[must_use]
pub fn nominal_value(card: &VariantCard, group: FilterGroup) -> Option<&str> {
    let value = match group {
        FilterGroup::Brand => Some(card.brand.as_str()),
        FilterGroup::Type => card.product_type.as_deref(),
        FilterGroup::SubType => card.spec(spec_keys::SUB_TYPE),
        FilterGroup::Ram => card.spec(spec_keys::RAM),
        FilterGroup::Storage => card.spec(spec_keys::STORAGE),
        FilterGroup::Color => card.spec(spec_keys::COLOR),
        FilterGroup::Processor => card
            .spec(spec_keys::PROCESSOR)
            .or(card.details.performance.processor.as_deref()),
        FilterGroup::Gpu => card
            .spec(spec_keys::GPU)
            .or(card.details.performance.gpu.as_deref()),
        FilterGroup::Capacity => card.spec(spec_keys::CAPACITY),
        FilterGroup::EnergyRating => card.spec(spec_keys::ENERGY_RATING),
        FilterGroup::RefreshRate => card.spec(spec_keys::REFRESH_RATE),
        _ => None,
    };
    value.map(str::trim).filter(|v| !v.is_empty())
}

enum Order {
    Alphabetical,
    Ascending(fn(&str) -> Option<f64>),
    Descending(fn(&str) -> Option<f64>),
}

fn order_for(group: FilterGroup) -> Order {
    match group {
        FilterGroup::Ram | FilterGroup::Storage => Order::Ascending(parse_gigabytes),
        FilterGroup::Capacity => Order::Ascending(capacity_value),
        FilterGroup::EnergyRating => Order::Descending(stars_value),
        FilterGroup::RefreshRate => Order::Descending(refresh_value),
        _ => Order::Alphabetical,
    }
}

fn capacity_value(text: &str) -> Option<f64> {
    Some(parse_first_number(text)).filter(|v| *v > 0.0)
}

fn stars_value(text: &str) -> Option<f64> {
    parse_energy_rating(text).map(f64::from)
}

fn refresh_value(text: &str) -> Option<f64> {
    parse_refresh_hz(text).or_else(|| crate::parse_helpers::first_number(text))
}

fn nominal_options<'a>(
    cards: impl Iterator<Item = &'a VariantCard>,
    group: FilterGroup,
) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for card in cards {
        let Some(value) = nominal_value(card, group) else {
            continue;
        };
        let key = facet_key(value);
        match index.get(&key) {
            Some(&i) => options[i].count += 1,
            None => {
                index.insert(key.clone(), options.len());
                options.push(FacetOption {
                    value: key,
                    label: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    sort_options(&mut options, order_for(group));
    options
}

fn sort_options(options: &mut [FacetOption], order: Order) {
    let alphabetical = |a: &FacetOption, b: &FacetOption| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.value.cmp(&b.value))
    };
    match order {
        Order::Alphabetical => options.sort_by(alphabetical),
        Order::Ascending(parse) => sort_numeric(options, parse, false, alphabetical),
        Order::Descending(parse) => sort_numeric(options, parse, true, alphabetical),
    }
}

fn sort_numeric(
    options: &mut [FacetOption],
    parse: fn(&str) -> Option<f64>,
    descending: bool,
    tie_break: impl Fn(&FacetOption, &FacetOption) -> std::cmp::Ordering,
) {
    options.sort_by(|a, b| {
        let by_number = match (parse(&a.label), parse(&b.label)) {
            (Some(x), Some(y)) if descending => y.total_cmp(&x),
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        by_number.then_with(|| tie_break(a, b))
    });
}

fn quick_feature_options(cards: &[VariantCard], category: Category) -> Vec<FacetOption> {
    FeatureId::for_category(category)
        .iter()
        .filter_map(|&feature| {
            let count = cards.iter().filter(|c| has_feature(c, feature)).count();
            (count > 0).then(|| FacetOption {
                value: feature.as_str().to_string(),
                label: feature.label().to_string(),
                count,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Range facets
// ---------------------------------------------------------------------------

type Band = (f64, Option<f64>);

const PHONE_PRICE: &[Band] = &[
    (0.0, Some(10_000.0)),
    (10_000.0, Some(20_000.0)),
    (20_000.0, Some(30_000.0)),
    (30_000.0, Some(50_000.0)),
    (50_000.0, Some(80_000.0)),
    (80_000.0, None),
];
const LAPTOP_PRICE: &[Band] = &[
    (0.0, Some(30_000.0)),
    (30_000.0, Some(50_000.0)),
    (50_000.0, Some(80_000.0)),
    (80_000.0, Some(120_000.0)),
    (120_000.0, None),
];
const APPLIANCE_PRICE: &[Band] = &[
    (0.0, Some(15_000.0)),
    (15_000.0, Some(30_000.0)),
    (30_000.0, Some(50_000.0)),
    (50_000.0, Some(80_000.0)),
    (80_000.0, None),
];
const PHONE_BATTERY_MAH: &[Band] = &[
    (0.0, Some(4000.0)),
    (4000.0, Some(5000.0)),
    (5000.0, Some(6000.0)),
    (6000.0, None),
];
const LAPTOP_BATTERY_WH: &[Band] = &[
    (0.0, Some(40.0)),
    (40.0, Some(50.0)),
    (50.0, Some(70.0)),
    (70.0, None),
];
const PHONE_DISPLAY: &[Band] = &[
    (0.0, Some(6.1)),
    (6.1, Some(6.5)),
    (6.5, Some(6.8)),
    (6.8, None),
];
const LAPTOP_DISPLAY: &[Band] = &[
    (0.0, Some(13.0)),
    (13.0, Some(14.0)),
    (14.0, Some(15.0)),
    (15.0, Some(16.0)),
    (16.0, None),
];
const TV_DISPLAY: &[Band] = &[
    (0.0, Some(32.0)),
    (32.0, Some(43.0)),
    (43.0, Some(55.0)),
    (55.0, Some(65.0)),
    (65.0, None),
];
const PHONE_WEIGHT_G: &[Band] = &[
    (0.0, Some(150.0)),
    (150.0, Some(180.0)),
    (180.0, Some(200.0)),
    (200.0, None),
];
const LAPTOP_WEIGHT_KG: &[Band] = &[
    (0.0, Some(1.2)),
    (1.2, Some(1.5)),
    (1.5, Some(2.0)),
    (2.0, None),
];
const RATING_BANDS: &[Band] = &[(4.5, None), (4.0, None), (3.5, None), (3.0, None)];

fn bands(group: FilterGroup, category: Category) -> &'static [Band] {
    match (group, category) {
        (FilterGroup::Price, Category::Smartphone) => PHONE_PRICE,
        (FilterGroup::Price, Category::Laptop) => LAPTOP_PRICE,
        (FilterGroup::Price, Category::HomeAppliance) => APPLIANCE_PRICE,
        (FilterGroup::Battery, Category::Smartphone) => PHONE_BATTERY_MAH,
        (FilterGroup::Battery, Category::Laptop) => LAPTOP_BATTERY_WH,
        (FilterGroup::DisplaySize, Category::Smartphone) => PHONE_DISPLAY,
        (FilterGroup::DisplaySize, Category::Laptop) => LAPTOP_DISPLAY,
        (FilterGroup::DisplaySize, Category::HomeAppliance) => TV_DISPLAY,
        (FilterGroup::Weight, Category::Smartphone) => PHONE_WEIGHT_G,
        (FilterGroup::Weight, Category::Laptop) => LAPTOP_WEIGHT_KG,
        (FilterGroup::Rating, _) => RATING_BANDS,
        _ => &[],
    }
}

fn unit(group: FilterGroup, category: Category) -> &'static str {
    match (group, category) {
        (FilterGroup::Battery, Category::Smartphone) => " mAh",
        (FilterGroup::Battery, _) => " Wh",
        (FilterGroup::DisplaySize, _) => "\"",
        (FilterGroup::Weight, Category::Smartphone) => " g",
        (FilterGroup::Weight, _) => " kg",
        _ => "",
    }
}

/// Bucket table for a range group, with zero counts. Empty for groups that
/// are not range-bucketed in `category`.
#[must_use]
pub fn range_buckets(group: FilterGroup, category: Category) -> Vec<RangeOption> {
    bands(group, category)
        .iter()
        .map(|&(min, max)| RangeOption {
            id: band_id(min, max),
            label: band_label(group, category, min, max),
            min,
            max,
            count: 0,
        })
        .collect()
}

/// The number a card contributes to a range group.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn range_value(card: &VariantCard, group: FilterGroup) -> Option<f64> {
    match group {
        FilterGroup::Price => card.display_price.map(|p| p as f64),
        FilterGroup::Battery => match card.category {
            Category::Smartphone => card.numeric.battery_mah,
            Category::Laptop => card.numeric.battery_wh,
            Category::HomeAppliance => None,
        },
        FilterGroup::DisplaySize => card.numeric.display_inches,
        FilterGroup::Weight => card.numeric.weight,
        FilterGroup::Rating => card.numeric.rating,
        _ => None,
    }
}

fn range_options(
    cards: &[VariantCard],
    group: FilterGroup,
    category: Category,
) -> Vec<RangeOption> {
    let mut buckets = range_buckets(group, category);
    for value in cards.iter().filter_map(|c| range_value(c, group)) {
        for bucket in &mut buckets {
            if bucket.contains(value) {
                bucket.count += 1;
            }
        }
    }
    buckets.retain(|b| b.count > 0);
    buckets
}

fn band_id(min: f64, max: Option<f64>) -> String {
    match max {
        Some(max) => format!("{}-{}", fmt_num(min), fmt_num(max)),
        None => format!("{}+", fmt_num(min)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn band_label(group: FilterGroup, category: Category, min: f64, max: Option<f64>) -> String {
    if group == FilterGroup::Rating {
        return format!("{}★ & above", fmt_num(min));
    }
    let show = |v: f64| match group {
        FilterGroup::Price => format_rupees(v as u64),
        _ => format!("{}{}", fmt_num(v), unit(group, category)),
    };
    match max {
        Some(max) if min <= 0.0 => format!("Under {}", show(max)),
        Some(max) => format!("{} - {}", show(min), show(max)),
        None => format!("{} & above", show(min)),
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn price_bounds(cards: &[VariantCard]) -> Option<PriceRange> {
    let prices = cards.iter().filter_map(|c| c.display_price);
    let min = prices.clone().min()?;
    let max = prices.max()?;
    Some(PriceRange { min, max })
}

// ---------------------------------------------------------------------------
// Type-specific panel
// ---------------------------------------------------------------------------

fn type_specific(cards: &[VariantCard], category: Category, selected: &str) -> TypeSpecificFacets {
    let wanted = facet_key(selected);
    let of_type: Vec<&VariantCard> = cards
        .iter()
        .filter(|c| c.product_type.as_deref().map(facet_key).as_deref() == Some(wanted.as_str()))
        .collect();
    let product_type = of_type
        .first()
        .and_then(|c| c.product_type.clone())
        .unwrap_or_else(|| selected.to_string());

    let sections = type_sections(category, &wanted)
        .iter()
        .map(|&(group, title)| FacetSection {
            group,
            title: title.to_string(),
            options: nominal_options(of_type.iter().copied(), group),
        })
        .collect();

    TypeSpecificFacets {
        product_type,
        sections,
    }
}

fn type_sections(category: Category, type_key: &str) -> &'static [(FilterGroup, &'static str)] {
    match category {
        Category::HomeAppliance if type_key.contains("washing") => &[
            (FilterGroup::SubType, "Load Type"),
            (FilterGroup::Capacity, "Capacity"),
            (FilterGroup::EnergyRating, "Energy Rating"),
        ],
        Category::HomeAppliance
            if type_key.contains("refrigerator") || type_key.contains("fridge") =>
        {
            &[
                (FilterGroup::SubType, "Door Type"),
                (FilterGroup::Capacity, "Capacity"),
                (FilterGroup::EnergyRating, "Energy Rating"),
            ]
        }
        Category::HomeAppliance if type_key == "ac" || type_key.contains("airconditioner") => &[
            (FilterGroup::SubType, "AC Type"),
            (FilterGroup::Capacity, "Tonnage"),
            (FilterGroup::EnergyRating, "Energy Rating"),
        ],
        Category::HomeAppliance if type_key == "tv" || type_key.contains("television") => &[
            (FilterGroup::SubType, "Display Type"),
            (FilterGroup::RefreshRate, "Refresh Rate"),
        ],
        Category::HomeAppliance => &[
            (FilterGroup::SubType, "Type"),
            (FilterGroup::EnergyRating, "Energy Rating"),
        ],
        Category::Laptop if type_key.contains("gaming") => &[
            (FilterGroup::Gpu, "Graphics"),
            (FilterGroup::RefreshRate, "Refresh Rate"),
            (FilterGroup::Ram, "RAM"),
        ],
        Category::Laptop => &[
            (FilterGroup::Processor, "Processor"),
            (FilterGroup::Ram, "RAM"),
            (FilterGroup::Storage, "Storage"),
        ],
        Category::Smartphone => &[
            (FilterGroup::Ram, "RAM"),
            (FilterGroup::Storage, "Storage"),
        ],
    }
}

#[cfg(test)]
#[path = "facets_test.rs"]
mod tests;
