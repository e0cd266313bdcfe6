//! Normalization from raw catalog records to [`gadgetcmp_core::NormalizedProduct`].
//!
//! Field lookup is delegated to [`crate::extract`] over the candidate tables
//! in [`crate::fields`]; numeric parsing is delegated to [`crate::parse`].
//! This module only assembles the results. Nothing here fails: a record that
//! is not a JSON object is skipped, and every missing field degrades to an
//! empty value.

use std::collections::{BTreeMap, HashMap};

use gadgetcmp_core::{
    BatteryInfo, CameraInfo, Category, ConnectivityInfo, DeviceDetails, DisplayInfo,
    NormalizedProduct, NumericFields, PerformanceInfo, RawRecord, StoreOffer, Variant,
};
use serde_json::Value;

use crate::extract::{
    first_array, first_bool, first_number, first_text, first_value, image_urls, lookup,
    string_list,
};
use crate::fields::{self, spec_keys};
use crate::parse::{
    non_zero, parse_battery_mah, parse_battery_wh, parse_display_inches, parse_energy_rating,
    parse_first_number, parse_gigabytes, parse_megapixels, parse_price_value, parse_refresh_hz,
    parse_watts,
};
use crate::parse_helpers::max_of;

/// Normalizes one category's raw batch.
///
/// Output order follows input order. Records that are not JSON objects are
/// skipped. Product ids are unique within the result: a repeated id gets a
/// `~2`, `~3`, ... suffix.
#[must_use]
pub fn normalize_category(raw: &[RawRecord], category: Category) -> Vec<NormalizedProduct> {
    let mut products = Vec::with_capacity(raw.len());
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for (index, record) in raw.iter().enumerate() {
        let Some(mut product) = normalize_record(record, category, index) else {
            tracing::debug!(%category, index, "skipping catalog record that is not an object");
            continue;
        };

        let seen = seen_ids.entry(product.product_id.clone()).or_insert(0);
        *seen += 1;
        if *seen > 1 {
            let unique = format!("{}~{}", product.product_id, seen);
            tracing::debug!(
                %category,
                product_id = %product.product_id,
                renamed = %unique,
                "duplicate product id in batch"
            );
            product.product_id = unique;
        }
        products.push(product);
    }

    tracing::debug!(
        %category,
        count = products.len(),
        skipped = raw.len() - products.len(),
        "normalized catalog batch"
    );
    products
}

/// Normalizes a single record. `index` is the record's position in its
/// batch and only feeds the last-resort product id.
///
/// Returns `None` when `record` is not a JSON object.
#[must_use]
pub fn normalize_record(
    record: &RawRecord,
    category: Category,
    index: usize,
) -> Option<NormalizedProduct> {
    if !record.is_object() {
        return None;
    }

    let name = first_text(record, fields::NAME).unwrap_or_default();
    let brand = first_text(record, fields::BRAND).unwrap_or_default();
    let model = first_text(record, fields::MODEL).unwrap_or_default();
    let product_id = first_text(record, fields::PRODUCT_ID)
        .or_else(|| slugify(&format!("{brand} {name}")))
        .unwrap_or_else(|| format!("{category}-{index}"));

    let details = extract_details(record, category);
    let specs = extract_specs(record, category, &details);

    let variants = first_array(record, fields::VARIANTS)
        .map(|items| normalize_variants(items, &product_id))
        .unwrap_or_default();
    let store_offers = normalize_offers(record);
    let product_price = first_price(record, fields::PRODUCT_PRICE);

    let mut numeric = numeric_fields(category, &specs, &details);
    numeric.price = aggregate_price(&variants, &store_offers, product_price);
    numeric.rating = first_number(record, fields::RATING).filter(|r| *r > 0.0);

    Some(NormalizedProduct {
        product_id,
        category,
        name,
        brand,
        model,
        product_type: first_text(record, fields::product_type_paths(category)),
        images: image_urls(record, fields::IMAGES),
        specs,
        numeric,
        details,
        features: string_list(record, fields::FEATURES),
        description: first_text(record, fields::DESCRIPTION),
        variants,
        store_offers,
        launch_date: first_text(record, fields::LAUNCH_DATE),
    })
}

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

fn extract_specs(
    record: &Value,
    category: Category,
    details: &DeviceDetails,
) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();
    for field in fields::spec_fields(category) {
        if let Some(text) = first_text(record, field.paths) {
            let text = match field.unit {
                Some(unit) if bare_number(&text).is_some() => format!("{text} {unit}"),
                _ => text,
            };
            specs.insert(field.key.to_string(), text);
        }
    }

    // Sensor lists read better rebuilt from the structured figures.
    if !details.camera.rear_megapixels.is_empty() {
        specs.insert(
            spec_keys::REAR_CAMERA.to_string(),
            format_megapixels(&details.camera.rear_megapixels),
        );
    }
    if let Some(front) = details.camera.front_megapixels {
        specs.insert(spec_keys::FRONT_CAMERA.to_string(), format_megapixels(&[front]));
    }
    specs
}

fn format_megapixels(values: &[f64]) -> String {
    values
        .iter()
        .map(|mp| format!("{}MP", trim_float(*mp)))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// The whole string is a positive number, e.g. `"6000"` or `" 6.7 "`.
fn bare_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

// ---------------------------------------------------------------------------
// Structured details
// ---------------------------------------------------------------------------

fn extract_details(record: &Value, category: Category) -> DeviceDetails {
    let text = |paths: &[&str]| first_text(record, paths);

    let display = DisplayInfo {
        size_inches: text(fields::DETAIL_DISPLAY_SIZE).and_then(|t| parse_display_inches(&t)),
        panel: text(fields::DETAIL_DISPLAY_PANEL),
        refresh_rate_hz: text(fields::DETAIL_REFRESH)
            .and_then(|t| parse_refresh_hz(&t).or_else(|| bare_number(&t))),
        resolution: text(fields::DETAIL_RESOLUTION),
    };

    let battery = BatteryInfo {
        capacity_mah: (category == Category::Smartphone)
            .then(|| text(fields::DETAIL_BATTERY_MAH))
            .flatten()
            .and_then(|t| non_zero(parse_battery_mah(&t))),
        capacity_wh: (category == Category::Laptop)
            .then(|| text(fields::DETAIL_BATTERY_WH))
            .flatten()
            .and_then(|t| non_zero(parse_battery_wh(&t))),
        fast_charging_watts: text(fields::DETAIL_FAST_CHARGING)
            .and_then(|t| parse_watts(&t).or_else(|| bare_number(&t))),
        wireless_charging: first_bool(record, fields::DETAIL_WIRELESS_CHARGING),
    };

    let camera = CameraInfo {
        rear_megapixels: first_value(record, fields::DETAIL_REAR_CAMERA)
            .map(megapixels_of)
            .unwrap_or_default(),
        front_megapixels: first_value(record, fields::DETAIL_FRONT_CAMERA)
            .and_then(|v| max_of(&megapixels_of(v))),
        ois: first_bool(record, fields::DETAIL_OIS),
        features: string_list(record, fields::DETAIL_CAMERA_FEATURES),
    };

    let performance = PerformanceInfo {
        processor: text(fields::DETAIL_PROCESSOR),
        gpu: text(fields::DETAIL_GPU),
        ram_gb: text(fields::DETAIL_RAM).and_then(|t| parse_gigabytes(&t)),
        storage_gb: text(fields::DETAIL_STORAGE).and_then(|t| parse_gigabytes(&t)),
    };

    let connectivity = ConnectivityInfo {
        network: text(fields::DETAIL_NETWORK),
        five_g: first_bool(record, fields::DETAIL_FIVE_G),
    };

    DeviceDetails {
        display,
        battery,
        camera,
        performance,
        connectivity,
        fingerprint: text(fields::DETAIL_FINGERPRINT),
        ai_features: string_list(record, fields::DETAIL_AI_FEATURES),
        inverter: first_bool(record, fields::DETAIL_INVERTER),
    }
}

/// Megapixel figures in a sensor value of any shape: a number, a
/// `"50MP + 12MP"` string, an object with a `megapixels` key, or an array
/// of any of those.
fn megapixels_of(value: &Value) -> Vec<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|mp| *mp > 0.0).into_iter().collect(),
        Value::String(s) => {
            let found = parse_megapixels(s);
            if found.is_empty() {
                bare_number(s).into_iter().collect()
            } else {
                found
            }
        }
        Value::Array(items) => items.iter().flat_map(megapixels_of).collect(),
        Value::Object(map) => fields::MEGAPIXEL_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .map(megapixels_of)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

fn numeric_fields(
    category: Category,
    specs: &BTreeMap<String, String>,
    details: &DeviceDetails,
) -> NumericFields {
    let spec = |key: &str| specs.get(key).map(String::as_str);

    let battery_mah = match category {
        Category::Smartphone => details
            .battery
            .capacity_mah
            .or_else(|| spec(spec_keys::BATTERY).and_then(|t| non_zero(parse_battery_mah(t)))),
        _ => None,
    };
    let battery_wh = match category {
        Category::Laptop => details
            .battery
            .capacity_wh
            .or_else(|| spec(spec_keys::BATTERY).and_then(|t| non_zero(parse_battery_wh(t)))),
        _ => None,
    };

    let rear_camera_mp = max_of(&details.camera.rear_megapixels)
        .or_else(|| spec(spec_keys::REAR_CAMERA).and_then(|t| max_of(&parse_megapixels(t))));

    NumericFields {
        price: None,
        rating: None,
        battery_mah,
        battery_wh,
        fast_charging_watts: details
            .battery
            .fast_charging_watts
            .or_else(|| spec(spec_keys::CHARGING).and_then(parse_watts)),
        capacity: spec(spec_keys::CAPACITY).and_then(|t| non_zero(parse_first_number(t))),
        energy_rating: spec(spec_keys::ENERGY_RATING)
            .and_then(parse_energy_rating)
            .filter(|stars| *stars > 0)
            .map(f64::from),
        weight: spec(spec_keys::WEIGHT).and_then(|t| non_zero(parse_first_number(t))),
        display_inches: details
            .display
            .size_inches
            .or_else(|| spec(spec_keys::DISPLAY).and_then(parse_display_inches)),
        refresh_hz: details
            .display
            .refresh_rate_hz
            .or_else(|| spec(spec_keys::REFRESH_RATE).and_then(parse_refresh_hz)),
        ram_gb: details
            .performance
            .ram_gb
            .or_else(|| spec(spec_keys::RAM).and_then(parse_gigabytes)),
        storage_gb: details
            .performance
            .storage_gb
            .or_else(|| spec(spec_keys::STORAGE).and_then(parse_gigabytes)),
        rear_camera_mp,
    }
}

/// Lowest positive price across every variant's offers and base price, the
/// record's own offers, and its product-level price field.
fn aggregate_price(
    variants: &[Variant],
    product_offers: &[StoreOffer],
    product_price: Option<u64>,
) -> Option<u64> {
    let variant_prices = variants.iter().flat_map(|v| {
        v.store_offers
            .iter()
            .filter_map(|o| o.price)
            .chain(v.base_price)
    });
    let product_prices = product_offers
        .iter()
        .filter_map(|o| o.price)
        .chain(product_price);

    variant_prices
        .chain(product_prices)
        .filter(|p| *p > 0)
        .min()
}

// ---------------------------------------------------------------------------
// Variants and offers
// ---------------------------------------------------------------------------

fn normalize_variants(items: &[Value], product_id: &str) -> Vec<Variant> {
    let mut variants: Vec<Variant> = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            tracing::debug!(product_id, index, "skipping variant that is not an object");
            continue;
        }
        let source_variant_id = first_text(item, fields::VARIANT_ID);
        let mut variant_id = source_variant_id
            .clone()
            .unwrap_or_else(|| format!("{product_id}-v{index}"));
        if variants.iter().any(|v| v.variant_id == variant_id) {
            variant_id = format!("{variant_id}-{index}");
        }

        variants.push(Variant {
            variant_id,
            source_variant_id,
            ram: first_text(item, fields::VARIANT_RAM),
            storage: first_text(item, fields::VARIANT_STORAGE),
            color: first_text(item, fields::VARIANT_COLOR),
            capacity: first_text(item, fields::VARIANT_CAPACITY),
            energy_rating: first_text(item, fields::VARIANT_ENERGY),
            base_price: first_price(item, fields::VARIANT_BASE_PRICE),
            store_offers: normalize_offers(item),
        });
    }
    variants
}

/// Offers under the first offer-list key of `container`.
///
/// Lists hold offer objects. A map keyed by store name
/// (`{"Amazon": 23000, "Croma": {"price": 24000}}`) is accepted too.
fn normalize_offers(container: &Value) -> Vec<StoreOffer> {
    for path in fields::OFFERS {
        match lookup(container, path) {
            Some(Value::Array(items)) => {
                let offers: Vec<StoreOffer> = items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(|item| normalize_offer(item, None))
                    .collect();
                if !offers.is_empty() {
                    return offers;
                }
            }
            Some(Value::Object(map)) if !map.is_empty() => {
                return map
                    .iter()
                    .map(|(store, value)| match value {
                        Value::Object(_) => normalize_offer(value, Some(store.as_str())),
                        _ => StoreOffer {
                            store_name: store.clone(),
                            price: price_of(value),
                            url: None,
                            offer_text: None,
                            delivery_info: None,
                        },
                    })
                    .collect();
            }
            _ => {}
        }
    }
    Vec::new()
}

fn normalize_offer(item: &Value, store_key: Option<&str>) -> StoreOffer {
    let store_name = first_text(item, fields::OFFER_STORE)
        .or_else(|| store_key.map(str::to_string))
        .unwrap_or_default();
    StoreOffer {
        store_name,
        price: first_price(item, fields::OFFER_PRICE),
        url: first_text(item, fields::OFFER_URL),
        offer_text: first_text(item, fields::OFFER_TEXT),
        delivery_info: first_text(item, fields::OFFER_DELIVERY),
    }
}

/// First candidate path holding a positive price.
fn first_price(record: &Value, paths: &[&str]) -> Option<u64> {
    paths
        .iter()
        .find_map(|path| lookup(record, path).and_then(price_of))
}

/// Positive price from a number, a display string, or an object carrying
/// `amount`/`value`/`price`.
fn price_of(value: &Value) -> Option<u64> {
    let price = match value {
        Value::Object(map) => fields::PRICE_AMOUNT
            .iter()
            .find_map(|key| map.get(*key))
            .map_or(0, parse_price_value),
        other => parse_price_value(other),
    };
    (price > 0).then_some(price)
}

fn slugify(text: &str) -> Option<String> {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    (!slug.is_empty()).then(|| slug.to_string())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
