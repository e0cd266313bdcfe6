use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// One product record exactly as the catalog API returned it.
///
/// No shape is guaranteed: any field may be absent, null, a string, a number,
/// or a nested object under one of several historical key names. Records are
/// only ever read.
pub type RawRecord = serde_json::Value;

/// Device category served by one catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Smartphone,
    Laptop,
    HomeAppliance,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Smartphone,
        Category::Laptop,
        Category::HomeAppliance,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Smartphone => "smartphone",
            Category::Laptop => "laptop",
            Category::HomeAppliance => "home-appliance",
        }
    }

    /// Collection path segment used by the catalog API.
    #[must_use]
    pub fn api_path(self) -> &'static str {
        match self {
            Category::Smartphone => "smartphones",
            Category::Laptop => "laptops",
            Category::HomeAppliance => "home-appliances",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smartphone" | "smartphones" | "phone" | "phones" | "mobile" | "mobiles" => {
                Ok(Category::Smartphone)
            }
            "laptop" | "laptops" => Ok(Category::Laptop),
            "home-appliance" | "home-appliances" | "appliance" | "appliances" => {
                Ok(Category::HomeAppliance)
            }
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// One retailer's listing for a specific variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOffer {
    pub store_name: String,
    /// Parsed price in whole rupees. `None` when the source sent `"NaN"`,
    /// an empty string, or zero.
    pub price: Option<u64>,
    pub url: Option<String>,
    pub offer_text: Option<String>,
    pub delivery_info: Option<String>,
}

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Unique within the parent product. Synthesized from the product id and
    /// position when the source has none.
    pub variant_id: String,
    /// The id the catalog API sent, if any.
    pub source_variant_id: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub color: Option<String>,
    /// Appliance differentiator, e.g. `"7 kg"` or `"260 L"`.
    pub capacity: Option<String>,
    /// Appliance differentiator, e.g. `"5 Star"`.
    pub energy_rating: Option<String>,
    pub base_price: Option<u64>,
    pub store_offers: Vec<StoreOffer>,
}

impl Variant {
    /// Lowest positive offer price together with the store that lists it.
    #[must_use]
    pub fn lowest_offer(&self) -> Option<(&StoreOffer, u64)> {
        self.store_offers
            .iter()
            .filter_map(|offer| offer.price.filter(|p| *p > 0).map(|p| (offer, p)))
            .min_by_key(|(_, price)| *price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    pub size_inches: Option<f64>,
    /// Panel technology as written by the source, e.g. `"Dynamic AMOLED 2X"`.
    pub panel: Option<String>,
    pub refresh_rate_hz: Option<f64>,
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    pub capacity_mah: Option<f64>,
    pub capacity_wh: Option<f64>,
    pub fast_charging_watts: Option<f64>,
    pub wireless_charging: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    /// Megapixel figure of every rear sensor, in source order.
    pub rear_megapixels: Vec<f64>,
    pub front_megapixels: Option<f64>,
    pub ois: Option<bool>,
    /// Free-text camera feature tags (modes, AI scene detection, ...).
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInfo {
    pub processor: Option<String>,
    pub gpu: Option<String>,
    pub ram_gb: Option<f64>,
    pub storage_gb: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityInfo {
    pub network: Option<String>,
    pub five_g: Option<bool>,
}

/// Values lifted from the source's structured sub-objects.
///
/// A field is `Some` only when the source carried it as a structured value.
/// Feature detection prefers these over the display strings in
/// [`NormalizedProduct::specs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceDetails {
    pub display: DisplayInfo,
    pub battery: BatteryInfo,
    pub camera: CameraInfo,
    pub performance: PerformanceInfo,
    pub connectivity: ConnectivityInfo,
    /// Fingerprint sensor description, e.g. `"In-display (ultrasonic)"`.
    pub fingerprint: Option<String>,
    pub ai_features: Vec<String>,
    pub inverter: Option<bool>,
}

/// Parsed numbers used for range filters and sorting.
///
/// Absent or unparseable values are `None`, never `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericFields {
    /// Lowest positive price across all variants' offers and base prices.
    pub price: Option<u64>,
    pub rating: Option<f64>,
    pub battery_mah: Option<f64>,
    pub battery_wh: Option<f64>,
    pub fast_charging_watts: Option<f64>,
    pub capacity: Option<f64>,
    pub energy_rating: Option<f64>,
    /// First number of the weight string, in whatever unit the source used.
    pub weight: Option<f64>,
    pub display_inches: Option<f64>,
    pub refresh_hz: Option<f64>,
    pub ram_gb: Option<f64>,
    pub storage_gb: Option<f64>,
    pub rear_camera_mp: Option<f64>,
}

/// A catalog record after extraction, identical in shape across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub product_id: String,
    pub category: Category,
    pub name: String,
    pub brand: String,
    pub model: String,
    /// Category-type value, e.g. `"Washing Machine"` for appliances or
    /// `"Gaming"` for laptops.
    pub product_type: Option<String>,
    pub images: Vec<String>,
    /// Attribute name → display string (`ram`, `storage`, `display`, ...).
    pub specs: BTreeMap<String, String>,
    pub numeric: NumericFields,
    pub details: DeviceDetails,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub variants: Vec<Variant>,
    /// Offers listed on the record itself rather than under a variant.
    pub store_offers: Vec<StoreOffer>,
    pub launch_date: Option<String>,
}

impl NormalizedProduct {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn spec(&self, key: &str) -> Option<&str> {
        self.specs.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn launched_on(&self) -> Option<NaiveDate> {
        self.launch_date.as_deref().and_then(parse_launch_date)
    }
}

/// The flattened unit that filtering, sorting, and comparison operate on:
/// one [`Variant`] together with its parent product's shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantCard {
    pub product_id: String,
    pub category: Category,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub product_type: Option<String>,
    pub images: Vec<String>,
    /// Product specs with this variant's differentiators layered on top.
    pub specs: BTreeMap<String, String>,
    /// Product numbers with this variant's differentiators layered on top.
    pub numeric: NumericFields,
    pub details: DeviceDetails,
    pub features: Vec<String>,
    pub description: Option<String>,
    pub launch_date: Option<String>,
    pub variant: Variant,
    /// Position within the parent's variant list. `None` for the synthetic
    /// card of a product without variants.
    pub variant_index: Option<usize>,
    pub display_price: Option<u64>,
    /// Store whose offer produced `display_price`, when an offer won.
    pub lowest_offer_store: Option<String>,
    pub compare_key: String,
}

impl VariantCard {
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.variant_index.is_none()
    }

    #[must_use]
    pub fn spec(&self, key: &str) -> Option<&str> {
        self.specs.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn launched_on(&self) -> Option<NaiveDate> {
        self.launch_date.as_deref().and_then(parse_launch_date)
    }

    /// Short variant label, e.g. `"8GB / 128GB, Blue"` or `"7 kg, 5 Star"`.
    #[must_use]
    pub fn variant_label(&self) -> String {
        let v = &self.variant;
        let sizes: Vec<&str> = [&v.ram, &v.storage, &v.capacity]
            .into_iter()
            .filter_map(|s| s.as_deref())
            .collect();
        let mut label = sizes.join(" / ");
        for extra in [&v.energy_rating, &v.color].into_iter().flatten() {
            if !label.is_empty() {
                label.push_str(", ");
            }
            label.push_str(extra);
        }
        label
    }

    /// Price for display: `"₹23,000"` or `"Price not available"`.
    #[must_use]
    pub fn price_label(&self) -> String {
        match self.display_price {
            Some(price) => format_rupees(price),
            None => "Price not available".to_string(),
        }
    }
}

/// Parses the launch-date formats observed in catalog payloads.
///
/// Month-only dates (`"March 2024"`, `"2024-03"`) resolve to the first of the
/// month.
#[must_use]
pub fn parse_launch_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    // "2024-03-05T00:00:00" without an offset
    if let Some(date_part) = s.split('T').next().filter(|d| d.len() == 10) {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Some(date);
        }
    }
    let with_day = format!("1 {s}");
    for fmt in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Some(date);
        }
    }
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

/// Rupee amount with Indian digit grouping: `2300000` → `"₹23,00,000"`.
#[must_use]
pub fn format_rupees(value: u64) -> String {
    format!("₹{}", group_thousands(value))
}

/// Indian digit grouping: `2300000` → `"23,00,000"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
