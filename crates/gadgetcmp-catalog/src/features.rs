//! Named feature predicates over variant cards.
//!
//! Each detector reads the card's structured [`DeviceDetails`] (or a parsed
//! numeric field) first and only falls back to scanning display strings when
//! no structured value exists. Detection yields a boolean for quick-filter
//! chips and a nullable strength used by the feature sort.
//!
//! The AI and dedicated-GPU detectors are substring/token heuristics and may
//! misclassify names that happen to contain the token.
//!
//! [`DeviceDetails`]: gadgetcmp_core::DeviceDetails

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use gadgetcmp_core::{Category, VariantCard};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fields::spec_keys;
use crate::parse::{
    non_zero, parse_battery_mah, parse_battery_wh, parse_megapixels, parse_refresh_hz, parse_watts,
};
use crate::parse_helpers::max_of;

pub const FAST_CHARGING_MIN_WATTS: f64 = 65.0;
pub const HIGH_REFRESH_MIN_HZ: f64 = 120.0;
pub const HIGH_RAM_MIN_GB: f64 = 12.0;
pub const LONG_BATTERY_MIN_MAH: f64 = 6000.0;
/// Laptops need strictly more than this many watt-hours.
pub const LONG_BATTERY_LAPTOP_WH: f64 = 50.0;
pub const HIGH_CAMERA_MIN_MP: f64 = 50.0;
pub const ENERGY_EFFICIENT_MIN_STARS: f64 = 4.0;

/// Substrings that mark a discrete GPU model name.
const DEDICATED_GPU_MARKERS: [&str; 7] = [
    "rtx",
    "gtx",
    "geforce",
    "radeon rx",
    "arc a",
    "quadro",
    "mx",
];
const IN_DISPLAY_MARKERS: [&str; 4] = [
    "in-display",
    "in display",
    "under-display",
    "under display",
];

static AI_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bai\b").expect("AI token regex is valid"));
static FIVE_G_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b5g\b").expect("5G token regex is valid"));
static OIS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bois\b").expect("OIS token regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureId {
    #[serde(rename = "fast-charging")]
    FastCharging,
    #[serde(rename = "amoled")]
    Amoled,
    #[serde(rename = "high-refresh-rate")]
    HighRefreshRate,
    #[serde(rename = "5g-ready")]
    FiveG,
    #[serde(rename = "ois")]
    Ois,
    #[serde(rename = "long-battery")]
    LongBattery,
    #[serde(rename = "high-ram")]
    HighRam,
    #[serde(rename = "high-camera")]
    HighCamera,
    #[serde(rename = "ai-features")]
    AiFeatures,
    #[serde(rename = "in-display-fingerprint")]
    InDisplayFingerprint,
    #[serde(rename = "wireless-charging")]
    WirelessCharging,
    #[serde(rename = "dedicated-gpu")]
    DedicatedGpu,
    #[serde(rename = "energy-efficient")]
    EnergyEfficient,
    #[serde(rename = "inverter")]
    Inverter,
}

impl FeatureId {
    pub const ALL: [FeatureId; 14] = [
        FeatureId::FastCharging,
        FeatureId::Amoled,
        FeatureId::HighRefreshRate,
        FeatureId::FiveG,
        FeatureId::Ois,
        FeatureId::LongBattery,
        FeatureId::HighRam,
        FeatureId::HighCamera,
        FeatureId::AiFeatures,
        FeatureId::InDisplayFingerprint,
        FeatureId::WirelessCharging,
        FeatureId::DedicatedGpu,
        FeatureId::EnergyEfficient,
        FeatureId::Inverter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureId::FastCharging => "fast-charging",
            FeatureId::Amoled => "amoled",
            FeatureId::HighRefreshRate => "high-refresh-rate",
            FeatureId::FiveG => "5g-ready",
            FeatureId::Ois => "ois",
            FeatureId::LongBattery => "long-battery",
            FeatureId::HighRam => "high-ram",
            FeatureId::HighCamera => "high-camera",
            FeatureId::AiFeatures => "ai-features",
            FeatureId::InDisplayFingerprint => "in-display-fingerprint",
            FeatureId::WirelessCharging => "wireless-charging",
            FeatureId::DedicatedGpu => "dedicated-gpu",
            FeatureId::EnergyEfficient => "energy-efficient",
            FeatureId::Inverter => "inverter",
        }
    }

    /// Chip label shown to shoppers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FeatureId::FastCharging => "Fast Charging (65W+)",
            FeatureId::Amoled => "AMOLED / OLED Display",
            FeatureId::HighRefreshRate => "120Hz+ Display",
            FeatureId::FiveG => "5G Ready",
            FeatureId::Ois => "OIS Camera",
            FeatureId::LongBattery => "Long Battery Life",
            FeatureId::HighRam => "12GB+ RAM",
            FeatureId::HighCamera => "50MP+ Camera",
            FeatureId::AiFeatures => "AI Features",
            FeatureId::InDisplayFingerprint => "In-display Fingerprint",
            FeatureId::WirelessCharging => "Wireless Charging",
            FeatureId::DedicatedGpu => "Dedicated Graphics",
            FeatureId::EnergyEfficient => "4 Star+ Energy Rating",
            FeatureId::Inverter => "Inverter Technology",
        }
    }

    /// Features that make sense as quick-filter chips for `category`.
    #[must_use]
    pub fn for_category(category: Category) -> &'static [FeatureId] {
        match category {
            Category::Smartphone => &[
                FeatureId::FastCharging,
                FeatureId::Amoled,
                FeatureId::HighRefreshRate,
                FeatureId::FiveG,
                FeatureId::Ois,
                FeatureId::LongBattery,
                FeatureId::HighRam,
                FeatureId::HighCamera,
                FeatureId::AiFeatures,
                FeatureId::InDisplayFingerprint,
                FeatureId::WirelessCharging,
            ],
            Category::Laptop => &[
                FeatureId::DedicatedGpu,
                FeatureId::HighRam,
                FeatureId::HighRefreshRate,
                FeatureId::Amoled,
                FeatureId::LongBattery,
                FeatureId::FastCharging,
                FeatureId::AiFeatures,
            ],
            Category::HomeAppliance => &[
                FeatureId::EnergyEfficient,
                FeatureId::Inverter,
                FeatureId::AiFeatures,
                FeatureId::HighRefreshRate,
                FeatureId::Amoled,
            ],
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        match wanted.as_str() {
            "5g" | "five-g" => return Ok(FeatureId::FiveG),
            "oled" => return Ok(FeatureId::Amoled),
            "ai" => return Ok(FeatureId::AiFeatures),
            _ => {}
        }
        FeatureId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| format!("unknown feature '{s}'"))
    }
}

/// Result of one detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatch {
    pub matches: bool,
    /// Measured value behind the match (watts, Hz, mAh, ...), reported even
    /// when it falls below the threshold. Flag-style features report `1.0`
    /// when matched and `None` otherwise.
    pub strength: Option<f64>,
}

impl FeatureMatch {
    #[must_use]
    pub fn none() -> Self {
        Self {
            matches: false,
            strength: None,
        }
    }

    fn flag(matches: bool) -> Self {
        Self {
            matches,
            strength: matches.then_some(1.0),
        }
    }

    fn measured(value: Option<f64>, passes: impl FnOnce(f64) -> bool) -> Self {
        Self {
            matches: value.is_some_and(passes),
            strength: value,
        }
    }
}

/// Runs the detector for `feature` against `card`.
#[must_use]
pub fn detect_feature(card: &VariantCard, feature: FeatureId) -> FeatureMatch {
    match feature {
        FeatureId::FastCharging => FeatureMatch::measured(charging_watts(card), |w| {
            w >= FAST_CHARGING_MIN_WATTS
        }),
        FeatureId::Amoled => FeatureMatch::flag(has_oled_panel(card)),
        FeatureId::HighRefreshRate => {
            FeatureMatch::measured(refresh_hz(card), |hz| hz >= HIGH_REFRESH_MIN_HZ)
        }
        FeatureId::FiveG => FeatureMatch::flag(is_five_g(card)),
        FeatureId::Ois => FeatureMatch::flag(has_ois(card)),
        FeatureId::LongBattery => long_battery(card),
        FeatureId::HighRam => {
            FeatureMatch::measured(card.numeric.ram_gb, |gb| gb >= HIGH_RAM_MIN_GB)
        }
        FeatureId::HighCamera => {
            FeatureMatch::measured(rear_camera_mp(card), |mp| mp >= HIGH_CAMERA_MIN_MP)
        }
        FeatureId::AiFeatures => ai_features(card),
        FeatureId::InDisplayFingerprint => FeatureMatch::flag(has_in_display_fingerprint(card)),
        FeatureId::WirelessCharging => FeatureMatch::flag(has_wireless_charging(card)),
        FeatureId::DedicatedGpu => FeatureMatch::flag(has_dedicated_gpu(card)),
        FeatureId::EnergyEfficient => FeatureMatch::measured(card.numeric.energy_rating, |stars| {
            stars >= ENERGY_EFFICIENT_MIN_STARS
        }),
        FeatureId::Inverter => FeatureMatch::flag(has_inverter(card)),
    }
}

/// Shorthand for `detect_feature(card, feature).matches`.
#[must_use]
pub fn has_feature(card: &VariantCard, feature: FeatureId) -> bool {
    detect_feature(card, feature).matches
}

// ---------------------------------------------------------------------------
// Measured features
// ---------------------------------------------------------------------------

fn charging_watts(card: &VariantCard) -> Option<f64> {
    card.details
        .battery
        .fast_charging_watts
        .or_else(|| card.spec(spec_keys::CHARGING).and_then(parse_watts))
}

fn refresh_hz(card: &VariantCard) -> Option<f64> {
    card.details.display.refresh_rate_hz.or_else(|| {
        [spec_keys::REFRESH_RATE, spec_keys::DISPLAY, spec_keys::DISPLAY_TYPE]
            .into_iter()
            .find_map(|key| card.spec(key).and_then(parse_refresh_hz))
    })
}

fn rear_camera_mp(card: &VariantCard) -> Option<f64> {
    max_of(&card.details.camera.rear_megapixels)
        .or_else(|| card.spec(spec_keys::REAR_CAMERA).and_then(|t| max_of(&parse_megapixels(t))))
}

fn long_battery(card: &VariantCard) -> FeatureMatch {
    match card.category {
        Category::Smartphone => {
            let mah = card.details.battery.capacity_mah.or_else(|| {
                card.spec(spec_keys::BATTERY)
                    .and_then(|t| non_zero(parse_battery_mah(t)))
            });
            FeatureMatch::measured(mah, |mah| mah >= LONG_BATTERY_MIN_MAH)
        }
        Category::Laptop => {
            let wh = card.details.battery.capacity_wh.or_else(|| {
                card.spec(spec_keys::BATTERY)
                    .and_then(|t| non_zero(parse_battery_wh(t)))
            });
            FeatureMatch::measured(wh, |wh| wh > LONG_BATTERY_LAPTOP_WH)
        }
        Category::HomeAppliance => FeatureMatch::none(),
    }
}

fn ai_features(card: &VariantCard) -> FeatureMatch {
    let listed = card.details.ai_features.len();
    if listed > 0 {
        #[allow(clippy::cast_precision_loss)]
        let strength = listed as f64;
        return FeatureMatch {
            matches: true,
            strength: Some(strength),
        };
    }
    let mentioned = card
        .features
        .iter()
        .chain(&card.details.camera.features)
        .map(String::as_str)
        .chain(card.description.as_deref())
        .any(|text| AI_TOKEN.is_match(text));
    FeatureMatch::flag(mentioned)
}

// ---------------------------------------------------------------------------
// Flag features
// ---------------------------------------------------------------------------

fn has_oled_panel(card: &VariantCard) -> bool {
    let is_oled = |text: &str| text.to_lowercase().contains("oled");
    match card.details.display.panel.as_deref() {
        Some(panel) => is_oled(panel),
        None => spec_texts(card, &[spec_keys::DISPLAY_TYPE, spec_keys::DISPLAY])
            .chain(feature_texts(card))
            .any(is_oled),
    }
}

fn is_five_g(card: &VariantCard) -> bool {
    if let Some(flag) = card.details.connectivity.five_g {
        return flag;
    }
    if let Some(network) = card.details.connectivity.network.as_deref() {
        return FIVE_G_TOKEN.is_match(network);
    }
    spec_texts(card, &[spec_keys::NETWORK])
        .chain(feature_texts(card))
        .chain([card.name.as_str()])
        .any(|text| FIVE_G_TOKEN.is_match(text))
}

fn has_ois(card: &VariantCard) -> bool {
    if let Some(flag) = card.details.camera.ois {
        return flag;
    }
    spec_texts(card, &[spec_keys::REAR_CAMERA])
        .chain(feature_texts(card))
        .chain(card.details.camera.features.iter().map(String::as_str))
        .any(|text| OIS_TOKEN.is_match(text))
}

fn has_in_display_fingerprint(card: &VariantCard) -> bool {
    let in_display = |text: &str| {
        let lower = text.to_lowercase();
        IN_DISPLAY_MARKERS.iter().any(|m| lower.contains(m))
    };
    match card.details.fingerprint.as_deref() {
        Some(sensor) => in_display(sensor),
        None => spec_texts(card, &[spec_keys::FINGERPRINT])
            .chain(feature_texts(card))
            .any(in_display),
    }
}

fn has_wireless_charging(card: &VariantCard) -> bool {
    if let Some(flag) = card.details.battery.wireless_charging {
        return flag;
    }
    spec_texts(card, &[spec_keys::CHARGING])
        .chain(feature_texts(card))
        .any(|text| text.to_lowercase().contains("wireless"))
}

fn has_dedicated_gpu(card: &VariantCard) -> bool {
    let gpu = card
        .details
        .performance
        .gpu
        .as_deref()
        .or_else(|| card.spec(spec_keys::GPU));
    gpu.is_some_and(|name| {
        let lower = name.to_lowercase();
        DEDICATED_GPU_MARKERS.iter().any(|m| lower.contains(m))
    })
}

fn has_inverter(card: &VariantCard) -> bool {
    if let Some(flag) = card.details.inverter {
        return flag;
    }
    spec_texts(card, &[spec_keys::TYPE, spec_keys::SUB_TYPE])
        .chain(feature_texts(card))
        .chain([card.name.as_str()])
        .chain(card.description.as_deref())
        .any(|text| text.to_lowercase().contains("inverter"))
}

fn spec_texts<'a>(card: &'a VariantCard, keys: &'a [&str]) -> impl Iterator<Item = &'a str> {
    keys.iter().filter_map(|key| card.spec(key))
}

fn feature_texts(card: &VariantCard) -> impl Iterator<Item = &str> {
    card.features.iter().map(String::as_str)
}

#[cfg(test)]
#[path = "features_test.rs"]
mod tests;
