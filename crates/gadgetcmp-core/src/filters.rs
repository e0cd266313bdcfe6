//! Filter selection and facet shapes shared between the engine and the UI.
//!
//! [`FilterState`] is owned by the caller and passed into the pure filter
//! functions; nothing in the engine keeps its own copy.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::products::Category;

/// A filter dimension. Selections within one group are OR-ed, groups are
/// AND-ed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterGroup {
    Brand,
    Type,
    SubType,
    Ram,
    Storage,
    Color,
    Processor,
    Gpu,
    Price,
    Battery,
    Capacity,
    EnergyRating,
    RefreshRate,
    DisplaySize,
    Weight,
    Rating,
    /// Free-text feature tags; an option matches when any tag contains it.
    Features,
    /// Quick-filter chips; options are feature ids such as `"fast-charging"`.
    QuickFeature,
}

impl FilterGroup {
    pub const ALL: [FilterGroup; 18] = [
        FilterGroup::Brand,
        FilterGroup::Type,
        FilterGroup::SubType,
        FilterGroup::Ram,
        FilterGroup::Storage,
        FilterGroup::Color,
        FilterGroup::Processor,
        FilterGroup::Gpu,
        FilterGroup::Price,
        FilterGroup::Battery,
        FilterGroup::Capacity,
        FilterGroup::EnergyRating,
        FilterGroup::RefreshRate,
        FilterGroup::DisplaySize,
        FilterGroup::Weight,
        FilterGroup::Rating,
        FilterGroup::Features,
        FilterGroup::QuickFeature,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterGroup::Brand => "brand",
            FilterGroup::Type => "type",
            FilterGroup::SubType => "sub-type",
            FilterGroup::Ram => "ram",
            FilterGroup::Storage => "storage",
            FilterGroup::Color => "color",
            FilterGroup::Processor => "processor",
            FilterGroup::Gpu => "gpu",
            FilterGroup::Price => "price",
            FilterGroup::Battery => "battery",
            FilterGroup::Capacity => "capacity",
            FilterGroup::EnergyRating => "energy-rating",
            FilterGroup::RefreshRate => "refresh-rate",
            FilterGroup::DisplaySize => "display-size",
            FilterGroup::Weight => "weight",
            FilterGroup::Rating => "rating",
            FilterGroup::Features => "features",
            FilterGroup::QuickFeature => "quick-feature",
        }
    }
}

impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FilterGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == wanted)
            .ok_or_else(|| format!("unknown filter group '{s}'"))
    }
}

/// Closed price interval in whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    /// A card without a price counts as `0`, so it only fails the range when
    /// `min > 0`.
    #[must_use]
    pub fn contains(&self, price: Option<u64>) -> bool {
        let price = price.unwrap_or(0);
        price >= self.min && price <= self.max
    }
}

/// The active filter selection for one catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub groups: BTreeMap<FilterGroup, BTreeSet<String>>,
    pub price_range: Option<PriceRange>,
    pub search: String,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to `group`. Blank values are ignored.
    pub fn select(&mut self, group: FilterGroup, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.groups
                .entry(group)
                .or_default()
                .insert(value.trim().to_string());
        }
        self
    }

    /// Flips membership of `value` in `group`; an emptied group is removed.
    pub fn toggle(&mut self, group: FilterGroup, value: &str) {
        let value = value.trim();
        let set = self.groups.entry(group).or_default();
        if !set.remove(value) && !value.is_empty() {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            self.groups.remove(&group);
        }
    }

    pub fn clear_group(&mut self, group: FilterGroup) {
        self.groups.remove(&group);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_price_range(&mut self, min: u64, max: u64) -> &mut Self {
        self.price_range = Some(PriceRange {
            min: min.min(max),
            max: max.max(min),
        });
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> &mut Self {
        self.search = search.into();
        self
    }

    /// Selected options of `group`, empty when nothing is selected.
    pub fn selected(&self, group: FilterGroup) -> impl Iterator<Item = &str> {
        self.groups
            .get(&group)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// `true` when no group, price range, or search term is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeSet::is_empty)
            && self.price_range.is_none()
            && self.search.trim().is_empty()
    }
}

/// A nominal facet value. `value` is the normalized matching key, `label`
/// keeps the casing of the first card that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub count: usize,
}

/// A numeric bucket. `max` is exclusive; `None` means open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeOption {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: Option<f64>,
    pub count: usize,
}

impl RangeOption {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value < max)
    }
}

/// One extra panel shown when exactly one category type is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSection {
    pub group: FilterGroup,
    pub title: String,
    pub options: Vec<FacetOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpecificFacets {
    pub product_type: String,
    pub sections: Vec<FacetSection>,
}

/// Filter options available over the current card set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    pub category: Category,
    pub brands: Vec<FacetOption>,
    pub types: Vec<FacetOption>,
    pub sub_types: Vec<FacetOption>,
    pub ram: Vec<FacetOption>,
    pub storage: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub processors: Vec<FacetOption>,
    pub gpus: Vec<FacetOption>,
    pub capacities: Vec<FacetOption>,
    pub energy_ratings: Vec<FacetOption>,
    pub refresh_rates: Vec<FacetOption>,
    pub quick_features: Vec<FacetOption>,
    pub price: Vec<RangeOption>,
    pub battery: Vec<RangeOption>,
    pub display_size: Vec<RangeOption>,
    pub weight: Vec<RangeOption>,
    pub ratings: Vec<RangeOption>,
    /// Lowest and highest resolved display price in the set.
    pub price_bounds: Option<PriceRange>,
    pub type_specific: Option<TypeSpecificFacets>,
}

impl Facets {
    #[must_use]
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            brands: Vec::new(),
            types: Vec::new(),
            sub_types: Vec::new(),
            ram: Vec::new(),
            storage: Vec::new(),
            colors: Vec::new(),
            processors: Vec::new(),
            gpus: Vec::new(),
            capacities: Vec::new(),
            energy_ratings: Vec::new(),
            refresh_rates: Vec::new(),
            quick_features: Vec::new(),
            price: Vec::new(),
            battery: Vec::new(),
            display_size: Vec::new(),
            weight: Vec::new(),
            ratings: Vec::new(),
            price_bounds: None,
            type_specific: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_group_parses_kebab_and_snake_case() {
        assert_eq!(
            "energy-rating".parse::<FilterGroup>(),
            Ok(FilterGroup::EnergyRating)
        );
        assert_eq!(
            "quick_feature".parse::<FilterGroup>(),
            Ok(FilterGroup::QuickFeature)
        );
        assert!("colour".parse::<FilterGroup>().is_err());
    }

    #[test]
    fn filter_group_names_round_trip() {
        for group in FilterGroup::ALL {
            assert_eq!(group.as_str().parse::<FilterGroup>(), Ok(group));
        }
    }

    #[test]
    fn empty_state_is_empty() {
        assert!(FilterState::new().is_empty());
        let mut state = FilterState::new();
        state.set_search("   ");
        assert!(state.is_empty());
    }

    #[test]
    fn select_ignores_blank_values() {
        let mut state = FilterState::new();
        state.select(FilterGroup::Brand, "  ");
        assert!(state.is_empty());
        state.select(FilterGroup::Brand, " Samsung ");
        assert_eq!(state.selected(FilterGroup::Brand).collect::<Vec<_>>(), ["Samsung"]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut state = FilterState::new();
        state.toggle(FilterGroup::Ram, "8gb");
        assert_eq!(state.selected(FilterGroup::Ram).count(), 1);
        state.toggle(FilterGroup::Ram, "8gb");
        assert!(state.groups.is_empty());
    }

    #[test]
    fn set_price_range_orders_bounds() {
        let mut state = FilterState::new();
        state.set_price_range(30_000, 20_000);
        assert_eq!(
            state.price_range,
            Some(PriceRange {
                min: 20_000,
                max: 30_000
            })
        );
    }

    #[test]
    fn price_range_treats_missing_price_as_zero() {
        let open = PriceRange { min: 0, max: 50_000 };
        let floored = PriceRange {
            min: 20_000,
            max: 50_000,
        };
        assert!(open.contains(None));
        assert!(!floored.contains(None));
        assert!(floored.contains(Some(20_000)));
        assert!(floored.contains(Some(50_000)));
        assert!(!floored.contains(Some(50_001)));
    }

    #[test]
    fn range_option_max_is_exclusive() {
        let bucket = RangeOption {
            id: "5000-6000".to_string(),
            label: "5000 - 5999 mAh".to_string(),
            min: 5000.0,
            max: Some(6000.0),
            count: 0,
        };
        assert!(bucket.contains(5000.0));
        assert!(bucket.contains(5999.0));
        assert!(!bucket.contains(6000.0));
    }
}
