//! The filter predicate: AND across groups, OR within a group.

use gadgetcmp_core::{Category, FilterGroup, FilterState, RangeOption, VariantCard};

use crate::facets::{facet_key, nominal_value, range_buckets, range_value};
use crate::features::{has_feature, FeatureId};
use crate::fields::spec_keys;

/// Spec fields the free-text search looks at besides name, brand, model,
/// and type.
const SEARCHABLE_SPECS: &[&str] = &[
    spec_keys::PROCESSOR,
    spec_keys::RAM,
    spec_keys::STORAGE,
    spec_keys::DISPLAY,
    spec_keys::SUB_TYPE,
    spec_keys::CAPACITY,
];

/// Cards that pass every active filter, in their original order.
#[must_use]
pub fn filter_cards(cards: &[VariantCard], state: &FilterState) -> Vec<VariantCard> {
    if state.is_empty() {
        return cards.to_vec();
    }
    let kept: Vec<VariantCard> = cards
        .iter()
        .filter(|card| card_matches(card, state))
        .cloned()
        .collect();
    tracing::debug!(
        total = cards.len(),
        kept = kept.len(),
        groups = state.groups.len(),
        "filtered cards"
    );
    kept
}

/// `true` when `card` satisfies the search term, the price range, and every
/// non-empty filter group.
#[must_use]
pub fn card_matches(card: &VariantCard, state: &FilterState) -> bool {
    if !matches_search(card, &state.search) {
        return false;
    }
    if let Some(range) = &state.price_range {
        if !range.contains(card.display_price) {
            return false;
        }
    }
    state.groups.iter().all(|(&group, selected)| {
        selected.is_empty() || selected.iter().any(|option| matches_option(card, group, option))
    })
}

fn matches_search(card: &VariantCard, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&card.name)
        || contains(&card.brand)
        || contains(&card.model)
        || card.product_type.as_deref().is_some_and(contains)
        || SEARCHABLE_SPECS
            .iter()
            .filter_map(|key| card.spec(key))
            .any(contains)
}

fn matches_option(card: &VariantCard, group: FilterGroup, option: &str) -> bool {
    match group {
        FilterGroup::Price
        | FilterGroup::Battery
        | FilterGroup::DisplaySize
        | FilterGroup::Weight
        | FilterGroup::Rating => matches_range(card, group, option),
        FilterGroup::Features => {
            let wanted = option.trim().to_lowercase();
            card.features
                .iter()
                .any(|tag| tag.to_lowercase().contains(&wanted))
        }
        FilterGroup::QuickFeature => option
            .parse::<FeatureId>()
            .is_ok_and(|feature| has_feature(card, feature)),
        _ => nominal_value(card, group).is_some_and(|value| facet_key(value) == facet_key(option)),
    }
}

fn matches_range(card: &VariantCard, group: FilterGroup, option: &str) -> bool {
    let Some(value) = range_value(card, group) else {
        return false;
    };
    bucket_for(group, card.category, option).is_some_and(|bucket| bucket.contains(value))
}

fn bucket_for(group: FilterGroup, category: Category, id: &str) -> Option<RangeOption> {
    let id = id.trim();
    range_buckets(group, category)
        .into_iter()
        .find(|bucket| bucket.id == id)
}

#[cfg(test)]
mod tests {
    use gadgetcmp_core::Category;

    use super::*;
    use crate::test_support::{card, ids, with_spec};

    fn phones() -> Vec<VariantCard> {
        let mut a = with_spec(card("a", Category::Smartphone, Some(23_000)), "ram", "8 GB");
        a.brand = "Samsung".to_string();
        a.features = vec!["Dual SIM".to_string(), "Water Resistant".to_string()];
        let mut b = with_spec(card("b", Category::Smartphone, Some(15_000)), "ram", "12GB");
        b.brand = "OnePlus".to_string();
        b.numeric.battery_mah = Some(6000.0);
        let mut c = with_spec(card("c", Category::Smartphone, None), "ram", "8GB");
        c.brand = "samsung".to_string();
        vec![a, b, c]
    }

    #[test]
    fn empty_state_keeps_everything() {
        let cards = phones();
        assert_eq!(ids(&filter_cards(&cards, &FilterState::new())), ["a", "b", "c"]);
    }

    #[test]
    fn options_within_a_group_are_ored() {
        let mut state = FilterState::new();
        state.select(FilterGroup::Brand, "oneplus");
        state.select(FilterGroup::Brand, "Samsung");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["a", "b", "c"]);
    }

    #[test]
    fn groups_are_anded() {
        let mut state = FilterState::new();
        state.select(FilterGroup::Brand, "samsung");
        state.select(FilterGroup::Ram, "8 gb");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["a", "c"]);

        state.select(FilterGroup::Price, "20000-30000");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["a"]);
    }

    #[test]
    fn an_emptied_group_is_vacuous() {
        let mut state = FilterState::new();
        state.groups.insert(FilterGroup::Brand, Default::default());
        assert_eq!(filter_cards(&phones(), &state).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut state = FilterState::new();
        state.set_search("ONEPLUS");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["b"]);

        state.set_search("12gb");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["b"]);
    }

    #[test]
    fn search_combines_with_groups() {
        let mut state = FilterState::new();
        state.set_search("samsung");
        state.select(FilterGroup::Ram, "12GB");
        assert!(filter_cards(&phones(), &state).is_empty());
    }

    #[test]
    fn price_range_is_closed_and_excludes_unpriced_above_zero() {
        let mut state = FilterState::new();
        state.set_price_range(15_000, 23_000);
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["a", "b"]);

        state.set_price_range(0, 10_000);
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["c"]);
    }

    #[test]
    fn feature_tags_match_by_substring() {
        let mut state = FilterState::new();
        state.select(FilterGroup::Features, "water");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["a"]);
    }

    #[test]
    fn range_bucket_needs_a_value() {
        let mut state = FilterState::new();
        state.select(FilterGroup::Battery, "6000+");
        assert_eq!(ids(&filter_cards(&phones(), &state)), ["b"]);

        state.toggle(FilterGroup::Battery, "6000+");
        state.select(FilterGroup::Battery, "no-such-bucket");
        assert!(filter_cards(&phones(), &state).is_empty());
    }

    #[test]
    fn quick_feature_uses_detector() {
        let mut cards = phones();
        cards[1].details.battery.fast_charging_watts = Some(80.0);
        let mut state = FilterState::new();
        state.select(FilterGroup::QuickFeature, "fast-charging");
        assert_eq!(ids(&filter_cards(&cards, &state)), ["b"]);
    }
}
