//! One refresh of a category page: normalize, expand, register.

use gadgetcmp_core::{
    Category, Facets, FilterGroup, FilterState, NormalizedProduct, RawRecord, VariantCard,
};

use crate::facets::compute_facets;
use crate::features::FeatureId;
use crate::filter::filter_cards;
use crate::normalize::normalize_category;
use crate::registry::{DeviceRegistry, RegistrationOutcome};
use crate::sort::{sort_cards, SortKey};
use crate::variants::expand_to_variant_cards;

/// Immutable result of running the pipeline over one raw batch. A new batch
/// builds a new snapshot; nothing is updated in place.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    category: Category,
    products: Vec<NormalizedProduct>,
    cards: Vec<VariantCard>,
    registration: RegistrationOutcome,
}

impl CatalogSnapshot {
    pub fn build(
        raw: &[RawRecord],
        category: Category,
        registry: &mut dyn DeviceRegistry,
    ) -> Self {
        let products = normalize_category(raw, category);
        let cards = expand_to_variant_cards(&products);
        let registration = registry.register_normalized(category, &products);
        tracing::info!(
            %category,
            records = raw.len(),
            products = products.len(),
            cards = cards.len(),
            ?registration,
            "catalog snapshot built"
        );
        Self {
            category,
            products,
            cards,
            registration,
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn products(&self) -> &[NormalizedProduct] {
        &self.products
    }

    #[must_use]
    pub fn cards(&self) -> &[VariantCard] {
        &self.cards
    }

    #[must_use]
    pub fn registration(&self) -> RegistrationOutcome {
        self.registration
    }

    #[must_use]
    pub fn find_card(&self, compare_key: &str) -> Option<&VariantCard> {
        self.cards.iter().find(|c| c.compare_key == compare_key)
    }

    /// Filter then sort, the order a listing page applies them in.
    #[must_use]
    pub fn query(
        &self,
        state: &FilterState,
        sort: Option<SortKey>,
        feature: Option<FeatureId>,
    ) -> Vec<VariantCard> {
        sort_cards(filter_cards(&self.cards, state), sort, feature)
    }

    /// Facets over every card in the snapshot, so options stay visible while
    /// filters are active. The type-specific panel follows the type filter.
    #[must_use]
    pub fn facets(&self, state: &FilterState) -> Facets {
        let selected_types: Vec<String> = state
            .selected(FilterGroup::Type)
            .map(str::to_string)
            .collect();
        compute_facets(&self.cards, self.category, &selected_types)
    }
}
