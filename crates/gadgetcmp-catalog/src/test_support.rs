//! Card fixtures shared by the unit tests of the query stages.

use std::collections::BTreeMap;

use gadgetcmp_core::{Category, DeviceDetails, NumericFields, Variant, VariantCard};

/// A bare card with the given identity and price; tests set whatever else
/// they exercise.
pub(crate) fn card(id: &str, category: Category, price: Option<u64>) -> VariantCard {
    VariantCard {
        product_id: id.to_string(),
        category,
        name: format!("Product {id}"),
        brand: "Acme".to_string(),
        model: String::new(),
        product_type: None,
        images: Vec::new(),
        specs: BTreeMap::new(),
        numeric: NumericFields {
            price,
            ..NumericFields::default()
        },
        details: DeviceDetails::default(),
        features: Vec::new(),
        description: None,
        launch_date: None,
        variant: Variant {
            variant_id: format!("{id}-v0"),
            source_variant_id: None,
            ram: None,
            storage: None,
            color: None,
            capacity: None,
            energy_rating: None,
            base_price: None,
            store_offers: Vec::new(),
        },
        variant_index: Some(0),
        display_price: price,
        lowest_offer_store: None,
        compare_key: format!("p:{id}:0"),
    }
}

pub(crate) fn with_spec(mut card: VariantCard, key: &str, value: &str) -> VariantCard {
    card.specs.insert(key.to_string(), value.to_string());
    card
}

pub(crate) fn ids(cards: &[VariantCard]) -> Vec<&str> {
    cards.iter().map(|c| c.product_id.as_str()).collect()
}
