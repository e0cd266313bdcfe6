//! Expansion of normalized products into per-variant cards.
//!
//! Every product yields one [`VariantCard`] per variant, or exactly one
//! synthetic card when it has none, so every product can be filtered,
//! sorted, and compared.
//!
//! ## Display price
//!
//! Resolved per card, stopping at the first positive value:
//!
//! 1. the lowest positive price among the variant's own store offers;
//! 2. the variant's base price;
//! 3. the product's aggregate price (lowest positive value over all
//!    variants' offers and base prices plus product-level price fields);
//! 4. otherwise `None`, shown as "Price not available".

use std::collections::BTreeMap;

use gadgetcmp_core::{NormalizedProduct, NumericFields, Variant, VariantCard};

use crate::fields::spec_keys;
use crate::parse::{non_zero, parse_energy_rating, parse_first_number, parse_gigabytes};

/// Expands products into cards, preserving product order and, within a
/// product, variant order.
#[must_use]
pub fn expand_to_variant_cards(products: &[NormalizedProduct]) -> Vec<VariantCard> {
    let mut cards = Vec::with_capacity(products.iter().map(|p| p.variants.len().max(1)).sum());
    for product in products {
        if product.variants.is_empty() {
            cards.push(build_card(product, synthetic_variant(product), None));
        } else {
            for (index, variant) in product.variants.iter().enumerate() {
                cards.push(build_card(product, variant.clone(), Some(index)));
            }
        }
    }
    cards
}

/// Stand-in variant for a product without any. Carries the record's own
/// offers so they still drive the display price.
fn synthetic_variant(product: &NormalizedProduct) -> Variant {
    Variant {
        variant_id: format!("{}-v0", product.product_id),
        source_variant_id: None,
        ram: None,
        storage: None,
        color: None,
        capacity: None,
        energy_rating: None,
        base_price: None,
        store_offers: product.store_offers.clone(),
    }
}

fn build_card(product: &NormalizedProduct, variant: Variant, index: Option<usize>) -> VariantCard {
    let (display_price, lowest_offer_store) = resolve_display_price(product, &variant);
    let compare_key = compare_key(
        variant.source_variant_id.as_deref(),
        &product.product_id,
        index,
        &product.name,
    );

    let mut specs = product.specs.clone();
    let mut numeric = product.numeric.clone();
    overlay_variant(&variant, &mut specs, &mut numeric);

    VariantCard {
        product_id: product.product_id.clone(),
        category: product.category,
        name: product.name.clone(),
        brand: product.brand.clone(),
        model: product.model.clone(),
        product_type: product.product_type.clone(),
        images: product.images.clone(),
        specs,
        numeric,
        details: product.details.clone(),
        features: product.features.clone(),
        description: product.description.clone(),
        launch_date: product.launch_date.clone(),
        variant,
        variant_index: index,
        display_price,
        lowest_offer_store,
        compare_key,
    }
}

/// Runs the display-price waterfall for one variant. The store name is
/// returned only when an offer supplied the price.
#[must_use]
pub fn resolve_display_price(
    product: &NormalizedProduct,
    variant: &Variant,
) -> (Option<u64>, Option<String>) {
    if let Some((offer, price)) = variant.lowest_offer() {
        let store = (!offer.store_name.is_empty()).then(|| offer.store_name.clone());
        return (Some(price), store);
    }
    if let Some(base) = variant.base_price.filter(|p| *p > 0) {
        return (Some(base), None);
    }
    (product.numeric.price.filter(|p| *p > 0), None)
}

/// Stable identity of a card inside a compare set.
///
/// Precedence: the variant id sent by the catalog (scoped to its product,
/// since variant ids are only unique within one), then product id plus the
/// variant's position, then whatever identity is left. A degenerate record
/// can collide on the last form; that is accepted rather than failing.
#[must_use]
pub fn compare_key(
    source_variant_id: Option<&str>,
    product_id: &str,
    variant_index: Option<usize>,
    name: &str,
) -> String {
    if let Some(id) = source_variant_id.filter(|id| !id.trim().is_empty()) {
        if product_id.is_empty() {
            return format!("v:{id}");
        }
        return format!("v:{product_id}:{id}");
    }
    match variant_index {
        Some(index) if !product_id.is_empty() => format!("p:{product_id}:{index}"),
        _ if !product_id.is_empty() => format!("x:{product_id}"),
        _ => format!("x:{name}"),
    }
}

/// Layers the variant's differentiators over the product's shared values.
fn overlay_variant(
    variant: &Variant,
    specs: &mut BTreeMap<String, String>,
    numeric: &mut NumericFields,
) {
    if let Some(ram) = &variant.ram {
        specs.insert(spec_keys::RAM.to_string(), ram.clone());
        numeric.ram_gb = parse_gigabytes(ram).or(numeric.ram_gb);
    }
    if let Some(storage) = &variant.storage {
        specs.insert(spec_keys::STORAGE.to_string(), storage.clone());
        numeric.storage_gb = parse_gigabytes(storage).or(numeric.storage_gb);
    }
    if let Some(color) = &variant.color {
        specs.insert(spec_keys::COLOR.to_string(), color.clone());
    }
    if let Some(capacity) = &variant.capacity {
        specs.insert(spec_keys::CAPACITY.to_string(), capacity.clone());
        numeric.capacity = non_zero(parse_first_number(capacity)).or(numeric.capacity);
    }
    if let Some(rating) = &variant.energy_rating {
        specs.insert(spec_keys::ENERGY_RATING.to_string(), rating.clone());
        numeric.energy_rating = parse_energy_rating(rating)
            .filter(|stars| *stars > 0)
            .map(f64::from)
            .or(numeric.energy_rating);
    }
}
