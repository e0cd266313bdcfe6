//! Catalog normalization and faceted-filtering engine.
//!
//! The pure pipeline runs `normalize_category` → `expand_to_variant_cards`
//! → `compute_facets` / `filter_cards` / `sort_cards`, with the compare set
//! and device registry alongside. [`CatalogClient`] and [`TelemetryClient`]
//! are the only I/O.

mod pagination;
mod parse_helpers;
mod rate_limit;

pub mod client;
pub mod compare;
pub mod error;
pub mod extract;
pub mod facets;
pub mod features;
pub mod fields;
pub mod filter;
pub mod normalize;
pub mod parse;
pub mod registry;
pub mod snapshot;
pub mod sort;
pub mod telemetry;
pub mod variants;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{CatalogClient, CatalogPage};
pub use compare::{CompareSet, ToggleOutcome};
pub use error::CatalogError;
pub use facets::compute_facets;
pub use features::{detect_feature, has_feature, FeatureId, FeatureMatch};
pub use filter::{card_matches, filter_cards};
pub use normalize::{normalize_category, normalize_record};
pub use pagination::extract_records;
pub use registry::{DeviceRegistry, InMemoryDeviceRegistry, RegistrationOutcome};
pub use snapshot::CatalogSnapshot;
pub use sort::{sort_cards, SortKey};
pub use telemetry::{TelemetryClient, TelemetryEvent, TelemetryPayload};
pub use variants::{compare_key, expand_to_variant_cards, resolve_display_price};
