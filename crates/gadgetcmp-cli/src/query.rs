//! Read-only commands over a local catalog dump.

use std::collections::BTreeSet;
use std::path::Path;

use futures::future::join_all;
use tokio::task::JoinHandle;

use gadgetcmp_catalog::{CompareSet, FeatureId, SortKey, TelemetryClient, ToggleOutcome};
use gadgetcmp_core::{
    load_stores, AppConfig, Category, FilterGroup, FilterState, StoreDirectory, VariantCard,
};

use crate::input::load_snapshot;

const MISSING: &str = "\u{2014}";

#[derive(Debug, Default)]
pub(crate) struct InspectOptions {
    pub search: Option<String>,
    pub filters: Vec<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub sort: Option<SortKey>,
    pub feature: Option<FeatureId>,
    pub limit: usize,
}

/// Parses a `group=value` filter argument.
pub(crate) fn parse_filter_arg(arg: &str) -> anyhow::Result<(FilterGroup, String)> {
    let (group, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("filter '{arg}' must look like group=value"))?;
    let group = group.parse::<FilterGroup>().map_err(anyhow::Error::msg)?;
    let value = value.trim();
    if value.is_empty() {
        anyhow::bail!("filter '{arg}' has an empty value");
    }
    Ok((group, value.to_string()))
}

pub(crate) fn build_filter_state(options: &InspectOptions) -> anyhow::Result<FilterState> {
    let mut state = FilterState::new();
    for arg in &options.filters {
        let (group, value) = parse_filter_arg(arg)?;
        state.select(group, value);
    }
    if let Some(search) = &options.search {
        state.set_search(search.clone());
    }
    if options.min_price.is_some() || options.max_price.is_some() {
        state.set_price_range(
            options.min_price.unwrap_or(0),
            options.max_price.unwrap_or(u64::MAX),
        );
    }
    Ok(state)
}

/// Store names are shown through the directory when it loads; a missing or
/// invalid file only costs the display names.
fn store_directory(config: &AppConfig) -> StoreDirectory {
    load_stores(&config.stores_path).unwrap_or_else(|e| {
        tracing::warn!(
            path = %config.stores_path.display(),
            error = %e,
            "store directory unavailable"
        );
        StoreDirectory::default()
    })
}

fn store_label(stores: &StoreDirectory, store_name: &str) -> String {
    stores
        .lookup(store_name)
        .map_or_else(|| store_name.to_string(), |store| store.name.clone())
}

fn telemetry(config: &AppConfig) -> TelemetryClient {
    TelemetryClient::new(
        config.telemetry_url.clone(),
        config.request_timeout_secs,
        &config.user_agent,
    )
}

/// Waits for queued telemetry so a short-lived process does not drop it.
async fn flush(handles: Vec<JoinHandle<()>>) {
    for result in join_all(handles).await {
        if let Err(e) = result {
            tracing::debug!(error = %e, "telemetry task panicked");
        }
    }
}

/// Prints the cards that survive the filters, in sort order.
///
/// # Errors
///
/// Returns an error if the dump cannot be read or a filter is malformed.
pub(crate) async fn run_inspect(
    config: &AppConfig,
    input: &Path,
    category: Category,
    options: &InspectOptions,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(input, category)?;
    let state = build_filter_state(options)?;
    let cards = snapshot.query(&state, options.sort, options.feature);
    let stores = store_directory(config);

    let mut pending = Vec::new();
    if let Some(feature) = options.feature {
        pending.extend(telemetry(config).track_feature_click(category, feature));
    }

    if cards.is_empty() {
        println!(
            "no {category} cards match ({} loaded)",
            snapshot.cards().len()
        );
        flush(pending).await;
        return Ok(());
    }

    println!(
        "{:<28}{:<36}{:<26}{:<14}STORE",
        "KEY", "NAME", "VARIANT", "PRICE"
    );
    for card in cards.iter().take(options.limit) {
        let variant = card.variant_label();
        println!(
            "{:<28}{:<36}{:<26}{:<14}{}",
            truncate(&card.compare_key, 26),
            truncate(&card.name, 34),
            truncate(if variant.is_empty() { MISSING } else { &variant }, 24),
            card.price_label(),
            card.lowest_offer_store
                .as_deref()
                .map_or_else(|| MISSING.to_string(), |name| store_label(&stores, name)),
        );
    }
    if cards.len() > options.limit {
        println!("... {} more", cards.len() - options.limit);
    }
    flush(pending).await;
    Ok(())
}

/// Prints the facets of a dump as pretty JSON.
///
/// # Errors
///
/// Returns an error if the dump cannot be read.
pub(crate) fn run_facets(input: &Path, category: Category, types: &[String]) -> anyhow::Result<()> {
    let snapshot = load_snapshot(input, category)?;
    let mut state = FilterState::new();
    for value in types {
        state.select(FilterGroup::Type, value.clone());
    }
    let facets = snapshot.facets(&state);
    println!("{}", serde_json::to_string_pretty(&facets)?);
    Ok(())
}

/// Adds the cards named by `keys` to a compare set and prints them side by
/// side. Keys past the category's capacity are reported and skipped.
///
/// # Errors
///
/// Returns an error if the dump cannot be read or a key matches no card.
pub(crate) async fn run_compare(
    config: &AppConfig,
    input: &Path,
    category: Category,
    keys: &[String],
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(input, category)?;
    let mut set =
        CompareSet::for_category(category, config.phone_compare_limit, config.compare_limit);
    let tracker = telemetry(config);
    let mut pending = Vec::new();

    for key in keys {
        let card = snapshot.find_card(key).ok_or_else(|| {
            anyhow::anyhow!("no card with compare key '{key}'; run `inspect` to list keys")
        })?;
        if set.is_selected(card) {
            continue;
        }
        match set.toggle(card) {
            ToggleOutcome::Added => {
                pending.extend(tracker.track_compare_add(category, &card.product_id));
            }
            ToggleOutcome::AtCapacity => {
                tracing::warn!(
                    key = %key,
                    capacity = ?set.capacity(),
                    "compare set full; skipping"
                );
            }
            ToggleOutcome::Removed => {}
        }
    }

    let stores = store_directory(config);
    for (label, values) in compare_rows(set.list(), &stores) {
        println!("{label:<18}{}", values.join(" | "));
    }
    flush(pending).await;
    Ok(())
}

/// Side-by-side rows: identity rows first, then every spec any card has.
pub(crate) fn compare_rows(
    cards: &[VariantCard],
    stores: &StoreDirectory,
) -> Vec<(String, Vec<String>)> {
    let mut rows = vec![
        ("Name".to_string(), cards.iter().map(|c| c.name.clone()).collect()),
        ("Brand".to_string(), cards.iter().map(|c| c.brand.clone()).collect()),
        (
            "Variant".to_string(),
            cards
                .iter()
                .map(|c| {
                    let label = c.variant_label();
                    if label.is_empty() { MISSING.to_string() } else { label }
                })
                .collect(),
        ),
        ("Price".to_string(), cards.iter().map(VariantCard::price_label).collect()),
        (
            "Store".to_string(),
            cards
                .iter()
                .map(|c| {
                    c.lowest_offer_store
                        .as_deref()
                        .map_or_else(|| MISSING.to_string(), |name| store_label(stores, name))
                })
                .collect(),
        ),
    ];

    let spec_keys: BTreeSet<&str> = cards
        .iter()
        .flat_map(|c| c.specs.keys().map(String::as_str))
        .collect();
    for key in spec_keys {
        rows.push((
            key.to_string(),
            cards
                .iter()
                .map(|c| c.spec(key).unwrap_or(MISSING).to_string())
                .collect(),
        ));
    }
    rows
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars.saturating_sub(3)).collect::<String>())
    } else {
        text.to_string()
    }
}
