//! Loading raw catalog dumps from disk.

use std::path::Path;

use anyhow::Context;

use gadgetcmp_catalog::{extract_records, CatalogSnapshot, InMemoryDeviceRegistry};
use gadgetcmp_core::{Category, RawRecord};

/// Reads a JSON dump: a bare record array, an API envelope, or the
/// per-category object written by `fetch --all`.
pub(crate) fn load_records(path: &Path, category: Category) -> anyhow::Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let body: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    records_from(&body, category)
        .with_context(|| format!("no {category} records found in {}", path.display()))
}

fn records_from(body: &serde_json::Value, category: Category) -> Option<Vec<RawRecord>> {
    body.get(category.as_str())
        .and_then(extract_records)
        .or_else(|| extract_records(body))
        .cloned()
}

/// Runs the pipeline over a dump with a throwaway registry.
pub(crate) fn load_snapshot(path: &Path, category: Category) -> anyhow::Result<CatalogSnapshot> {
    let raw = load_records(path, category)?;
    let mut registry = InMemoryDeviceRegistry::new();
    Ok(CatalogSnapshot::build(&raw, category, &mut registry))
}
