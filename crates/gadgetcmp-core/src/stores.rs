//! Store directory: maps the store names found in offers to display metadata.
//!
//! Offers name their retailer as free text (`"Amazon"`, `"amazon.in"`,
//! `"Reliance Digital "`). The directory resolves those names to a single
//! [`StoreInfo`] for logos and status badges. It plays no part in filtering.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreStatus::Active => write!(f, "active"),
            StoreStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "logoUrl", alias = "logo")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub status: StoreStatus,
    /// Other spellings the catalog uses for this store.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreInfo>,
}

/// Case- and whitespace-insensitive lookup over a validated store list.
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    stores: Vec<StoreInfo>,
    index: HashMap<String, usize>,
}

impl StoreDirectory {
    /// Builds a directory from `stores`. Later entries never shadow earlier
    /// ones that claimed the same name or alias.
    #[must_use]
    pub fn from_stores(stores: Vec<StoreInfo>) -> Self {
        let mut index = HashMap::new();
        for (position, store) in stores.iter().enumerate() {
            for name in std::iter::once(&store.name).chain(store.aliases.iter()) {
                index.entry(lookup_key(name)).or_insert(position);
            }
        }
        Self { stores, index }
    }

    #[must_use]
    pub fn lookup(&self, store_name: &str) -> Option<&StoreInfo> {
        self.index
            .get(&lookup_key(store_name))
            .and_then(|&position| self.stores.get(position))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreInfo> {
        self.stores.iter()
    }
}

/// Lowercases and drops all whitespace so `"Reliance  Digital"` and
/// `"reliancedigital"` collide.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Load and validate the store directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stores(path: &Path) -> Result<StoreDirectory, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile =
        serde_yaml::from_str(&content).map_err(ConfigError::StoresFileParse)?;

    validate_stores(&stores_file)?;

    Ok(StoreDirectory::from_stores(stores_file.stores))
}

fn validate_stores(stores_file: &StoresFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for store in &stores_file.stores {
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store name must be non-empty".to_string(),
            ));
        }

        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty id",
                store.name
            )));
        }

        if !seen_ids.insert(store.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }

        if !seen_names.insert(lookup_key(&store.name)) {
            return Err(ConfigError::Validation(format!(
                "duplicate store name: '{}'",
                store.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
