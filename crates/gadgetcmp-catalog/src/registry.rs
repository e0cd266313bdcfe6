//! Shared device registry hook.
//!
//! Each category page registers its normalized set once per refresh so a
//! separate comparison screen can resolve products added from any page.
//! Registration is idempotent: an identical set leaves the registry and its
//! revision untouched.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use gadgetcmp_core::{Category, NormalizedProduct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The category's set changed and downstream consumers should refresh.
    Updated,
    /// The set was identical to the one already registered.
    Unchanged,
}

pub trait DeviceRegistry {
    fn register_normalized(
        &mut self,
        category: Category,
        products: &[NormalizedProduct],
    ) -> RegistrationOutcome;

    fn resolve(&self, product_id: &str) -> Option<&NormalizedProduct>;
}

#[derive(Debug)]
struct Registered {
    fingerprint: String,
    products: Vec<NormalizedProduct>,
}

/// Process-local registry keyed by category.
#[derive(Debug, Default)]
pub struct InMemoryDeviceRegistry {
    categories: HashMap<Category, Registered>,
    revision: u64,
}

impl InMemoryDeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped once for every registration that changed a category's set.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn products(&self, category: Category) -> &[NormalizedProduct] {
        self.categories
            .get(&category)
            .map_or(&[], |r| r.products.as_slice())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(|r| r.products.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DeviceRegistry for InMemoryDeviceRegistry {
    fn register_normalized(
        &mut self,
        category: Category,
        products: &[NormalizedProduct],
    ) -> RegistrationOutcome {
        let fingerprint = fingerprint(products);
        if self
            .categories
            .get(&category)
            .is_some_and(|r| r.fingerprint == fingerprint)
        {
            tracing::debug!(%category, count = products.len(), "registry unchanged");
            return RegistrationOutcome::Unchanged;
        }

        self.categories.insert(
            category,
            Registered {
                fingerprint,
                products: products.to_vec(),
            },
        );
        self.revision += 1;
        tracing::info!(
            %category,
            count = products.len(),
            revision = self.revision,
            "registry updated"
        );
        RegistrationOutcome::Updated
    }

    fn resolve(&self, product_id: &str) -> Option<&NormalizedProduct> {
        self.categories
            .values()
            .flat_map(|r| r.products.iter())
            .find(|p| p.product_id == product_id)
    }
}

/// SHA-256 over the canonical JSON form of the set. A set that fails to
/// serialize hashes its debug form instead so registration never fails.
fn fingerprint(products: &[NormalizedProduct]) -> String {
    let bytes = serde_json::to_vec(products).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "fingerprint fell back to debug form");
        format!("{products:?}").into_bytes()
    });
    format!("{:x}", Sha256::digest(&bytes))
}
