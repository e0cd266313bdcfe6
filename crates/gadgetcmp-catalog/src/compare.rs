//! The bounded side-by-side selection.
//!
//! Entries are keyed by [`VariantCard::compare_key`]; membership tests and
//! toggles both go through that key so a card without an explicit variant
//! id is never added twice.

use gadgetcmp_core::{Category, VariantCard};

/// What [`CompareSet::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set was full and the card was not in it; nothing changed.
    AtCapacity,
}

#[derive(Debug, Clone, Default)]
pub struct CompareSet {
    capacity: Option<usize>,
    entries: Vec<VariantCard>,
}

impl CompareSet {
    /// A set holding at most `capacity` cards; `None` is unbounded.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// A set sized for `category`: `phone_limit` for smartphones,
    /// `other_limit` for everything else.
    #[must_use]
    pub fn for_category(
        category: Category,
        phone_limit: usize,
        other_limit: Option<usize>,
    ) -> Self {
        match category {
            Category::Smartphone => Self::new(Some(phone_limit)),
            Category::Laptop | Category::HomeAppliance => Self::new(other_limit),
        }
    }

    /// Removes `card` when present, otherwise adds it unless the set is full.
    /// A full set never evicts an existing selection.
    pub fn toggle(&mut self, card: &VariantCard) -> ToggleOutcome {
        if self.remove_key(&card.compare_key) {
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            tracing::debug!(
                compare_key = %card.compare_key,
                capacity = ?self.capacity,
                "compare set full; ignoring add"
            );
            return ToggleOutcome::AtCapacity;
        }
        self.entries.push(card.clone());
        ToggleOutcome::Added
    }

    #[must_use]
    pub fn is_selected(&self, card: &VariantCard) -> bool {
        self.contains_key(&card.compare_key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|c| c.compare_key == key)
    }

    /// Selected cards in insertion order.
    #[must_use]
    pub fn list(&self) -> &[VariantCard] {
        &self.entries
    }

    /// Returns `true` when an entry was removed.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c.compare_key != key);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.entries.len() >= cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{card, ids};

    fn phone(id: &str) -> VariantCard {
        card(id, Category::Smartphone, Some(10_000))
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut set = CompareSet::new(Some(4));
        assert_eq!(set.toggle(&phone("a")), ToggleOutcome::Added);
        assert!(set.is_selected(&phone("a")));
        assert_eq!(set.toggle(&phone("a")), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn full_set_does_not_evict() {
        let mut set = CompareSet::for_category(Category::Smartphone, 2, None);
        set.toggle(&phone("a"));
        set.toggle(&phone("b"));
        assert!(set.is_full());
        assert_eq!(set.toggle(&phone("c")), ToggleOutcome::AtCapacity);
        assert_eq!(ids(set.list()), ["a", "b"]);
    }

    #[test]
    fn removal_works_when_full() {
        let mut set = CompareSet::new(Some(1));
        set.toggle(&phone("a"));
        assert_eq!(set.toggle(&phone("a")), ToggleOutcome::Removed);
    }

    #[test]
    fn identity_is_the_compare_key() {
        let mut set = CompareSet::new(None);
        let mut first = phone("a");
        first.name = "Renamed".to_string();
        set.toggle(&phone("a"));
        assert!(set.is_selected(&first));

        let mut other_variant = phone("a");
        other_variant.compare_key = "p:a:1".to_string();
        assert!(!set.is_selected(&other_variant));
        set.toggle(&other_variant);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn non_phone_categories_use_other_limit() {
        let set = CompareSet::for_category(Category::Laptop, 4, None);
        assert_eq!(set.capacity(), None);
        let set = CompareSet::for_category(Category::HomeAppliance, 4, Some(3));
        assert_eq!(set.capacity(), Some(3));
    }

    #[test]
    fn clear_and_remove_key() {
        let mut set = CompareSet::new(None);
        set.toggle(&phone("a"));
        set.toggle(&phone("b"));
        assert!(set.remove_key("p:a:0"));
        assert!(!set.remove_key("p:a:0"));
        set.clear();
        assert!(set.is_empty());
    }
}
