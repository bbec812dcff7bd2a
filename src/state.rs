use crate::config::Category;
use crate::ids::LeafId;
use std::collections::HashMap;

/// Which leaves have received an item, and how many items of each color went out.
///
/// Only the app controller mutates this; rendering reads it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    received: HashMap<LeafId, Category>,
    count_a: u32,
    count_b: u32,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `leaf` as received and count one more item of `category`.
    ///
    /// Dropping again on a leaf that already has an item counts again.
    pub fn record_drop(&mut self, leaf: LeafId, category: Category) {
        self.received.insert(leaf, category);
        match category {
            Category::A => self.count_a += 1,
            Category::B => self.count_b += 1,
        }
        tracing::debug!(
            leaf = leaf.get(),
            %category,
            count_a = self.count_a,
            count_b = self.count_b,
            "item dropped"
        );
    }

    pub fn has_received(&self, leaf: LeafId) -> bool {
        self.received.contains_key(&leaf)
    }

    /// Color of the most recent item dropped on `leaf`
    pub fn received_category(&self, leaf: LeafId) -> Option<Category> {
        self.received.get(&leaf).copied()
    }

    pub fn count(&self, category: Category) -> u32 {
        match category {
            Category::A => self.count_a,
            Category::B => self.count_b,
        }
    }

    pub fn count_a(&self) -> u32 {
        self.count_a
    }

    pub fn count_b(&self) -> u32 {
        self.count_b
    }

    /// Number of distinct leaves holding an item
    pub fn received_leaves(&self) -> usize {
        self.received.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
