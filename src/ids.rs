//! Leaf numbering for the possibility tree.
//!
//! A branch point at recursion level `L` covers a contiguous block of `2^L`
//! leaves that begins right after `offset`. The category-A half keeps the
//! offset, the category-B half is shifted by `2^(L-1)`. At the leaf row the
//! pair is therefore numbered `start` (A) and `start + 1` (B) with
//! `start = offset + 1`, and the root branch starts at `1 = 2^(depth - depth)`.
//! Applied at every level this partitions `[1, 2^depth]` exactly.

use crate::config::Category;
use serde::Serialize;
use std::fmt;

/// One of the `2^depth` leaves, numbered from 1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LeafId(u32);

impl LeafId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether the id lies in `[1, 2^depth]`
    pub fn in_range(self, depth: u32) -> bool {
        self.0 >= 1 && self.0 <= leaf_count(depth)
    }

    /// Branch taken at each level, root first. Inverse of [`LeafId::from_path`].
    pub fn path(self, depth: u32) -> Vec<Category> {
        let index = self.0.saturating_sub(1);
        (0..depth)
            .rev()
            .map(|bit| Category::from_index((index >> bit) & 1))
            .collect()
    }

    pub fn from_path(path: &[Category]) -> Self {
        let index = path
            .iter()
            .fold(0u32, |acc, category| (acc << 1) | category.index());
        Self(index + 1)
    }

    /// Category of the leaf itself, i.e. the last branch taken
    pub fn category(self) -> Category {
        Category::from_index(self.0.saturating_sub(1) & 1)
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of leaves (and arrangements) for a tree of this depth
pub fn leaf_count(depth: u32) -> u32 {
    1u32 << depth
}

/// Identifier of the category-A child at a leaf-row branch beginning after `offset`
pub fn branch_start(offset: u32) -> LeafId {
    LeafId(offset + 1)
}

/// Offset handed to the subtree below `category` at recursion level `level`
pub fn child_offset(offset: u32, level: u32, category: Category) -> u32 {
    offset + category.index() * (1 << (level - 1))
}

/// Identifier for the `category` child of a leaf-row branch beginning after `offset`
pub fn leaf_id(offset: u32, category: Category) -> LeafId {
    LeafId(branch_start(offset).0 + category.index())
}
