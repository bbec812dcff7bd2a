use crate::error::Error;
use crate::ids::{leaf_count, LeafId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest depth the slider offers
pub const MIN_DEPTH: u32 = 1;
/// Largest depth the slider offers (1024 leaves)
pub const MAX_DEPTH: u32 = 10;
/// Depth shown on first launch
pub const DEFAULT_DEPTH: u32 = 2;

/// The two mutually exclusive classifications at every branch point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    A,
    B,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::A, Category::B];

    /// 0 for A, 1 for B. Used as the branch bit in leaf paths.
    pub fn index(self) -> u32 {
        match self {
            Category::A => 0,
            Category::B => 1,
        }
    }

    pub fn from_index(bit: u32) -> Self {
        if bit == 0 {
            Category::A
        } else {
            Category::B
        }
    }

    pub fn letter(self) -> char {
        match self {
            Category::A => 'A',
            Category::B => 'B',
        }
    }

    /// Name of the item color handed to this category
    pub fn item_color_name(self) -> &'static str {
        match self {
            Category::A => "green",
            Category::B => "purple",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "green" | "boy" => Ok(Category::A),
            "b" | "purple" | "girl" => Ok(Category::B),
            _ => Err(Error::InvalidDrop(s.to_string())),
        }
    }
}

/// Shape of one rendered tree. Changing it regenerates everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    depth: u32,
}

impl TreeConfig {
    /// Clamp into the slider range; this is the only validation applied.
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// Display names for the categories and the item being handed out
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub a: String,
    pub b: String,
    pub item: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            a: "Boy".to_string(),
            b: "Girl".to_string(),
            item: "iPhone".to_string(),
        }
    }
}

impl Labels {
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
        }
    }
}

/// Which leaf a `--drop` names: its number, or the branches taken from the root
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Id(u32),
    Path(Vec<Category>),
}

impl DropTarget {
    /// Resolve against a tree of `depth` levels
    pub fn resolve(&self, depth: u32) -> Result<LeafId, Error> {
        let leaf = match self {
            DropTarget::Id(id) => LeafId::new(*id),
            DropTarget::Path(path) => {
                if path.len() != depth as usize {
                    return Err(Error::PathLength {
                        len: path.len(),
                        depth,
                    });
                }
                LeafId::from_path(path)
            }
        };
        if !leaf.in_range(depth) {
            return Err(Error::LeafOutOfRange {
                leaf: leaf.get(),
                depth,
                max: leaf_count(depth),
            });
        }
        Ok(leaf)
    }
}

/// One `--drop <target>:<category>` argument, e.g. `3:a` or `BAB:b`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropSpec {
    pub target: DropTarget,
    pub category: Category,
}

impl FromStr for DropSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDrop(s.to_string());
        let (target, category) = s.split_once(':').ok_or_else(invalid)?;
        let target = target.trim();

        let target = if !target.is_empty() && target.chars().all(|c| c.is_ascii_digit()) {
            DropTarget::Id(target.parse().map_err(|_| invalid())?)
        } else if !target.is_empty() && target.chars().all(|c| matches!(c, 'A' | 'B')) {
            DropTarget::Path(
                target
                    .chars()
                    .map(|c| if c == 'A' { Category::A } else { Category::B })
                    .collect(),
            )
        } else {
            return Err(invalid());
        };

        let category = category.parse::<Category>().map_err(|_| invalid())?;
        Ok(Self { target, category })
    }
}

/// Configuration for the interactive widget
#[derive(Clone, Debug)]
pub struct PlayConfig {
    pub tree: TreeConfig,
    pub labels: Labels,
}

/// Configuration for one-shot print mode
#[derive(Clone, Debug)]
pub struct PrintConfig {
    pub tree: TreeConfig,
    pub labels: Labels,
    pub drops: Vec<DropSpec>,
    pub json: bool,
    pub color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_config_clamps_to_slider_range() {
        assert_eq!(TreeConfig::new(0).depth(), MIN_DEPTH);
        assert_eq!(TreeConfig::new(7).depth(), 7);
        assert_eq!(TreeConfig::new(42).depth(), MAX_DEPTH);
    }

    #[test]
    fn category_parses_letters_and_colors() {
        assert_eq!("a".parse::<Category>().unwrap(), Category::A);
        assert_eq!("Purple".parse::<Category>().unwrap(), Category::B);
        assert_eq!(" girl ".parse::<Category>().unwrap(), Category::B);
        assert!("c".parse::<Category>().is_err());
    }

    #[test]
    fn drop_spec_parses_id_and_category() {
        let spec: DropSpec = "3:b".parse().unwrap();
        assert_eq!(
            spec,
            DropSpec {
                target: DropTarget::Id(3),
                category: Category::B
            }
        );
    }

    #[test]
    fn drop_spec_parses_branch_path() {
        let spec: DropSpec = "BAB:green".parse().unwrap();
        assert_eq!(
            spec.target,
            DropTarget::Path(vec![Category::B, Category::A, Category::B])
        );
        assert_eq!(spec.category, Category::A);
        assert_eq!(spec.target.resolve(3).unwrap(), LeafId::new(6));
    }

    #[test]
    fn drop_target_checks_depth() {
        assert!(matches!(
            DropTarget::Path(vec![Category::A]).resolve(3),
            Err(Error::PathLength { len: 1, depth: 3 })
        ));
        assert!(matches!(
            DropTarget::Id(5).resolve(2),
            Err(Error::LeafOutOfRange { leaf: 5, depth: 2, max: 4 })
        ));
        assert!(DropTarget::Id(0).resolve(2).is_err());
        assert_eq!(DropTarget::Id(4).resolve(2).unwrap(), LeafId::new(4));
    }

    #[test]
    fn drop_spec_rejects_malformed_input() {
        for bad in ["3", "x:a", "3:z", ":a", "", "AC:a", "-1:a"] {
            assert!(matches!(bad.parse::<DropSpec>(), Err(Error::InvalidDrop(_))), "{bad}");
        }
    }

    #[test]
    fn category_index_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_index(category.index()), category);
        }
    }
}
