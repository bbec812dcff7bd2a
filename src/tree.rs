use crate::config::Category;
use crate::ids::{self, LeafId};
use serde::Serialize;

/// One figure in the possibility tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Recursion level: `depth` on the root row, 1 on the leaf row
    pub level: u32,
    /// Row index from the top, `depth - level`
    pub row: u32,
    pub category: Category,
    /// Present only on the leaf row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_id: Option<LeafId>,
    /// The A/B pair hanging below this figure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below: Option<Box<Branch>>,
    /// First leaf index (0-based) covered by this figure's subtree
    #[serde(skip)]
    pub offset: u32,
}

impl Node {
    pub fn is_bottom_row(&self) -> bool {
        self.level == 1
    }

    /// Number of leaves under (or at) this figure
    pub fn span(&self) -> u32 {
        1 << (self.level - 1)
    }
}

/// The two alternatives at one branch point
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub level: u32,
    pub a: Node,
    pub b: Node,
}

impl Branch {
    pub fn child(&self, category: Category) -> &Node {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
        }
    }
}

/// Build the subtree for `level` rows of a tree `depth` rows deep, starting at leaf offset 0.
///
/// `level == 0` yields nothing. The result only depends on its inputs.
pub fn generate(level: u32, depth: u32) -> Option<Branch> {
    generate_at(level, depth, 0)
}

fn generate_at(level: u32, depth: u32, offset: u32) -> Option<Branch> {
    if level == 0 {
        return None;
    }

    let figure = |category: Category| {
        let child = ids::child_offset(offset, level, category);
        Node {
            level,
            row: depth.saturating_sub(level),
            category,
            leaf_id: (level == 1).then(|| ids::leaf_id(offset, category)),
            below: generate_at(level - 1, depth, child).map(Box::new),
            offset: child,
        }
    };

    Some(Branch {
        level,
        a: figure(Category::A),
        b: figure(Category::B),
    })
}

/// A fully generated tree for one depth setting
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PossibilityTree {
    depth: u32,
    root: Option<Branch>,
}

impl PossibilityTree {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            root: generate(depth, depth),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn root(&self) -> Option<&Branch> {
        self.root.as_ref()
    }

    pub fn leaf_count(&self) -> u32 {
        if self.depth == 0 {
            0
        } else {
            ids::leaf_count(self.depth)
        }
    }

    /// Every node, parents before children, A before B
    pub fn nodes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            collect_nodes(root, &mut out);
        }
        out
    }

    /// Bottom-row nodes in left-to-right order
    pub fn leaves(&self) -> Vec<&Node> {
        self.nodes()
            .into_iter()
            .filter(|node| node.is_bottom_row())
            .collect()
    }

    /// Look a leaf up by following its path from the root
    pub fn leaf(&self, id: LeafId) -> Option<&Node> {
        if !id.in_range(self.depth) {
            return None;
        }
        let mut branch = self.root.as_ref()?;
        let mut node = None;
        for category in id.path(self.depth) {
            let next = branch.child(category);
            node = Some(next);
            if let Some(below) = &next.below {
                branch = below;
            }
        }
        node
    }
}

fn collect_nodes<'a>(branch: &'a Branch, out: &mut Vec<&'a Node>) {
    for node in [&branch.a, &branch.b] {
        out.push(node);
        if let Some(below) = &node.below {
            collect_nodes(below, out);
        }
    }
}
