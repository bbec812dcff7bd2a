use crate::config::Category;
use crate::ids::LeafId;
use crate::tree::{Branch, PossibilityTree};

/// Columns reserved for each leaf
pub const SLOT_WIDTH: i32 = 6;
/// Rows per tree level: 3 figure rows, a label row and a connector row
pub const ROW_HEIGHT: i32 = 5;
/// Stick figures are 3 cells wide and 3 tall
pub const FIGURE_HALF_WIDTH: i32 = 1;
pub const FIGURE_HEIGHT: i32 = 3;

/// Where one figure sits on the tree canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Center column of the figure
    pub x: i32,
    /// Top row of the figure
    pub y: i32,
    pub category: Category,
    pub leaf_id: Option<LeafId>,
}

/// Horizontal bar joining a figure to the pair below it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connector {
    pub y: i32,
    pub left: i32,
    pub mid: i32,
    pub right: i32,
}

/// Tree geometry in canvas coordinates (origin top-left of the tree)
#[derive(Clone, Debug, Default)]
pub struct TreeLayout {
    pub width: i32,
    pub height: i32,
    pub figures: Vec<Placement>,
    pub connectors: Vec<Connector>,
    /// Positions of the "or" marks between each A/B pair
    pub or_marks: Vec<(i32, i32)>,
}

fn center_x(offset: u32, span: u32) -> i32 {
    (2 * offset as i32 + span as i32) * SLOT_WIDTH / 2
}

impl TreeLayout {
    pub fn new(tree: &PossibilityTree) -> Self {
        let mut layout = Self {
            width: tree.leaf_count() as i32 * SLOT_WIDTH,
            height: tree.depth() as i32 * ROW_HEIGHT,
            ..Self::default()
        };
        if let Some(root) = tree.root() {
            layout.place_branch(root);
        }
        layout
    }

    fn place_branch(&mut self, branch: &Branch) {
        let mut centers = [0; 2];
        let mut top = 0;
        for (slot, node) in [&branch.a, &branch.b].into_iter().enumerate() {
            let x = center_x(node.offset, node.span());
            let y = node.row as i32 * ROW_HEIGHT;
            centers[slot] = x;
            top = y;

            self.figures.push(Placement {
                x,
                y,
                category: node.category,
                leaf_id: node.leaf_id,
            });

            if let Some(below) = &node.below {
                let left = center_x(below.a.offset, below.a.span());
                let right = center_x(below.b.offset, below.b.span());
                self.connectors.push(Connector {
                    y: y + ROW_HEIGHT - 1,
                    left,
                    mid: x,
                    right,
                });
                self.place_branch(below);
            }
        }
        self.or_marks.push(((centers[0] + centers[1]) / 2, top + 1));
    }

    /// Leaf whose figure or label covers the canvas cell
    pub fn hit_test(&self, x: i32, y: i32) -> Option<LeafId> {
        self.figures.iter().find_map(|figure| {
            let id = figure.leaf_id?;
            let inside_x = (x - figure.x).abs() <= FIGURE_HALF_WIDTH + 1;
            let inside_y = y >= figure.y && y <= figure.y + FIGURE_HEIGHT;
            (inside_x && inside_y).then_some(id)
        })
    }

    /// Center column of a leaf figure
    pub fn leaf_x(&self, id: LeafId) -> Option<i32> {
        self.figures
            .iter()
            .find(|figure| figure.leaf_id == Some(id))
            .map(|figure| figure.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_no_geometry() {
        let layout = TreeLayout::new(&PossibilityTree::new(0));
        assert_eq!((layout.width, layout.height), (0, 0));
        assert!(layout.figures.is_empty());
    }

    #[test]
    fn depth_two_places_six_figures() {
        let layout = TreeLayout::new(&PossibilityTree::new(2));
        assert_eq!(layout.width, 4 * SLOT_WIDTH);
        assert_eq!(layout.height, 2 * ROW_HEIGHT);
        assert_eq!(layout.figures.len(), 6);
        assert_eq!(layout.connectors.len(), 2);
        assert_eq!(layout.or_marks.len(), 3);

        let leaves: Vec<i32> = (1..=4)
            .filter_map(|id| layout.leaf_x(LeafId::new(id)))
            .collect();
        assert_eq!(leaves, vec![3, 9, 15, 21]);
    }

    #[test]
    fn parents_sit_over_their_pair() {
        let layout = TreeLayout::new(&PossibilityTree::new(2));
        for connector in &layout.connectors {
            assert_eq!(connector.mid, (connector.left + connector.right) / 2);
            assert_eq!(connector.y, ROW_HEIGHT - 1);
        }
    }

    #[test]
    fn hit_test_finds_leaves_only() {
        let layout = TreeLayout::new(&PossibilityTree::new(2));
        let leaf_row = ROW_HEIGHT;
        assert_eq!(layout.hit_test(3, leaf_row + 1), Some(LeafId::new(1)));
        assert_eq!(layout.hit_test(21, leaf_row + 3), Some(LeafId::new(4)));
        // root row figures are not drop targets
        assert_eq!(layout.hit_test(6, 1), None);
        assert_eq!(layout.hit_test(3, leaf_row + 4), None);
    }
}
