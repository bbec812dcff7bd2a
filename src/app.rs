use crate::config::{Category, Labels, TreeConfig};
use crate::ids::LeafId;
use crate::layout::TreeLayout;
use crate::metrics;
use crate::sparks::{Explanation, SparkStep};
use crate::state::InteractionState;
use crate::tree::PossibilityTree;

/// An item being dragged toward the tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drag {
    pub category: Category,
    pub hover: Option<LeafId>,
}

/// All widget state, owned by the shell's event loop.
///
/// Rendering only reads this; every change goes through one of the methods below.
#[derive(Debug)]
pub struct App {
    config: TreeConfig,
    labels: Labels,
    tree: PossibilityTree,
    layout: TreeLayout,
    interaction: InteractionState,
    spark: SparkStep,
    explanation: Option<String>,
    drag: Option<Drag>,
    selected: Option<LeafId>,
    /// Top-left canvas cell currently shown
    pub scroll: (i32, i32),
}

impl App {
    pub fn new(config: TreeConfig, labels: Labels) -> Self {
        let tree = PossibilityTree::new(config.depth());
        let layout = TreeLayout::new(&tree);
        Self {
            config,
            labels,
            tree,
            layout,
            interaction: InteractionState::new(),
            spark: SparkStep::default(),
            explanation: None,
            drag: None,
            selected: Some(LeafId::new(1)),
            scroll: (0, 0),
        }
    }

    pub fn depth(&self) -> u32 {
        self.config.depth()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn tree(&self) -> &PossibilityTree {
        &self.tree
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn spark(&self) -> SparkStep {
        self.spark
    }

    pub fn spark_text(&self) -> String {
        self.spark.text(self.depth(), &self.labels)
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn selected(&self) -> Option<LeafId> {
        self.selected
    }

    pub fn total_arrangements(&self) -> u64 {
        metrics::total_arrangements(self.depth())
    }

    pub fn probability(&self) -> f64 {
        metrics::illustrative_probability(
            self.interaction.count_a(),
            self.interaction.count_b(),
            self.depth(),
        )
    }

    /// Change the classmate count. Regenerates the tree and forgets every drop.
    pub fn set_depth(&mut self, depth: u32) {
        let config = TreeConfig::new(depth);
        if config == self.config {
            return;
        }
        tracing::info!(from = self.config.depth(), to = config.depth(), "depth changed");
        self.config = config;
        self.tree = PossibilityTree::new(config.depth());
        self.layout = TreeLayout::new(&self.tree);
        self.interaction.reset();
        self.drag = None;
        self.selected = Some(LeafId::new(1));
        self.scroll = (0, 0);
    }

    pub fn increase_depth(&mut self) {
        self.set_depth(self.depth() + 1);
    }

    pub fn decrease_depth(&mut self) {
        self.set_depth(self.depth().saturating_sub(1));
    }

    pub fn record_drop(&mut self, leaf: LeafId, category: Category) {
        self.interaction.record_drop(leaf, category);
    }

    /// Start dragging an item of `category`
    pub fn pick_up(&mut self, category: Category) {
        tracing::debug!(%category, "item picked up");
        self.drag = Some(Drag {
            category,
            hover: None,
        });
    }

    /// Update the leaf under the dragged item, if any
    pub fn hover(&mut self, leaf: Option<LeafId>) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover = leaf;
        }
    }

    /// Let go of the dragged item. Returns the leaf that received it.
    pub fn release(&mut self) -> Option<LeafId> {
        let drag = self.drag.take()?;
        let leaf = drag.hover?;
        self.record_drop(leaf, drag.category);
        self.selected = Some(leaf);
        Some(leaf)
    }

    pub fn drop_on_selected(&mut self, category: Category) -> Option<LeafId> {
        let leaf = self.selected?;
        self.record_drop(leaf, category);
        Some(leaf)
    }

    pub fn select(&mut self, leaf: LeafId) {
        if self.tree.leaf(leaf).is_some() {
            self.selected = Some(leaf);
        }
    }

    pub fn select_next(&mut self) {
        let max = self.tree.leaf_count();
        let next = self.selected.map_or(1, |id| (id.get() + 1).min(max));
        self.selected = Some(LeafId::new(next));
    }

    pub fn select_prev(&mut self) {
        let prev = self.selected.map_or(1, |id| id.get().saturating_sub(1).max(1));
        self.selected = Some(LeafId::new(prev));
    }

    pub fn advance_hint(&mut self) {
        self.spark = self.spark.advance();
        tracing::debug!(step = self.spark.index(), "spark advanced");
    }

    pub fn show_explanation(&mut self, which: Explanation) {
        tracing::debug!(?which, "explanation shown");
        self.explanation = Some(which.text(self.depth(), &self.labels));
    }

    pub fn close_explanation(&mut self) {
        if self.explanation.take().is_some() {
            tracing::debug!("explanation closed");
        }
    }

    /// Scroll so that `x` (a canvas column) is inside a viewport `width` wide
    pub fn scroll_to_column(&mut self, x: i32, width: i32) {
        let margin = 4;
        if x - margin < self.scroll.0 {
            self.scroll.0 = (x - margin).max(0);
        } else if x + margin >= self.scroll.0 + width {
            self.scroll.0 = x + margin - width + 1;
        }
        let max_x = (self.layout.width - width).max(0);
        self.scroll.0 = self.scroll.0.clamp(0, max_x);
    }

    pub fn scroll_by(&mut self, dx: i32, dy: i32, view_w: i32, view_h: i32) {
        self.scroll.0 += dx;
        self.scroll.1 += dy;
        self.clamp_scroll(view_w, view_h);
    }

    /// Pull the scroll back inside the canvas for a viewport of this size
    pub fn clamp_scroll(&mut self, view_w: i32, view_h: i32) {
        let max_x = (self.layout.width - view_w).max(0);
        let max_y = (self.layout.height - view_h).max(0);
        self.scroll.0 = self.scroll.0.clamp(0, max_x);
        self.scroll.1 = self.scroll.1.clamp(0, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(depth: u32) -> App {
        App::new(TreeConfig::new(depth), Labels::default())
    }

    #[test]
    fn two_drops_on_depth_two_give_fifty_percent() {
        let mut app = app(2);
        app.record_drop(LeafId::new(1), Category::A);
        app.record_drop(LeafId::new(2), Category::B);

        assert_eq!(app.total_arrangements(), 4);
        assert_eq!(app.interaction().count_a(), 1);
        assert_eq!(app.interaction().count_b(), 1);
        assert_eq!(metrics::format_percent(app.probability()), "50.00%");
    }

    #[test]
    fn depth_change_resets_interaction() {
        let mut app = app(2);
        app.record_drop(LeafId::new(3), Category::A);
        app.set_depth(3);

        assert_eq!(app.depth(), 3);
        assert_eq!(app.tree().leaf_count(), 8);
        assert!(!app.interaction().has_received(LeafId::new(3)));
        assert_eq!(app.interaction().count_a(), 0);
    }

    #[test]
    fn same_depth_keeps_interaction() {
        let mut app = app(2);
        app.record_drop(LeafId::new(3), Category::A);
        app.set_depth(2);
        assert!(app.interaction().has_received(LeafId::new(3)));
    }

    #[test]
    fn depth_is_clamped() {
        let mut app = app(1);
        app.decrease_depth();
        assert_eq!(app.depth(), 1);
        app.set_depth(99);
        assert_eq!(app.depth(), 10);
        app.increase_depth();
        assert_eq!(app.depth(), 10);
    }

    #[test]
    fn drag_and_release_over_leaf_records_drop() {
        let mut app = app(2);
        app.pick_up(Category::B);
        app.hover(Some(LeafId::new(4)));
        assert_eq!(app.release(), Some(LeafId::new(4)));

        assert!(app.drag().is_none());
        assert!(app.interaction().has_received(LeafId::new(4)));
        assert_eq!(app.interaction().count_b(), 1);
    }

    #[test]
    fn release_outside_tree_drops_nothing() {
        let mut app = app(2);
        app.pick_up(Category::A);
        app.hover(Some(LeafId::new(1)));
        app.hover(None);
        assert_eq!(app.release(), None);
        assert_eq!(app.interaction().count_a(), 0);
    }

    #[test]
    fn hover_without_drag_is_ignored() {
        let mut app = app(2);
        app.hover(Some(LeafId::new(1)));
        assert!(app.drag().is_none());
    }

    #[test]
    fn selection_stays_within_leaves() {
        let mut app = app(1);
        app.select_prev();
        assert_eq!(app.selected(), Some(LeafId::new(1)));
        app.select_next();
        app.select_next();
        assert_eq!(app.selected(), Some(LeafId::new(2)));
        app.select(LeafId::new(7));
        assert_eq!(app.selected(), Some(LeafId::new(2)));
    }

    #[test]
    fn keyboard_drop_uses_selected_leaf() {
        let mut app = app(2);
        app.select(LeafId::new(3));
        assert_eq!(app.drop_on_selected(Category::A), Some(LeafId::new(3)));
        assert!(app.interaction().has_received(LeafId::new(3)));
    }

    #[test]
    fn explanation_opens_and_closes() {
        let mut app = app(3);
        app.show_explanation(Explanation::Arrangements);
        assert!(app.explanation().is_some_and(|text| text.contains("2^3")));
        app.close_explanation();
        assert!(app.explanation().is_none());
    }

    #[test]
    fn hints_advance_and_clamp() {
        let mut app = app(2);
        for _ in 0..8 {
            app.advance_hint();
        }
        assert!(app.spark().is_last());
    }

    #[test]
    fn scroll_is_bounded_by_canvas() {
        let mut app = app(4);
        app.scroll_by(-10, -10, 20, 10);
        assert_eq!(app.scroll, (0, 0));
        app.scroll_by(1000, 1000, 20, 10);
        assert_eq!(app.scroll, (app.layout().width - 20, app.layout().height - 10));
    }

    #[test]
    fn following_a_column_keeps_vertical_scroll() {
        let mut app = app(5);
        app.scroll_by(0, 7, 40, 10);
        app.scroll_to_column(150, 40);
        assert_eq!(app.scroll.1, 7);
    }

    #[test]
    fn scrolling_follows_selected_column() {
        let mut app = app(5);
        app.scroll_to_column(150, 40);
        assert!(app.scroll.0 <= 150 && 150 < app.scroll.0 + 40);
        app.scroll_to_column(3, 40);
        assert_eq!(app.scroll.0, 0);
    }
}
