use crate::app::App;
use crate::config::{Category, MAX_DEPTH, MIN_DEPTH};
use crate::help::{render_overlay, word_wrap, Area};
use crate::ids::LeafId;
use crate::layout::{Placement, FIGURE_HEIGHT};
use crate::metrics;
use crate::sparks::Explanation;
use crate::terminal::{colors, Terminal};
use crossterm::style::Color;

pub const ITEM_GLYPH: char = '▯';
pub const SPARK_GLYPH: char = '⚡';
const HAPPY: char = '☺';
const NEUTRAL: char = '☹';

/// Click targets produced by one frame
#[derive(Clone, Debug, Default)]
pub struct UiAreas {
    pub slider: Vec<(Area, u32)>,
    pub items: Vec<(Area, Category)>,
    pub sparks: Vec<(Area, Explanation)>,
    pub next_spark: Option<Area>,
    pub tree: Viewport,
    pub modal_close: Option<Area>,
}

/// Window onto the tree canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub area: Area,
    /// Left padding used to center narrow trees
    pub inset_x: i32,
    pub scroll: (i32, i32),
}

impl Viewport {
    pub fn new(area: Area, canvas_width: i32, scroll: (i32, i32)) -> Self {
        let inset_x = ((area.width as i32 - canvas_width) / 2).max(0);
        Self {
            area,
            inset_x,
            scroll,
        }
    }

    /// Canvas cell → screen cell, if visible
    pub fn to_screen(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        let sx = self.area.x as i32 + self.inset_x + x - self.scroll.0;
        let sy = self.area.y as i32 + y - self.scroll.1;
        let visible = sx >= self.area.x as i32
            && sx < (self.area.x + self.area.width) as i32
            && sy >= self.area.y as i32
            && sy < (self.area.y + self.area.height) as i32;
        visible.then_some((sx, sy))
    }

    /// Screen cell → canvas cell, if the cell is inside the viewport
    pub fn to_canvas(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        if !self.area.contains(col, row) {
            return None;
        }
        let x = col as i32 - self.area.x as i32 - self.inset_x + self.scroll.0;
        let y = row as i32 - self.area.y as i32 + self.scroll.1;
        Some((x, y))
    }

    fn put(&self, term: &mut Terminal, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if let Some((sx, sy)) = self.to_screen(x, y) {
            term.set(sx, sy, ch, fg, bold);
        }
    }

    fn put_str(&self, term: &mut Terminal, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.put(term, x + i as i32, y, ch, fg, bold);
        }
    }
}

/// 3x3 stick figure. A received item replaces the right hand.
pub fn figure_glyphs(category: Category, received: bool) -> [[char; 3]; FIGURE_HEIGHT as usize] {
    let head = if received { HAPPY } else { NEUTRAL };
    let hand = if received { ITEM_GLYPH } else { '\\' };
    let legs = match category {
        Category::A => ['/', ' ', '\\'],
        Category::B => ['/', '▲', '\\'],
    };
    [[' ', head, ' '], ['/', '|', hand], legs]
}

fn draw_figure(
    term: &mut Terminal,
    view: &Viewport,
    figure: &Placement,
    app: &App,
    hover: Option<LeafId>,
) {
    let received = figure
        .leaf_id
        .and_then(|id| app.interaction().received_category(id));
    let hovered = figure.leaf_id.is_some() && figure.leaf_id == hover;
    let glyphs = figure_glyphs(figure.category, received.is_some());
    let body = colors::body(figure.category);

    for (dy, row) in glyphs.iter().enumerate() {
        for (dx, &ch) in row.iter().enumerate() {
            if ch == ' ' {
                continue;
            }
            let (color, bold) = match (dy, dx) {
                (0, 1) if hovered => (colors::HOVER, true),
                (0, 1) => (colors::skin(figure.category), false),
                (1, 2) => match received {
                    Some(item) => (colors::item(item), true),
                    None => (body, false),
                },
                _ => (body, false),
            };
            view.put(term, figure.x - 1 + dx as i32, figure.y + dy as i32, ch, Some(color), bold);
        }
    }

    let label_y = figure.y + FIGURE_HEIGHT;
    match figure.leaf_id {
        Some(id) => {
            let selected = app.selected() == Some(id);
            let text = if selected { format!("[{}]", id) } else { id.to_string() };
            let x = figure.x - text.chars().count() as i32 / 2;
            let color = if selected { colors::TITLE } else { body };
            view.put_str(term, x, label_y, &text, Some(color), true);
        }
        None => {
            let label: String = app.labels().category(figure.category).chars().take(5).collect();
            let x = figure.x - label.chars().count() as i32 / 2;
            view.put_str(term, x, label_y, &label, Some(body), true);
        }
    }
}

/// Draw the possibility tree through `view`
pub fn draw_tree(term: &mut Terminal, app: &App, view: &Viewport) {
    let layout = app.layout();
    let hover = app.drag().and_then(|drag| drag.hover);

    for connector in &layout.connectors {
        for x in connector.left..=connector.right {
            let ch = if x == connector.left {
                '┌'
            } else if x == connector.right {
                '┐'
            } else if x == connector.mid {
                '┴'
            } else {
                '─'
            };
            view.put(term, x, connector.y, ch, Some(colors::BRANCH), false);
        }
    }

    for &(x, y) in &layout.or_marks {
        view.put_str(term, x - 1, y, "or", Some(colors::MUTED), false);
    }

    for figure in &layout.figures {
        draw_figure(term, view, figure, app, hover);
    }
}

/// Metric lines shown under "Analysis Mode", each with the explanation it opens
pub fn metric_lines(app: &App) -> Vec<(String, Explanation)> {
    let item = &app.labels().item;
    vec![
        (
            format!("Total Possible Arrangements: {}", app.total_arrangements()),
            Explanation::Arrangements,
        ),
        (
            format!("Green {}s: {}", item, app.interaction().count(Category::A)),
            Explanation::Count(Category::A),
        ),
        (
            format!("Purple {}s: {}", item, app.interaction().count(Category::B)),
            Explanation::Count(Category::B),
        ),
        (
            format!(
                "Probability of having enough {}s: {}",
                item,
                metrics::format_percent(app.probability())
            ),
            Explanation::Probability,
        ),
    ]
}

pub fn story(app: &App) -> String {
    let labels = app.labels();
    format!(
        "Billy is about to start up the school year as the new kid, and he knows nothing about \
         his soon-to-be classmates. To make a good first impression, Billy plans to buy green and \
         purple {item}s to give to the {a}s and {b}s, respectively. Help Billy figure out his odds \
         of successfully buying friends by dragging {item}s to his classmates and observing the \
         result.",
        item = labels.item,
        a = labels.a.to_lowercase(),
        b = labels.b.to_lowercase(),
    )
}

pub fn title(app: &App) -> String {
    format!("{} Probability Problem", app.labels().item)
}

const KEYS: &str = "drag items with the mouse · ←/→ select · a/b give · +/- classmates · n spark · 1-4 explain · ? help · q quit";

fn centered(term: &mut Terminal, y: i32, text: &str, color: Color, bold: bool) {
    let (width, _) = term.size();
    let x = (width as i32 - text.chars().count() as i32).max(0) / 2;
    term.set_str(x, y, text, Some(color), bold);
}

/// Draw the full interactive screen and return its click targets
pub fn draw_play_screen(term: &mut Terminal, app: &App) -> UiAreas {
    let (width, height) = term.size();
    let text_width = (width as usize).saturating_sub(4).clamp(10, 100);
    let mut areas = UiAreas::default();
    let mut y = 0i32;

    centered(term, y, &title(app), colors::TITLE, true);
    y += 1;
    for line in word_wrap(&story(app), text_width) {
        term.set_str(2, y, &line, Some(colors::TEXT), false);
        y += 1;
    }
    y += 1;

    // Depth slider
    let label = format!("Hypothetical Number of Classmates: {}  ", app.depth());
    term.set_str(2, y, &label, Some(colors::TITLE), true);
    let mut x = 2 + label.chars().count() as i32;
    term.set(x, y, '[', Some(colors::MUTED), false);
    x += 1;
    for depth in MIN_DEPTH..=MAX_DEPTH {
        let filled = depth <= app.depth();
        let ch = if filled { '■' } else { '□' };
        let color = if filled { colors::SPARK } else { colors::MUTED };
        term.set(x, y, ch, Some(color), false);
        areas.slider.push((area(x, y, 1), depth));
        x += 1;
    }
    term.set(x, y, ']', Some(colors::MUTED), false);
    y += 2;

    // Draggable items
    term.set_str(2, y, "Drag an item:", Some(colors::TEXT), false);
    let mut x = 17;
    for category in Category::ALL {
        let text = format!("[{} {}]", ITEM_GLYPH, category.item_color_name());
        term.set_str(x, y, &text, Some(colors::item(category)), true);
        areas.items.push((area(x, y, text.chars().count()), category));
        x += text.chars().count() as i32 + 2;
    }
    if let Some(drag) = app.drag() {
        let holding = format!("holding {}", drag.category.item_color_name());
        term.set_str(x, y, &holding, Some(colors::HOVER), false);
    }
    y += 2;

    centered(term, y, "Possible Classmate Types", colors::TITLE, true);
    y += 1;

    // Footer is laid out bottom-up so the tree gets whatever is left
    let spark_lines = word_wrap(&app.spark_text(), text_width);
    let metrics = metric_lines(app);
    let footer_height = 1 + metrics.len() + 1 + spark_lines.len() + 1 + 1;
    let footer_top = (height as i32 - footer_height as i32).max(y);

    let tree_area = Area {
        x: 0,
        y: y as u16,
        width,
        height: (footer_top - y).max(0) as u16,
    };
    areas.tree = Viewport::new(tree_area, app.layout().width, app.scroll);
    draw_tree(term, app, &areas.tree);

    let mut y = footer_top;
    term.set_str(2, y, "Analysis Mode:", Some(colors::TITLE), true);
    y += 1;
    for (text, explanation) in metrics {
        term.set_str(4, y, &text, Some(colors::TEXT), false);
        let spark_x = 5 + text.chars().count() as i32;
        term.set(spark_x, y, SPARK_GLYPH, Some(colors::SPARK), true);
        areas.sparks.push((area(spark_x, y, 2), explanation));
        y += 1;
    }

    term.set_str(2, y, "Mind Sparks", Some(colors::TITLE), true);
    y += 1;
    for line in &spark_lines {
        term.set_str(4, y, line, Some(colors::TEXT), false);
        y += 1;
    }
    let button = "[ Next Spark ]";
    let button_color = if app.spark().is_last() { colors::MUTED } else { colors::SPARK };
    term.set_str(4, y, button, Some(button_color), true);
    areas.next_spark = Some(area(4, y, button.chars().count()));
    y += 1;

    term.set_str(2, y, KEYS, Some(colors::MUTED), false);

    if let Some(text) = app.explanation() {
        areas.modal_close = render_overlay(term, text, 60, Some("[ Close ]"));
    }

    areas
}

fn area(x: i32, y: i32, width: usize) -> Area {
    Area {
        x: x.max(0) as u16,
        y: y.max(0) as u16,
        width: width as u16,
        height: 1,
    }
}

/// Render the tree and metrics into an offscreen buffer sized to fit everything
pub fn draw_report(app: &App) -> Terminal {
    let layout = app.layout();
    let metrics = metric_lines(app);
    let title = title(app);
    let text_width = metrics
        .iter()
        .map(|(line, _)| line.chars().count())
        .chain([title.chars().count()])
        .max()
        .unwrap_or(0) as i32;

    let width = layout.width.max(text_width + 4);
    let height = 2 + layout.height + 1 + metrics.len() as i32;
    let mut term = Terminal::offscreen(width as u16, height as u16);

    centered(&mut term, 0, &title, colors::TITLE, true);
    let view = Viewport::new(
        Area {
            x: 0,
            y: 2,
            width: width as u16,
            height: layout.height as u16,
        },
        layout.width,
        (0, 0),
    );
    draw_tree(&mut term, app, &view);

    let mut y = 2 + layout.height + 1;
    for (line, _) in metrics {
        term.set_str(0, y, &line, Some(colors::TEXT), false);
        y += 1;
    }
    term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Labels, TreeConfig};

    fn app(depth: u32) -> App {
        App::new(TreeConfig::new(depth), Labels::default())
    }

    #[test]
    fn happy_figure_holds_item() {
        let neutral = figure_glyphs(Category::A, false);
        let happy = figure_glyphs(Category::A, true);
        assert_eq!(neutral[0][1], NEUTRAL);
        assert_eq!(happy[0][1], HAPPY);
        assert_eq!(happy[1][2], ITEM_GLYPH);
        assert_ne!(figure_glyphs(Category::B, false)[2], neutral[2]);
    }

    #[test]
    fn viewport_round_trips_visible_cells() {
        let view = Viewport::new(
            Area { x: 0, y: 5, width: 10, height: 4 },
            40,
            (12, 1),
        );
        assert_eq!(view.inset_x, 0);
        assert_eq!(view.to_screen(12, 1), Some((0, 5)));
        assert_eq!(view.to_canvas(0, 5), Some((12, 1)));
        assert_eq!(view.to_screen(11, 1), None);
        assert_eq!(view.to_canvas(0, 4), None);
    }

    #[test]
    fn narrow_tree_is_centered() {
        let view = Viewport::new(Area { x: 0, y: 0, width: 30, height: 10 }, 12, (0, 0));
        assert_eq!(view.inset_x, 9);
        assert_eq!(view.to_canvas(9, 0), Some((0, 0)));
    }

    #[test]
    fn report_shows_ids_and_metrics() {
        let mut app = app(2);
        app.record_drop(LeafId::new(1), Category::A);
        app.record_drop(LeafId::new(2), Category::B);
        let text = draw_report(&app).to_plain_string();

        assert!(text.contains("iPhone Probability Problem"));
        assert!(text.contains("Total Possible Arrangements: 4"));
        assert!(text.contains("Green iPhones: 1"));
        assert!(text.contains("Purple iPhones: 1"));
        assert!(text.contains("Probability of having enough iPhones: 50.00%"));
        assert_eq!(text.matches(HAPPY).count(), 2);
        assert_eq!(text.matches(NEUTRAL).count(), 4);
        for id in ["2", "3", "4"] {
            assert!(text.contains(id));
        }
        assert!(text.contains("[1]"));
    }

    #[test]
    fn play_screen_exposes_click_targets() {
        let mut app = app(2);
        app.show_explanation(Explanation::Probability);
        let mut term = Terminal::offscreen(120, 50);
        let areas = draw_play_screen(&mut term, &app);

        assert_eq!(areas.slider.len(), (MAX_DEPTH - MIN_DEPTH + 1) as usize);
        assert_eq!(areas.items.len(), 2);
        assert_eq!(areas.sparks.len(), 4);
        assert!(areas.next_spark.is_some());
        assert!(areas.modal_close.is_some());
        assert!(areas.tree.area.height > 0);
    }

    #[test]
    fn tree_viewport_maps_back_to_leaves() {
        let app = app(2);
        let mut term = Terminal::offscreen(120, 50);
        let areas = draw_play_screen(&mut term, &app);
        let view = areas.tree;

        let x = app.layout().leaf_x(LeafId::new(3)).unwrap();
        let leaf_row_top = crate::layout::ROW_HEIGHT;
        let (sx, sy) = view.to_screen(x, leaf_row_top + 1).unwrap();
        let (cx, cy) = view.to_canvas(sx as u16, sy as u16).unwrap();
        assert_eq!(app.layout().hit_test(cx, cy), Some(LeafId::new(3)));
    }
}
