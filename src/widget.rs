use crate::app::App;
use crate::config::{Category, PlayConfig, PrintConfig};
use crate::error::Result;
use crate::help::render_overlay;
use crate::ids::{self, LeafId};
use crate::metrics;
use crate::render::{self, UiAreas, Viewport, ITEM_GLYPH};
use crate::sparks::Explanation;
use crate::terminal::{colors, Terminal};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use serde::Serialize;
use std::io::Write;

const HELP: &str = "\
CLASSMATE TREE
─────────────────────────
Mouse   Drag a phone onto a
        bottom-row classmate
←/→     Select classmate
↑/↓     Scroll tree
PgUp/Dn Scroll sideways
a / b   Give green / purple
+ / -   More / fewer classmates
n       Next spark
1-4     Explain a metric
Enter   Close explanation
?       Close help
q/Esc   Quit";

/// Poll interval; the screen only changes on input
const TICK_MS: u64 = 50;

/// What the event loop should do after handling an event
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Per-session UI state that is not part of the widget model
#[derive(Default)]
struct Shell {
    areas: UiAreas,
    show_help: bool,
    pointer: Option<(u16, u16)>,
}

/// Run the interactive widget until the user quits
pub fn run(config: PlayConfig) -> Result<()> {
    let mut app = App::new(config.tree, config.labels);
    let mut term = Terminal::new()?;
    let mut shell = Shell::default();
    tracing::info!(depth = app.depth(), "widget started");

    term.clear_screen()?;
    redraw(&mut term, &app, &mut shell)?;

    loop {
        let Some(event) = term.poll_event(TICK_MS)? else {
            continue;
        };

        let flow = match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                handle_key(&mut app, &mut shell, key)
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, &mut shell, mouse),
            Event::Resize(w, h) => {
                resize(&mut term, &mut app, &mut shell, w, h);
                term.clear_screen()?;
                Flow::Continue
            }
            _ => Flow::Continue,
        };

        if flow == Flow::Quit {
            break;
        }

        redraw(&mut term, &app, &mut shell)?;
    }

    tracing::info!(
        count_a = app.interaction().count_a(),
        count_b = app.interaction().count_b(),
        leaves = app.interaction().received_leaves(),
        "widget closed"
    );
    Ok(())
}

fn redraw(term: &mut Terminal, app: &App, shell: &mut Shell) -> Result<()> {
    term.clear();
    shell.areas = render::draw_play_screen(term, app);

    if let (Some(drag), Some((col, row))) = (app.drag(), shell.pointer) {
        term.set(col as i32, row as i32, ITEM_GLYPH, Some(colors::item(drag.category)), true);
    }

    if shell.show_help {
        render_overlay(term, HELP, 40, None);
    }

    term.render()?;
    Ok(())
}

/// Adopt the new terminal size and keep the scroll inside the resized tree viewport
fn resize(term: &mut Terminal, app: &mut App, shell: &mut Shell, width: u16, height: u16) {
    term.resize(width, height);
    shell.areas = render::draw_play_screen(term, app);
    let view = shell.areas.tree.area;
    app.clamp_scroll(view.width as i32, view.height as i32);
}

fn normalize_key(code: KeyCode, mods: KeyModifiers) -> KeyCode {
    if code == KeyCode::Char('/') && mods.contains(KeyModifiers::SHIFT) {
        KeyCode::Char('?')
    } else {
        code
    }
}

fn handle_key(app: &mut App, shell: &mut Shell, key: KeyEvent) -> Flow {
    let code = normalize_key(key.code, key.modifiers);

    if code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if shell.show_help {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('?') => shell.show_help = false,
            _ => {}
        }
        return Flow::Continue;
    }

    if app.explanation().is_some() {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => app.close_explanation(),
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        }
        return Flow::Continue;
    }

    let view = shell.areas.tree;
    let (view_w, view_h) = (view.area.width as i32, view.area.height as i32);

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('?') => shell.show_help = true,
        KeyCode::Char('+') | KeyCode::Char('=') => app.increase_depth(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.decrease_depth(),
        KeyCode::Left | KeyCode::Char('h') => {
            app.select_prev();
            follow_selection(app, view_w);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.select_next();
            follow_selection(app, view_w);
        }
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(0, -1, view_w, view_h),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(0, 1, view_w, view_h),
        KeyCode::PageUp => app.scroll_by(-view_w / 2, 0, view_w, view_h),
        KeyCode::PageDown => app.scroll_by(view_w / 2, 0, view_w, view_h),
        KeyCode::Home => {
            app.select(LeafId::new(1));
            follow_selection(app, view_w);
        }
        KeyCode::End => {
            app.select(LeafId::new(ids::leaf_count(app.depth())));
            follow_selection(app, view_w);
        }
        KeyCode::Char('n') => app.advance_hint(),
        KeyCode::Char(c @ ('a' | 'g' | 'b' | 'p')) => {
            let category = if matches!(c, 'a' | 'g') { Category::A } else { Category::B };
            app.drop_on_selected(category);
        }
        KeyCode::Char(c) => {
            if let Some(which) = Explanation::from_digit(c) {
                app.show_explanation(which);
            }
        }
        _ => {}
    }
    Flow::Continue
}

fn follow_selection(app: &mut App, view_w: i32) {
    if let Some(x) = app.selected().and_then(|id| app.layout().leaf_x(id)) {
        app.scroll_to_column(x, view_w);
    }
}

fn handle_mouse(app: &mut App, shell: &mut Shell, mouse: MouseEvent) -> Flow {
    let (col, row) = (mouse.column, mouse.row);
    shell.pointer = Some((col, row));
    let view = shell.areas.tree;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if shell.show_help {
                shell.show_help = false;
                return Flow::Continue;
            }
            if app.explanation().is_some() {
                if shell.areas.modal_close.is_some_and(|area| area.contains(col, row)) {
                    app.close_explanation();
                }
                return Flow::Continue;
            }
            click(app, shell, col, row);
            if let Some(leaf) = leaf_at(app, &view, col, row) {
                if app.drag().is_none() {
                    app.select(leaf);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let leaf = leaf_at(app, &view, col, row);
            app.hover(leaf);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let leaf = leaf_at(app, &view, col, row);
            app.hover(leaf);
            if let Some(leaf) = app.release() {
                tracing::info!(leaf = leaf.get(), "item handed out");
            }
        }
        MouseEventKind::ScrollUp => {
            app.scroll_by(0, -2, view.area.width as i32, view.area.height as i32)
        }
        MouseEventKind::ScrollDown => {
            app.scroll_by(0, 2, view.area.width as i32, view.area.height as i32)
        }
        MouseEventKind::ScrollLeft => {
            app.scroll_by(-4, 0, view.area.width as i32, view.area.height as i32)
        }
        MouseEventKind::ScrollRight => {
            app.scroll_by(4, 0, view.area.width as i32, view.area.height as i32)
        }
        _ => {}
    }
    Flow::Continue
}

fn leaf_at(app: &App, view: &Viewport, col: u16, row: u16) -> Option<LeafId> {
    view.to_canvas(col, row)
        .and_then(|(x, y)| app.layout().hit_test(x, y))
}

/// Press on a header/footer control
fn click(app: &mut App, shell: &Shell, col: u16, row: u16) {
    let areas = &shell.areas;
    if let Some(&(_, depth)) = areas.slider.iter().find(|(area, _)| area.contains(col, row)) {
        app.set_depth(depth);
    } else if let Some(&(_, category)) = areas.items.iter().find(|(area, _)| area.contains(col, row)) {
        app.pick_up(category);
    } else if let Some(&(_, which)) = areas.sparks.iter().find(|(area, _)| area.contains(col, row)) {
        app.show_explanation(which);
    } else if areas.next_spark.is_some_and(|area| area.contains(col, row)) {
        app.advance_hint();
    }
}

#[derive(Serialize)]
struct LeafReport {
    id: LeafId,
    category: Category,
    /// Branch taken at each level, root first, e.g. "ABA"
    path: String,
    received: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<Category>,
}

#[derive(Serialize)]
struct Report {
    depth: u32,
    total_arrangements: u64,
    count_a: u32,
    count_b: u32,
    probability: f64,
    probability_text: String,
    leaves: Vec<LeafReport>,
}

fn build_report(app: &App) -> Report {
    let depth = app.depth();
    let leaves = app
        .tree()
        .leaves()
        .into_iter()
        .filter_map(|node| node.leaf_id)
        .map(|id| LeafReport {
            id,
            category: id.category(),
            path: id.path(depth).iter().map(|c| c.letter()).collect(),
            received: app.interaction().has_received(id),
            item: app.interaction().received_category(id),
        })
        .collect();

    Report {
        depth,
        total_arrangements: app.total_arrangements(),
        count_a: app.interaction().count_a(),
        count_b: app.interaction().count_b(),
        probability: app.probability(),
        probability_text: metrics::format_percent(app.probability()),
        leaves,
    }
}

/// Replay `--drop` events on a fresh tree and write the result to `out`
pub fn run_print<W: Write>(config: &PrintConfig, out: &mut W) -> Result<()> {
    let mut app = App::new(config.tree, config.labels.clone());
    let depth = app.depth();

    for drop in &config.drops {
        let leaf = drop.target.resolve(depth)?;
        app.record_drop(leaf, drop.category);
        app.select(leaf);
    }
    tracing::info!(depth, drops = config.drops.len(), "print report");

    if config.json {
        serde_json::to_writer_pretty(&mut *out, &build_report(&app))?;
        writeln!(out)?;
    } else {
        render::draw_report(&app).write_to(out, config.color)?;
    }
    Ok(())
}
