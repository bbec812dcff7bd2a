use crate::terminal::Terminal;
use crossterm::style::Color;

/// Screen rectangle, used for click targets
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Area {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Area {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }
}

/// Render a centered overlay box with the provided text.
///
/// Lines wider than `max_text_width` columns are word-wrapped; shorter ones keep their spacing. An optional
/// footer (e.g. a close button) is drawn on the last content row; its area is returned.
pub fn render_overlay(
    term: &mut Terminal,
    text: &str,
    max_text_width: usize,
    footer: Option<&str>,
) -> Option<Area> {
    if text.is_empty() {
        return None;
    }

    let (width, height) = term.size();
    let wrap_width = max_text_width.min((width as usize).saturating_sub(4)).max(1);
    let mut lines: Vec<String> = text
        .lines()
        .flat_map(|line| {
            if line.chars().count() <= wrap_width {
                vec![line.to_string()]
            } else {
                word_wrap(line, wrap_width)
            }
        })
        .collect();
    if let Some(footer) = footer {
        lines.push(String::new());
        lines.push(footer.to_string());
    }

    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    // Center the box
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border_color = Color::White;
    let text_color = Color::Grey;

    // Draw top border: ┌─────┐
    term.set(start_x as i32, start_y as i32, '┌', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, start_y as i32, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, start_y as i32, '┐', Some(border_color), false);

    // Draw content rows with side borders
    for (i, line) in lines.iter().enumerate() {
        let y = start_y + 1 + i;
        term.set(start_x as i32, y as i32, '│', Some(border_color), false);

        let padding = max_width.saturating_sub(line.chars().count());
        let padded = format!(" {}{} ", line, " ".repeat(padding));
        for (j, ch) in padded.chars().enumerate() {
            term.set((start_x + 1 + j) as i32, y as i32, ch, Some(text_color), false);
        }

        term.set((start_x + box_width - 1) as i32, y as i32, '│', Some(border_color), false);
    }

    // Draw bottom border: └─────┘
    let bottom_y = start_y + box_height - 1;
    term.set(start_x as i32, bottom_y as i32, '└', Some(border_color), false);
    for x in 1..box_width - 1 {
        term.set((start_x + x) as i32, bottom_y as i32, '─', Some(border_color), false);
    }
    term.set((start_x + box_width - 1) as i32, bottom_y as i32, '┘', Some(border_color), false);

    footer.map(|footer| {
        let footer_y = start_y + lines.len();
        let footer_x = start_x + 2;
        term.set_str(footer_x as i32, footer_y as i32, footer, Some(border_color), true);
        Area {
            x: footer_x as u16,
            y: footer_y as u16,
            width: footer.chars().count() as u16,
            height: 1,
        }
    })
}

/// Greedy word wrap on whitespace; words longer than `width` get a line of their own.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = word_wrap("each classmate can be either a boy or a girl", 12);
        assert!(lines.iter().all(|line| line.chars().count() <= 12));
        assert_eq!(lines.join(" "), "each classmate can be either a boy or a girl");
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(word_wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn overlay_is_centered_and_reports_footer() {
        let mut term = Terminal::offscreen(30, 9);
        let footer = render_overlay(&mut term, "hello", 20, Some("[ Close ]")).unwrap();

        // box is 13 wide, 5 tall
        assert_eq!(term.get(8, 2).map(|cell| cell.ch), Some('┌'));
        assert_eq!(footer.y, 5);
        assert!(footer.contains(footer.x, footer.y));
        assert!(!footer.contains(footer.x + footer.width, footer.y));
        assert!(term.to_plain_string().contains("[ Close ]"));
    }

    #[test]
    fn short_lines_keep_their_columns() {
        let mut term = Terminal::offscreen(60, 20);
        render_overlay(&mut term, "a / b   Give\n        indented", 40, None);
        let text = term.to_plain_string();
        assert!(text.contains("a / b   Give"), "{text}");
        assert!(text.contains("│         indented"), "{text}");
    }

    #[test]
    fn long_lines_still_wrap() {
        let mut term = Terminal::offscreen(30, 12);
        render_overlay(&mut term, "each classmate can be either a boy or a girl", 12, None);
        let text = term.to_plain_string();
        assert!(text.lines().any(|line| line.trim_start().starts_with("│ each ")), "{text}");
        assert!(!text.contains("each classmate"), "{text}");
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut term = Terminal::offscreen(10, 3);
        assert!(render_overlay(&mut term, "", 10, Some("x")).is_none());
        assert_eq!(term.to_plain_string(), "\n\n\n");
    }
}
