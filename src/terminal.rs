use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the real terminal: raw mode, alternate screen, mouse capture
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, EnableMouseCapture)?;

        Ok(Self {
            width,
            height,
            buffer: blank(width, height),
            alternate_screen: true,
        })
    }

    /// A buffer that is never shown on screen (print mode, tests)
    pub fn offscreen(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            buffer: blank(width, height),
            alternate_screen: false,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = blank(width, height);
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for cell in row {
                *cell = Cell::default();
            }
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.buffer.get(y as usize)?.get(x as usize)
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, MoveTo(0, 0))?;

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(stdout, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(stdout, SetAttribute(Attribute::Bold))?;
                }

                if let Some(color) = cell.fg {
                    queue!(stdout, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
                } else {
                    queue!(stdout, Print(cell.ch))?;
                }

                if cell.bold {
                    queue!(stdout, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        stdout.flush()?;
        Ok(())
    }

    /// Wait up to `timeout_ms` for a key, mouse or resize event
    pub fn poll_event(&self, timeout_ms: u64) -> io::Result<Option<Event>> {
        if poll(Duration::from_millis(timeout_ms))? {
            return Ok(Some(read()?));
        }
        Ok(None)
    }

    /// Write the buffer with ANSI colors (or without when `color` is false).
    /// Trailing blanks on each row are dropped.
    pub fn write_to<W: Write>(&self, out: &mut W, color: bool) -> io::Result<()> {
        for row in &self.buffer {
            let used = row.iter().rposition(|cell| cell.ch != ' ').map_or(0, |i| i + 1);
            for cell in &row[..used] {
                if !color || cell.ch == ' ' {
                    write!(out, "{}", cell.ch)?;
                    continue;
                }

                if cell.bold {
                    write!(out, "\x1b[1m")?;
                }

                if let Some(fg) = cell.fg {
                    write!(out, "{}", ansi_code(fg))?;
                }

                write!(out, "{}\x1b[0m", cell.ch)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Buffer contents without colors, one line per row
    #[cfg(test)]
    pub fn to_plain_string(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut out, false);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), DisableMouseCapture, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

fn blank(width: u16, height: u16) -> Vec<Vec<Cell>> {
    vec![vec![Cell::default(); width as usize]; height as usize]
}

fn ansi_code(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("\x1b[38;2;{};{};{}m", r, g, b),
        Color::AnsiValue(v) => format!("\x1b[38;5;{}m", v),
        // Standard colors (0-7)
        Color::Black => "\x1b[30m".to_string(),
        Color::DarkRed => "\x1b[31m".to_string(),
        Color::DarkGreen => "\x1b[32m".to_string(),
        Color::DarkYellow => "\x1b[33m".to_string(),
        Color::DarkBlue => "\x1b[34m".to_string(),
        Color::DarkMagenta => "\x1b[35m".to_string(),
        Color::DarkCyan => "\x1b[36m".to_string(),
        Color::Grey => "\x1b[37m".to_string(),
        // Bright colors (8-15)
        Color::DarkGrey => "\x1b[90m".to_string(),
        Color::Red => "\x1b[91m".to_string(),
        Color::Green => "\x1b[92m".to_string(),
        Color::Yellow => "\x1b[93m".to_string(),
        Color::Blue => "\x1b[94m".to_string(),
        Color::Magenta => "\x1b[95m".to_string(),
        Color::Cyan => "\x1b[96m".to_string(),
        Color::White => "\x1b[97m".to_string(),
        Color::Reset => String::new(),
    }
}

/// Helper to create RGB colors
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Widget palette
pub mod colors {
    use super::rgb;
    use crate::config::Category;
    use crossterm::style::Color;

    pub const TITLE: Color = Color::White;
    pub const TEXT: Color = Color::Grey;
    pub const MUTED: Color = Color::DarkGrey;
    pub const BRANCH: Color = Color::DarkGrey;
    pub const SPARK: Color = Color::Yellow;
    pub const HOVER: Color = Color::Yellow;

    /// Figure body color per category
    pub fn body(category: Category) -> Color {
        match category {
            Category::A => rgb(0x4C, 0xAF, 0x50),
            Category::B => rgb(0x9C, 0x27, 0xB0),
        }
    }

    /// Face color per category
    pub fn skin(category: Category) -> Color {
        match category {
            Category::A => rgb(0xA5, 0xD6, 0xA7),
            Category::B => rgb(0xE1, 0xBE, 0xE7),
        }
    }

    /// Color of the item handed to a category
    pub fn item(category: Category) -> Color {
        match category {
            Category::A => rgb(0x3E, 0x6C, 0x45),
            Category::B => rgb(0xC1, 0x99, 0xCC),
        }
    }
}
