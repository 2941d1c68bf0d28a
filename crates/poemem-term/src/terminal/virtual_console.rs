//! In-memory console for tests and headless runs
//!
//! Keeps a growable grid of cells, a cursor, and a queue of scripted key
//! presses. Wrapping at the right edge can behave like a well-mannered
//! terminal or like one that leaves the cursor stuck in the last column.

use super::Console;
use crate::event::KeyPress;
use crate::style::Style;
use std::collections::VecDeque;
use std::io;

/// What the cursor does after a character lands in the last column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapBehavior {
    /// Cursor moves to column 0 of the next row
    #[default]
    Eager,
    /// Cursor stays in the last column
    Stuck,
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub style: Option<Style>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            style: None,
        }
    }
}

/// Console backed by an in-memory grid
#[derive(Debug, Clone)]
pub struct VirtualConsole {
    width: u16,
    wrap: WrapBehavior,
    rows: Vec<Vec<Cell>>,
    col: u16,
    row: u16,
    cursor_visible: bool,
    keys: VecDeque<KeyPress>,
    newlines: usize,
    cursor_moves: usize,
}

impl VirtualConsole {
    /// Create an empty console `width` columns wide
    pub fn new(width: u16) -> Self {
        Self {
            width: width.max(1),
            wrap: WrapBehavior::Eager,
            rows: Vec::new(),
            col: 0,
            row: 0,
            cursor_visible: true,
            keys: VecDeque::new(),
            newlines: 0,
            cursor_moves: 0,
        }
    }

    /// Set the wrap behavior
    pub fn with_wrap(mut self, wrap: WrapBehavior) -> Self {
        self.wrap = wrap;
        self
    }

    /// Queue key presses to be returned by `read_key`
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyPress>) -> Self {
        self.push_keys(keys);
        self
    }

    /// Queue more key presses
    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyPress>) {
        self.keys.extend(keys);
    }

    /// Number of scripted key presses not yet consumed
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// Cursor position as `(col, row)`
    pub fn position(&self) -> (u16, u16) {
        (self.col, self.row)
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// How many times `newline` was called
    pub fn newline_count(&self) -> usize {
        self.newlines
    }

    /// How many times the cursor was explicitly repositioned
    pub fn cursor_moves(&self) -> usize {
        self.cursor_moves
    }

    /// Text of a row with trailing blanks removed
    pub fn row_text(&self, row: u16) -> String {
        self.rows
            .get(row as usize)
            .map(|cells| cells.iter().map(|c| c.symbol).collect::<String>())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    }

    /// All rows joined with `\n`
    pub fn text(&self) -> String {
        (0..self.rows.len() as u16)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The cell at a position, if anything was ever written there
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        self.rows.get(row as usize)?.get(col as usize)
    }

    fn put(&mut self, symbol: char, style: Option<Style>) {
        let row = self.row as usize;
        let col = self.col as usize;
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::default());
        }
        cells[col] = Cell { symbol, style };

        if self.col + 1 < self.width {
            self.col += 1;
        } else {
            match self.wrap {
                WrapBehavior::Eager => {
                    self.col = 0;
                    self.row += 1;
                }
                WrapBehavior::Stuck => {}
            }
        }
    }
}

impl Console for VirtualConsole {
    fn cursor(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.position())
    }

    fn width(&mut self) -> io::Result<u16> {
        Ok(self.width)
    }

    fn print(&mut self, text: &str, style: Option<Style>) -> io::Result<()> {
        for symbol in text.chars() {
            self.put(symbol, style);
        }
        Ok(())
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.col = col.min(self.width - 1);
        self.row = row;
        self.cursor_moves += 1;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.col = 0;
        self.row += 1;
        self.newlines += 1;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<KeyPress> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted key presses left")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;
    use crate::style::Color;

    #[test]
    fn test_print_advances_cursor() {
        let mut console = VirtualConsole::new(20);
        console.print("hello", None).unwrap();
        assert_eq!(console.position(), (5, 0));
        assert_eq!(console.row_text(0), "hello");
    }

    #[test]
    fn test_eager_wrap() {
        let mut console = VirtualConsole::new(4);
        console.print("abcdef", None).unwrap();
        assert_eq!(console.text(), "abcd\nef");
        assert_eq!(console.position(), (2, 1));
    }

    #[test]
    fn test_stuck_wrap_overwrites_last_column() {
        let mut console = VirtualConsole::new(4).with_wrap(WrapBehavior::Stuck);
        console.print("abcdef", None).unwrap();
        assert_eq!(console.text(), "abcf");
        assert_eq!(console.position(), (3, 0));
    }

    #[test]
    fn test_styled_cells() {
        let mut console = VirtualConsole::new(10);
        let green = Style::new().fg(Color::Green);
        console.print("a", None).unwrap();
        console.print("b", Some(green)).unwrap();
        assert_eq!(console.cell(0, 0).unwrap().style, None);
        assert_eq!(console.cell(1, 0).unwrap().style, Some(green));
    }

    #[test]
    fn test_scripted_keys() {
        let mut console = VirtualConsole::new(10).with_keys([KeyPress::new(Key::Enter)]);
        assert_eq!(console.read_key().unwrap(), KeyPress::new(Key::Enter));
        let err = console.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_newline_and_moves_are_counted() {
        let mut console = VirtualConsole::new(10);
        console.print("abc", None).unwrap();
        console.newline().unwrap();
        console.move_cursor(2, 0).unwrap();
        assert_eq!(console.newline_count(), 1);
        assert_eq!(console.cursor_moves(), 1);
        assert_eq!(console.position(), (2, 0));
    }
}
