//! The terminal I/O surface the line engine is written against

use crate::event::KeyPress;
use crate::style::Style;
use std::io;

/// A character terminal with a fixed-width grid and one column per char.
///
/// Positions are `(col, row)` pairs in absolute terminal coordinates.
pub trait Console {
    /// Current cursor position as `(col, row)`
    fn cursor(&mut self) -> io::Result<(u16, u16)>;

    /// Width of the terminal buffer in columns
    fn width(&mut self) -> io::Result<u16>;

    /// Write text at the cursor, optionally wrapped in a style's on/off pair
    fn print(&mut self, text: &str, style: Option<Style>) -> io::Result<()>;

    /// Move the cursor to an absolute position
    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()>;

    /// Show or hide the cursor
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Move to column 0 of the next row
    fn newline(&mut self) -> io::Result<()>;

    /// Block until the next key press
    fn read_key(&mut self) -> io::Result<KeyPress>;
}

impl<T: Console + ?Sized> Console for &mut T {
    fn cursor(&mut self) -> io::Result<(u16, u16)> {
        (**self).cursor()
    }

    fn width(&mut self) -> io::Result<u16> {
        (**self).width()
    }

    fn print(&mut self, text: &str, style: Option<Style>) -> io::Result<()> {
        (**self).print(text, style)
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        (**self).move_cursor(col, row)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        (**self).set_cursor_visible(visible)
    }

    fn newline(&mut self) -> io::Result<()> {
        (**self).newline()
    }

    fn read_key(&mut self) -> io::Result<KeyPress> {
        (**self).read_key()
    }
}
