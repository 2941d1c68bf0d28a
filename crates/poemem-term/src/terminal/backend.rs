//! Console backend wrapping crossterm operations

use super::Console;
use crate::event::KeyPress;
use crate::style::Style;
use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal,
};
use std::io::{self, Stdout, Write};

/// Console writing inline to stdout, without an alternate screen
pub struct CrosstermConsole {
    stdout: Stdout,
}

impl CrosstermConsole {
    /// Create a console over the process's stdout
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for CrosstermConsole {
    fn cursor(&mut self) -> io::Result<(u16, u16)> {
        // The position report must reflect everything written so far
        self.stdout.flush()?;
        cursor::position()
    }

    fn width(&mut self) -> io::Result<u16> {
        let (width, _) = terminal::size()?;
        Ok(width.max(1))
    }

    fn print(&mut self, text: &str, style: Option<Style>) -> io::Result<()> {
        match style {
            Some(style) => style.queue_styled(&mut self.stdout, text)?,
            None => queue!(self.stdout, Print(text))?,
        }
        self.stdout.flush()
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        execute!(self.stdout, MoveTo(col, row))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.stdout, Show)
        } else {
            execute!(self.stdout, Hide)
        }
    }

    fn newline(&mut self) -> io::Result<()> {
        // Raw mode disables the implicit carriage return
        execute!(self.stdout, Print("\r\n"))
    }

    fn read_key(&mut self) -> io::Result<KeyPress> {
        loop {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(press) = KeyPress::from_event(key) {
                        return Ok(press);
                    }
                }
                other => tracing::trace!(?other, "ignoring non-key event"),
            }
        }
    }
}
