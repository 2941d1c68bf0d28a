//! Scoped raw mode for reading single key presses

use crossterm::{cursor::Show, execute, terminal};
use std::io;

/// Keeps the terminal in raw mode while alive.
///
/// Only the input side changes: no alternate screen is entered, so quiz
/// output stays in the shell's scrollback. Nested guards are harmless; only
/// the guard that actually switched raw mode on switches it back off. The
/// cursor is always made visible again on drop, since a quiz hides it while
/// redrawing placeholders.
pub struct RawModeGuard {
    restore: bool,
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        let already_raw = terminal::is_raw_mode_enabled()?;
        if !already_raw {
            terminal::enable_raw_mode()?;
        }
        Ok(Self {
            restore: !already_raw,
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.restore {
            let _ = terminal::disable_raw_mode();
        }
        let _ = execute!(io::stdout(), Show);
    }
}
