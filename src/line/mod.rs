//! The active terminal line
//!
//! A [`Line`] is the logical row of output the program is currently working
//! on. It keeps a model of the cursor `offset` and of the written `length`
//! (the frontier) and is the only thing allowed to move the terminal cursor
//! while it is alive. Advancing to the next line consumes the handle, so a
//! retired line cannot be named again; [`Span`]s carved from it carry its
//! identity and are rejected once it is gone.
//!
//! The model assumes one character per column.

mod error;
mod read;
mod span;

pub use error::{LineError, Result};
pub use read::ReadOptions;
pub use span::Span;

use poemem_term::{Console, Style};
use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_LINE_ID: AtomicU64 = AtomicU64::new(1);

/// Compatibility shim for terminals that do not wrap the cursor
///
/// Some terminals leave the cursor in the last column when text reaches the
/// right edge. With compensation enabled, writes are printed row by row and
/// a row that filled up without wrapping forces the cursor to column 0 of
/// the next row, which keeps `row * width + col` arithmetic valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapCompensation {
    #[default]
    Enabled,
    Disabled,
}

impl From<bool> for WrapCompensation {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// `text` with every control character replaced by a space, ready for
/// [`Line::write`]
pub fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// The current logical output line
pub struct Line<C: Console> {
    console: C,
    id: u64,
    offset: usize,
    length: usize,
    wrap: WrapCompensation,
}

impl<C: Console> Line<C> {
    /// Start a line at the console's current cursor position
    pub fn new(console: C) -> Self {
        Self::with_compensation(console, WrapCompensation::default())
    }

    pub fn with_compensation(console: C, wrap: WrapCompensation) -> Self {
        let line = Self {
            console,
            id: NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed),
            offset: 0,
            length: 0,
            wrap,
        };
        line.log("created");
        line
    }

    /// Identity tag shared with every span carved from this line
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cursor position relative to the start of the line
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Furthest offset written on this line
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    fn log(&self, message: &str) {
        trace!(line = self.id, offset = self.offset, length = self.length, "{message}");
    }

    /// Write plain text at the cursor
    pub fn write(&mut self, text: &str) -> Result<&mut Self> {
        self.emit(text, None)
    }

    /// Write text wrapped in a style's on/off escape pair
    pub fn write_styled(&mut self, text: &str, style: Style) -> Result<&mut Self> {
        self.emit(text, Some(style))
    }

    fn emit(&mut self, text: &str, style: Option<Style>) -> Result<&mut Self> {
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(LineError::ControlCharacter(c));
        }
        if text.is_empty() {
            return Ok(self);
        }

        match self.wrap {
            WrapCompensation::Enabled => self.print_wrapped(text, style)?,
            WrapCompensation::Disabled => self.console.print(text, style)?,
        }

        let written = text.chars().count();
        self.offset += written;
        self.length = self.length.max(self.offset);
        self.log(&format!("written {text:?} [{written}]"));
        Ok(self)
    }

    /// Print `text` one row segment at a time. A segment that fills its row
    /// but leaves the cursor on that row hit a terminal that does not wrap,
    /// so the cursor is moved to the start of the next row by hand.
    fn print_wrapped(&mut self, text: &str, style: Option<Style>) -> io::Result<()> {
        let width = usize::from(self.console.width()?.max(1));
        let mut rest = text;
        while !rest.is_empty() {
            let (col, row) = self.console.cursor()?;
            let room = width.saturating_sub(usize::from(col)).max(1);
            let split = rest.char_indices().nth(room).map_or(rest.len(), |(i, _)| i);
            let (segment, tail) = rest.split_at(split);
            self.console.print(segment, style)?;

            if segment.chars().count() == room && self.console.cursor()?.1 == row {
                self.console.move_cursor(0, row.saturating_add(1))?;
                trace!(line = self.id, row, "forced wrap");
            }
            rest = tail;
        }
        Ok(())
    }

    /// Overwrite the `n` characters before the cursor with `fill` and leave
    /// the cursor where the erased text began.
    ///
    /// `n` is clamped to the offset. When the cursor was at the frontier the
    /// erased text was trailing content, so the length shrinks with it.
    pub fn erase(&mut self, n: usize, fill: char) -> Result<&mut Self> {
        let at_frontier = self.offset == self.length;
        let n = n.min(self.offset);
        if n > 0 {
            let delta = n as isize;
            let mut line = HiddenCursor::hide(self)?;
            line.move_by(-delta)?;
            line.emit(&fill.to_string().repeat(n), None)?;
            line.move_by(-delta)?;
            if at_frontier {
                let offset = line.offset;
                line.length = offset;
            }
            line.show()?;
        }
        self.log(&format!("erased {n} with {fill:?}"));
        Ok(self)
    }

    /// Move the cursor `n` columns, clamped to `[0, length]`.
    ///
    /// The move is translated through the linear position
    /// `row * width + col`, so it crosses terminal row boundaries when the
    /// logical line spans several rows.
    pub fn move_by(&mut self, n: isize) -> Result<&mut Self> {
        let n = clamp_delta(n, self.offset, self.length);
        if n != 0 {
            let width = i64::from(self.console.width()?.max(1));
            let (col, row) = self.console.cursor()?;
            let linear = (i64::from(row) * width + i64::from(col) + n as i64).max(0);
            let row = u16::try_from(linear / width).unwrap_or(u16::MAX);
            let col = (linear % width) as u16;
            self.console.move_cursor(col, row)?;
            self.offset = self.offset.wrapping_add_signed(n);
        }
        self.log(&format!("moved {n}"));
        Ok(self)
    }

    pub fn move_to_head(&mut self) -> Result<&mut Self> {
        self.move_by(isize::MIN)
    }

    pub fn move_to_tail(&mut self) -> Result<&mut Self> {
        self.move_by(isize::MAX)
    }

    /// Finish this line and start a fresh one `n` rows further down.
    ///
    /// The cursor is moved past the written text first so a line spanning
    /// several rows is never split. The returned line has a new identity;
    /// spans of this line are expired from then on.
    pub fn new_line(mut self, n: usize) -> Result<Line<C>> {
        if n < 1 {
            return Err(LineError::InvalidNewLineCount(n));
        }
        self.move_to_tail()?;
        for _ in 0..n {
            self.console.newline()?;
        }
        self.log(&format!("next line {n}"));

        let Line { console, wrap, .. } = self;
        Ok(Line::with_compensation(console, wrap))
    }

    /// Write `text` and return a span covering exactly what was written
    pub fn span(&mut self, text: &str) -> Result<Span> {
        let span = Span::new(self.id, self.offset, text.chars().count());
        self.write(text)?;
        Ok(span)
    }
}

impl<C: Console> fmt::Debug for Line<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("id", &self.id)
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("wrap", &self.wrap)
            .finish_non_exhaustive()
    }
}

fn clamp_delta(n: isize, offset: usize, length: usize) -> isize {
    let back = -(offset as isize);
    let forward = (length - offset) as isize;
    n.clamp(back, forward)
}

/// Hides the cursor for as long as it lives
struct HiddenCursor<'a, C: Console> {
    line: &'a mut Line<C>,
    shown: bool,
}

impl<'a, C: Console> HiddenCursor<'a, C> {
    fn hide(line: &'a mut Line<C>) -> io::Result<Self> {
        line.console.set_cursor_visible(false)?;
        Ok(Self { line, shown: false })
    }

    fn show(mut self) -> io::Result<()> {
        self.shown = true;
        self.line.console.set_cursor_visible(true)
    }
}

impl<C: Console> Deref for HiddenCursor<'_, C> {
    type Target = Line<C>;

    fn deref(&self) -> &Self::Target {
        self.line
    }
}

impl<C: Console> DerefMut for HiddenCursor<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.line
    }
}

impl<C: Console> Drop for HiddenCursor<'_, C> {
    fn drop(&mut self) {
        if !self.shown {
            // Best effort, the error that got us here is already propagating
            let _ = self.line.console.set_cursor_visible(true);
        }
    }
}
