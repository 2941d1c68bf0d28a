//! Line engine error types

use std::io;
use thiserror::Error;

/// Errors raised by [`Line`](super::Line) and [`Span`](super::Span)
///
/// Everything except `Io` is a broken caller contract. These are not meant to
/// be handled and retried; they abort the current operation.
#[derive(Error, Debug)]
pub enum LineError {
    /// A span was used after the line it was carved from was retired
    #[error("This line has expired (span belongs to line {span_line}, current line is {current_line})")]
    Expired { span_line: u64, current_line: u64 },

    /// Text passed to `write` contained a control character
    #[error("Cannot write control character {0:?} to a line")]
    ControlCharacter(char),

    /// `new_line` needs to advance by at least one row
    #[error("new_line requires at least one line, got {0}")]
    InvalidNewLineCount(usize),

    /// The terminal failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = LineError> = std::result::Result<T, E>;
