//! Interactive single-key line editing

use super::{Line, Result};
use poemem_term::{Console, Key, KeyPress};
use tracing::debug;

/// Options for [`Line::read`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Enter and Tab only submit once the input is at least this long
    pub min_length: usize,
    /// Input never grows beyond this many characters
    pub max_length: usize,
    /// Character written over erased input
    pub erase_char: char,
    /// Submit as soon as `max_length` characters were entered
    pub auto_submit: bool,
    /// Whether the caller treats Escape as a valid outcome. The read loop
    /// itself always stops on Escape.
    pub allow_escape: bool,
    /// Accept whitespace characters
    pub allow_space: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: usize::MAX,
            erase_char: ' ',
            auto_submit: false,
            allow_escape: false,
            allow_space: false,
        }
    }
}

impl ReadOptions {
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn erase_char(mut self, erase_char: char) -> Self {
        self.erase_char = erase_char;
        self
    }

    pub fn auto_submit(mut self, auto_submit: bool) -> Self {
        self.auto_submit = auto_submit;
        self
    }

    pub fn allow_escape(mut self, allow_escape: bool) -> Self {
        self.allow_escape = allow_escape;
        self
    }

    pub fn allow_space(mut self, allow_space: bool) -> Self {
        self.allow_space = allow_space;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Reading,
    Done,
    Canceled,
}

impl<C: Console> Line<C> {
    /// Read keys until the input is submitted or canceled.
    ///
    /// Typed characters are echoed at the cursor. Returns `None` when the
    /// user pressed Escape.
    pub fn read(&mut self, options: &ReadOptions) -> Result<Option<String>> {
        let mut buffer = Vec::new();
        let mut state = ReadState::Reading;
        while state == ReadState::Reading {
            let press = self.console.read_key()?;
            state = self.apply_key(press, &mut buffer, options)?;
        }

        match state {
            ReadState::Canceled => {
                debug!(line = self.id, "read canceled");
                Ok(None)
            }
            _ => {
                let input: String = buffer.into_iter().collect();
                debug!(line = self.id, input = %input, "read submitted");
                Ok(Some(input))
            }
        }
    }

    fn apply_key(
        &mut self,
        press: KeyPress,
        buffer: &mut Vec<char>,
        options: &ReadOptions,
    ) -> Result<ReadState> {
        match press.key {
            Key::Escape => return Ok(ReadState::Canceled),
            Key::Tab | Key::Enter => {
                if buffer.len() >= options.min_length {
                    return Ok(ReadState::Done);
                }
            }
            Key::Backspace if !buffer.is_empty() => {
                if press.ctrl {
                    self.erase(buffer.len(), options.erase_char)?;
                    buffer.clear();
                } else {
                    self.erase(1, options.erase_char)?;
                    buffer.pop();
                }
            }
            Key::Char(c) => {
                if press.ctrl || c.is_control() || (c.is_whitespace() && !options.allow_space) {
                    return Ok(ReadState::Reading);
                }
                if buffer.len() < options.max_length {
                    self.write(c.encode_utf8(&mut [0; 4]))?;
                    buffer.push(c);
                }
                if buffer.len() >= options.max_length && options.auto_submit {
                    return Ok(ReadState::Done);
                }
            }
            Key::Backspace | Key::Other => {}
        }
        Ok(ReadState::Reading)
    }
}
