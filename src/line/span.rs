//! Fixed regions of a line that can be revisited later

use super::{Line, LineError, ReadOptions, Result};
use poemem_term::{Console, Style};

/// A fixed region `[offset, offset + len)` of one particular [`Line`].
///
/// A span only remembers where it is and which line it came from. Every
/// operation takes the current line and fails with [`LineError::Expired`]
/// when that line is not the one the span was carved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    line_id: u64,
    offset: usize,
    len: usize,
}

impl Span {
    pub(super) fn new(line_id: u64, offset: usize, len: usize) -> Self {
        Self {
            line_id,
            offset,
            len,
        }
    }

    pub fn line_id(&self) -> u64 {
        self.line_id
    }

    /// Start of the region within its line
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// End of the region (exclusive)
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    fn check<C: Console>(&self, line: &Line<C>) -> Result<()> {
        if line.id() != self.line_id {
            return Err(LineError::Expired {
                span_line: self.line_id,
                current_line: line.id(),
            });
        }
        Ok(())
    }

    /// Put the cursor at the start of the span
    pub fn seek<'a, C: Console>(&self, line: &'a mut Line<C>) -> Result<&'a mut Line<C>> {
        self.check(line)?;
        if line.offset() != self.offset {
            line.move_by(self.offset as isize - line.offset() as isize)?;
        }
        Ok(line)
    }

    /// Overwrite the span with `text`, truncated to the span's length
    pub fn write<C: Console>(
        &self,
        line: &mut Line<C>,
        text: &str,
        style: Option<Style>,
    ) -> Result<Span> {
        let line = self.seek(line)?;
        let end = text
            .char_indices()
            .nth(self.len)
            .map_or(text.len(), |(i, _)| i);
        let text = &text[..end];
        match style {
            Some(style) => line.write_styled(text, style)?,
            None => line.write(text)?,
        };
        Ok(*self)
    }

    /// Read input into the span; input never grows past the span's length
    pub fn read<C: Console>(
        &self,
        line: &mut Line<C>,
        options: &ReadOptions,
    ) -> Result<Option<String>> {
        let line = self.seek(line)?;
        let options = ReadOptions {
            max_length: self.len.min(options.max_length),
            ..options.clone()
        };
        line.read(&options)
    }
}
