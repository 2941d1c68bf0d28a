use crossterm::{
    queue,
    style::{
        Attribute, Attributes, Color, Print, ResetColor, SetAttribute, SetAttributes,
        SetBackgroundColor, SetForegroundColor,
    },
};
use std::io::{self, Write};
use std::ops::{Add, AddAssign};

/// Colors and attributes for one piece of text.
///
/// A style is a plain value. It becomes escape sequences only while a console
/// writes the text it decorates, and the terminal is reset right after, so
/// the line model never has to remember what was styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attributes: Attributes,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add a text attribute on top of the ones already set
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.attributes.set(attribute);
        self
    }

    /// Layer `other` on top of this style: colors set in `other` win and
    /// attributes from both are kept
    pub fn patch(mut self, other: Style) -> Self {
        self.fg = other.fg.or(self.fg);
        self.bg = other.bg.or(self.bg);
        self.attributes.extend(other.attributes);
        self
    }

    /// True when writing with this style emits no escape sequences
    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// Queue `text` wrapped in this style, resetting colors and attributes
    /// afterwards. Plain styles queue the bare text.
    pub fn queue_styled<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if self.is_plain() {
            queue!(out, Print(text))?;
            return Ok(());
        }

        if let Some(fg) = self.fg {
            queue!(out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = self.bg {
            queue!(out, SetBackgroundColor(bg))?;
        }
        if !self.attributes.is_empty() {
            queue!(out, SetAttributes(self.attributes))?;
        }
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}

impl Add for Style {
    type Output = Style;

    fn add(self, rhs: Style) -> Style {
        self.patch(rhs)
    }
}

impl AddAssign for Style {
    fn add_assign(&mut self, rhs: Style) {
        *self = self.patch(rhs);
    }
}
