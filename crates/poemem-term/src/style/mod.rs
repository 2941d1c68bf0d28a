//! Text styles applied to a single write
//!
//! Colors and attributes are crossterm's own types. This module adds a small
//! value type bundling them and the name lookups the config file needs.

mod names;
mod style;

pub use crossterm::style::{Attribute, Attributes, Color};
pub use names::{parse_attribute, parse_color};
pub use style::Style;
