//! poemem-term: inline terminal plumbing built on crossterm
//!
//! Unlike a full-screen TUI this crate never enters the alternate screen. It
//! provides:
//! - Text styles (`Style` over crossterm's `Color` and `Attribute`), plus
//!   the name lookups used by config files
//! - Key input classification (`Key`, `KeyPress`)
//! - The `Console` trait the line engine drives, with a crossterm backend and
//!   an in-memory `VirtualConsole` for tests

pub mod event;
pub mod style;
pub mod terminal;

// Re-export commonly used types
pub use event::{Key, KeyPress};
pub use style::{parse_attribute, parse_color, Attribute, Color, Style};
pub use terminal::{Console, CrosstermConsole, RawModeGuard, VirtualConsole, WrapBehavior};
