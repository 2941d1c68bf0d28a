//! Terminal abstraction over crossterm

mod backend;
mod console;
mod raw_mode;
mod virtual_console;

pub use backend::CrosstermConsole;
pub use console::Console;
pub use raw_mode::RawModeGuard;
pub use virtual_console::{Cell, VirtualConsole, WrapBehavior};
