//! Key input handling

mod input;

pub use input::{Key, KeyPress};
