//! Key press classification
//!
//! The line editor only distinguishes a handful of keys. Everything crossterm
//! reports is folded into [`Key`], with the Control modifier kept separately.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The keys the line editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Backspace,
    /// A literal character
    Char(char),
    /// Any key the editor ignores (arrows, function keys, ...)
    Other,
}

/// A single key press with its Control modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
}

impl KeyPress {
    /// Create a key press without modifiers
    pub const fn new(key: Key) -> Self {
        Self { key, ctrl: false }
    }

    /// Create a key press with Control held
    pub const fn ctrl(key: Key) -> Self {
        Self { key, ctrl: true }
    }

    /// Create a plain character key press
    pub const fn char(c: char) -> Self {
        Self::new(Key::Char(c))
    }

    /// One plain key press per character of `text`
    pub fn typed(text: &str) -> impl Iterator<Item = KeyPress> + '_ {
        text.chars().map(Self::char)
    }

    /// Convert a crossterm key event, ignoring release and repeat events
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        Some(event.into())
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let key = match event.code {
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            // Many terminals report Ctrl+Backspace as Ctrl+H
            KeyCode::Char('h') if ctrl => Key::Backspace,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        };
        Self { key, ctrl }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_char() {
        let press: KeyPress = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE).into();
        assert_eq!(press, KeyPress::char('a'));

        let shift_a: KeyPress = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT).into();
        assert_eq!(shift_a, KeyPress::char('A'));
    }

    #[test]
    fn test_ctrl_backspace() {
        let press: KeyPress = KeyEvent::new(KeyCode::Backspace, KeyModifiers::CONTROL).into();
        assert_eq!(press, KeyPress::ctrl(Key::Backspace));

        let ctrl_h: KeyPress = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::CONTROL).into();
        assert_eq!(ctrl_h, KeyPress::ctrl(Key::Backspace));
    }

    #[test]
    fn test_ctrl_char_keeps_modifier() {
        let press: KeyPress = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL).into();
        assert_eq!(press, KeyPress::ctrl(Key::Char('c')));
    }

    #[test]
    fn test_other_keys() {
        let up: KeyPress = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE).into();
        assert_eq!(up.key, Key::Other);
        let esc: KeyPress = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE).into();
        assert_eq!(esc.key, Key::Escape);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(KeyPress::from_event(release), None);
    }

    #[test]
    fn test_typed() {
        let presses: Vec<_> = KeyPress::typed("ab").collect();
        assert_eq!(presses, vec![KeyPress::char('a'), KeyPress::char('b')]);
    }
}
