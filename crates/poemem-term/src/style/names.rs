//! Lookups from user-facing names to colors and attributes

use crossterm::style::{Attribute, Color};

/// Case and separator insensitive key: "Dark_Green" and "dark green" both
/// become "darkgreen".
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Resolve a color name, or a `#rrggbb` literal.
///
/// "reset" and "default" both mean the terminal's own color.
pub fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }

    let color = match normalize(name).as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Black,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "grey" | "gray" => Color::Grey,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

/// Resolve a text attribute name such as "bold" or "crossed_out".
pub fn parse_attribute(name: &str) -> Option<Attribute> {
    let attribute = match normalize(name.trim()).as_str() {
        "bold" => Attribute::Bold,
        "dim" => Attribute::Dim,
        "italic" => Attribute::Italic,
        "underline" | "underlined" => Attribute::Underlined,
        "blink" | "slowblink" => Attribute::SlowBlink,
        "rapidblink" => Attribute::RapidBlink,
        "reverse" | "reversed" => Attribute::Reverse,
        "hidden" => Attribute::Hidden,
        "crossedout" | "strikethrough" => Attribute::CrossedOut,
        _ => return None,
    };
    Some(attribute)
}
