//! Poems and where they come from

pub mod range;
pub mod source;

pub use range::{ParseRangeError, VerseRange};
pub use source::{load_local, PoemCache, PoemError, Source};

#[cfg(feature = "poetrydb")]
pub use source::fetch_poetrydb;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A poem as PoetryDB serves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Every line of the poem; empty lines separate verses
    pub lines: Vec<String>,
}

impl Poem {
    pub fn new(title: impl Into<String>, author: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            lines,
        }
    }

    /// The lines grouped into verses.
    ///
    /// Every blank line ends a verse, so two blank lines in a row produce an
    /// empty verse and a poem always has one verse more than blank lines.
    pub fn verses(&self) -> Vec<&[String]> {
        self.lines.split(|line| is_blank(line)).collect()
    }
}

/// Empty or whitespace only; separates verses and is trimmed from file ends
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Turn a file stem such as `the-road_notTaken` into `The Road Not Taken`
pub fn title_from_stem(stem: &str) -> String {
    static UPPER: OnceLock<Regex> = OnceLock::new();
    let upper = UPPER.get_or_init(|| Regex::new(r"\p{Lu}").unwrap());

    let spaced = upper.replace_all(&stem.replace(['-', '_'], " "), " $0").into_owned();
    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
