//! Loading poems from local files and PoetryDB

use super::{is_blank, title_from_stem, Poem};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Author given to poems read from plain text files
pub const UNSPECIFIED_AUTHOR: &str = "unspecified";

/// Errors that can happen while finding a poem
#[derive(Debug, Error)]
pub enum PoemError {
    #[error("Could not find file '{}'.", .0.display())]
    FileNotFound(PathBuf),
    #[error("No poem titled '{0}' was found.")]
    NotFound(String),
    #[error("{count} poems match '{query}', please be more specific.")]
    Ambiguous { query: String, count: usize },
    #[error("Unsupported file type '{}', expected .txt or .json.", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Poem source '{0}' is not available in this build.")]
    SourceUnavailable(Source),
    #[error("Invalid PoetryDB url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Could not parse poem: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "poetrydb")]
    #[error("Request to PoetryDB failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where to look for a poem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A `.txt` or `.json` file on disk; the query is its path
    #[default]
    Local,
    /// poetrydb.org; the query is the poem's title
    #[value(name = "poetrydb")]
    PoetryDb,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Source::Local => "local",
            Source::PoetryDb => "poetrydb",
        })
    }
}

/// Read a poem from a `.json` or `.txt` file.
///
/// Text files get their title from the file name and trailing blank lines
/// dropped.
pub fn load_local(path: impl AsRef<Path>) -> Result<Poem, PoemError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PoemError::FileNotFound(path.to_path_buf()));
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    debug!(path = %path.display(), extension, "loading local poem");
    match extension.to_ascii_lowercase().as_str() {
        "json" => {
            let content = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        "txt" => {
            let content = fs::read_to_string(path)?;
            let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
            while lines.last().is_some_and(|line| is_blank(line)) {
                lines.pop();
            }
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            Ok(Poem::new(title_from_stem(&stem), UNSPECIFIED_AUTHOR, lines))
        }
        _ => Err(PoemError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// URL for a title lookup, with the title trimmed, lower-cased and escaped
#[cfg(feature = "poetrydb")]
pub fn poetrydb_title_url(base_url: &str, query: &str) -> Result<reqwest::Url, PoemError> {
    let invalid = |reason: String| PoemError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };
    let mut url = reqwest::Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base".to_string()))?
        .pop_if_empty()
        .push("title")
        .push(&query.trim().to_lowercase());
    Ok(url)
}

/// Look a poem up by title on PoetryDB. Exactly one poem has to match.
#[cfg(feature = "poetrydb")]
pub async fn fetch_poetrydb(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Poem, PoemError> {
    let url = poetrydb_title_url(base_url, query)?;
    debug!(%url, "requesting poem from PoetryDB");

    let body: serde_json::Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    single_poem(query, body)
}

/// PoetryDB answers with an array of poems, or with a status object when
/// nothing matched.
pub fn single_poem(query: &str, body: serde_json::Value) -> Result<Poem, PoemError> {
    if !body.is_array() {
        return Err(PoemError::NotFound(query.trim().to_string()));
    }
    let mut poems: Vec<Poem> = serde_json::from_value(body)?;
    match poems.len() {
        0 => Err(PoemError::NotFound(query.trim().to_string())),
        1 => Ok(poems.remove(0)),
        count => Err(PoemError::Ambiguous {
            query: query.trim().to_string(),
            count,
        }),
    }
}

/// Poems already loaded during this session, by query and source
#[derive(Debug, Default)]
pub struct PoemCache {
    poems: HashMap<(String, Source), Poem>,
}

impl PoemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str, source: Source) -> Option<&Poem> {
        self.poems.get(&(query.to_string(), source))
    }

    pub fn insert(&mut self, query: &str, source: Source, poem: Poem) {
        self.poems.insert((query.to_string(), source), poem);
    }

    pub fn len(&self) -> usize {
        self.poems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_text_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "FireAndIce.txt",
            "Some say the world\r\nwill end in fire,\n\n  \n\t\n",
        );
        let poem = load_local(&path).unwrap();
        assert_eq!(poem.title, "Fire And Ice");
        assert_eq!(poem.author, UNSPECIFIED_AUTHOR);
        assert_eq!(poem.lines, vec!["Some say the world", "will end in fire,"]);
    }

    #[test]
    fn test_load_json_file() {
        let dir = TempDir::new().unwrap();
        let body = json!({
            "title": "Dust of Snow",
            "author": "Robert Frost",
            "lines": ["The way a crow"]
        });
        let path = write_file(&dir, "dust.json", &body.to_string());
        let poem = load_local(&path).unwrap();
        assert_eq!(poem.author, "Robert Frost");
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let dir = TempDir::new().unwrap();
        let missing = load_local(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(missing, PoemError::FileNotFound(_)));
        assert!(missing.to_string().starts_with("Could not find file"));

        let path = write_file(&dir, "poem.md", "# hi");
        assert!(matches!(
            load_local(&path).unwrap_err(),
            PoemError::UnsupportedFormat(_)
        ));

        let path = write_file(&dir, "broken.json", "{");
        assert!(matches!(load_local(&path).unwrap_err(), PoemError::Parse(_)));
    }

    #[test]
    fn test_single_poem() {
        let one = json!([{"title": "A", "author": "B", "lines": []}]);
        assert_eq!(single_poem("a", one).unwrap().title, "A");

        let two = json!([
            {"title": "A", "author": "B", "lines": []},
            {"title": "A2", "author": "B", "lines": []}
        ]);
        assert!(matches!(
            single_poem(" a ", two),
            Err(PoemError::Ambiguous { count: 2, .. })
        ));

        let missing = json!({"status": 404, "reason": "Not found"});
        assert!(matches!(single_poem("x", missing), Err(PoemError::NotFound(_))));
        assert!(matches!(single_poem("x", json!([])), Err(PoemError::NotFound(_))));
    }

    #[cfg(feature = "poetrydb")]
    #[test]
    fn test_title_url() {
        let url = poetrydb_title_url("https://poetrydb.org", "  The Raven ").unwrap();
        assert_eq!(url.as_str(), "https://poetrydb.org/title/the%20raven");

        let url = poetrydb_title_url("http://localhost:8080/api/", "ozymandias").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/title/ozymandias");

        assert!(poetrydb_title_url("not a url", "x").is_err());
    }

    #[test]
    fn test_cache() {
        let mut cache = PoemCache::new();
        assert!(cache.is_empty());
        cache.insert("raven", Source::PoetryDb, Poem::new("The Raven", "Poe", vec![]));
        assert!(cache.get("raven", Source::PoetryDb).is_some());
        assert!(cache.get("raven", Source::Local).is_none());
        assert_eq!(cache.len(), 1);
    }
}
