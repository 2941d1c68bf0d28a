//! Application-level configuration
//!
//! Defines the top-level configuration: logging, terminal quirks, quiz
//! defaults, answer styles and the PoetryDB endpoint.

use crate::poem::Source;
use crate::quiz::{Difficulty, QuizMode, QuizOptions, QuizStyles};
use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::BaseDirs;
use poemem_term::{parse_attribute, parse_color, Style};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Embedded default configuration file
const DEFAULT_CONFIG: &str = include_str!("../../poemem.config.toml");

/// Configuration file name
const CONFIG_FILE_NAME: &str = "poemem.config.toml";

/// Directory under the home directory holding config and logs
const HOME_DIR_NAME: &str = ".poemem";

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Terminal compatibility settings
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Quiz defaults used when the command line leaves them out
    #[serde(default)]
    pub quiz: QuizConfig,
    /// Colors for titles and answers
    #[serde(default)]
    pub styles: StylesConfig,
    /// PoetryDB endpoint
    #[serde(default)]
    pub poetrydb: PoetryDbConfig,
}

impl AppConfig {
    /// Load configuration from the first config file found, or the embedded
    /// default
    pub fn load() -> Result<Self> {
        // Try to load from poemem.config.toml in current directory
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_NAME) {
            return Self::parse(&content, Path::new(CONFIG_FILE_NAME));
        }

        // Try to load from ~/.poemem/poemem.config.toml
        let home_config = home_dir().map(|home| home.join(CONFIG_FILE_NAME));
        if let Some(home_config) = &home_config {
            if let Ok(content) = std::fs::read_to_string(home_config) {
                return Self::parse(&content, home_config);
            }
        }

        // Try to load from environment variable POEMEM_CONFIG
        if let Ok(config_path) = std::env::var("POEMEM_CONFIG") {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                return Self::parse(&content, Path::new(&config_path));
            }
        }

        // No config file found - leave a copy of the default in the home directory
        if let Some(home_config) = &home_config {
            let written = home_config
                .parent()
                .map_or(Ok(()), std::fs::create_dir_all)
                .and_then(|_| std::fs::write(home_config, DEFAULT_CONFIG));
            match written {
                Ok(()) => eprintln!(
                    "Created {}. You can edit this file to customize your settings.",
                    home_config.display()
                ),
                Err(e) => eprintln!(
                    "Warning: Could not create {}: {}",
                    home_config.display(),
                    e
                ),
            }
        }

        Self::embedded_default()
    }

    /// Load configuration from a specific file path
    /// If the file doesn't exist, creates it with default settings
    pub fn load_from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "Configuration file not found at {}. Creating with default settings...",
                    path.display()
                );

                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .context(format!("Failed to create directory {}", parent.display()))?;
                }

                std::fs::write(path, DEFAULT_CONFIG).context(format!(
                    "Failed to create config file at {}",
                    path.display()
                ))?;

                Self::embedded_default()
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            )),
        }
    }

    /// The configuration shipped with the binary
    pub fn embedded_default() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG)
            .map_err(|e| anyhow::anyhow!("Failed to parse embedded default config: {}", e))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        for (name, style) in self.styles.iter() {
            style
                .to_style()
                .with_context(|| format!("Invalid style for {}", name))?;
        }

        if self.quiz.substitutions.keys().any(|from| from.is_empty()) {
            return Err(anyhow::anyhow!("Substitution patterns cannot be empty"));
        }

        if self.poetrydb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("PoetryDB base url cannot be empty"));
        }

        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.trim().is_empty())
        }

        if let Some(level) = var("POEMEM_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(mode) = var("POEMEM_MODE").and_then(|v| QuizMode::from_str(&v, true).ok()) {
            self.quiz.mode = mode;
        }
        if let Some(difficulty) =
            var("POEMEM_DIFFICULTY").and_then(|v| Difficulty::from_str(&v, true).ok())
        {
            self.quiz.difficulty = difficulty;
        }
        if let Some(source) = var("POEMEM_SOURCE").and_then(|v| Source::from_str(&v, true).ok()) {
            self.quiz.source = source;
        }
        if let Some(url) = var("POEMEM_POETRYDB_URL") {
            self.poetrydb.base_url = url;
        }
        if let Some(flag) = var("POEMEM_WRAP_COMPENSATION") {
            if let Ok(enabled) = flag.parse::<bool>() {
                self.terminal.wrap_compensation = enabled;
            }
        }
    }

    /// Quiz options for the configured defaults
    pub fn quiz_options(&self) -> Result<QuizOptions> {
        Ok(QuizOptions {
            mode: self.quiz.mode,
            difficulty: self.quiz.difficulty,
            styles: QuizStyles {
                correct: self.styles.correct.to_style()?,
                incorrect: self.styles.incorrect.to_style()?,
            },
            substitutions: self
                .quiz
                .substitutions
                .iter()
                .map(|(from, to)| (from.clone(), to.clone()))
                .collect(),
        })
    }

    /// Get a summary of the configuration
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Configuration loaded:\n");
        summary.push_str(&format!("Logging Level: {}\n", self.logging.level));
        summary.push_str(&format!(
            "Log Directory: {}\n",
            self.logging.log_directory().display()
        ));
        summary.push_str(&format!(
            "Wrap Compensation: {}\n",
            self.terminal.wrap_compensation
        ));
        summary.push_str(&format!("Quiz Mode: {}\n", self.quiz.mode));
        summary.push_str(&format!("Difficulty: {}\n", self.quiz.difficulty));
        summary.push_str(&format!("Source: {}\n", self.quiz.source));
        summary.push_str(&format!("Substitutions: {}\n", self.quiz.substitutions.len()));
        summary.push_str(&format!("PoetryDB: {}\n", self.poetrydb.base_url));
        summary
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(HOME_DIR_NAME))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for poemem.log, defaults to ~/.poemem/logs
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl LoggingConfig {
    /// The directory log files are written to
    pub fn log_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(|| home_dir().map(|home| home.join("logs")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// Terminal compatibility settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Force a line break when the terminal leaves the cursor in place after
    /// filling the last column
    #[serde(default = "default_wrap_compensation")]
    pub wrap_compensation: bool,
}

fn default_wrap_compensation() -> bool {
    true
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            wrap_compensation: default_wrap_compensation(),
        }
    }
}

/// Quiz defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub mode: QuizMode,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub source: Source,
    /// Text replaced in every line before it is shown
    #[serde(default = "default_substitutions")]
    pub substitutions: BTreeMap<String, String>,
}

fn default_substitutions() -> BTreeMap<String, String> {
    BTreeMap::from([("ß".to_string(), "ss".to_string())])
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mode: QuizMode::default(),
            difficulty: Difficulty::default(),
            source: Source::default(),
            substitutions: default_substitutions(),
        }
    }
}

/// A color and modifier set as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Foreground color name or `#rrggbb`
    #[serde(default)]
    pub fg: Option<String>,
    /// Background color name or `#rrggbb`
    #[serde(default)]
    pub bg: Option<String>,
    /// Attribute names such as `bold` or `italic`
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl StyleConfig {
    fn with_fg(fg: &str) -> Self {
        Self {
            fg: Some(fg.to_string()),
            ..Self::default()
        }
    }

    /// Resolve the names into a [`Style`]
    pub fn to_style(&self) -> Result<Style> {
        let mut style = Style::new();
        if let Some(name) = &self.fg {
            let color =
                parse_color(name).ok_or_else(|| anyhow::anyhow!("Unknown color: {}", name))?;
            style = style.fg(color);
        }
        if let Some(name) = &self.bg {
            let color =
                parse_color(name).ok_or_else(|| anyhow::anyhow!("Unknown color: {}", name))?;
            style = style.bg(color);
        }
        for name in &self.modifiers {
            let attribute = parse_attribute(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown modifier: {}", name))?;
            style = style.with(attribute);
        }
        Ok(style)
    }
}

/// Styles for the quiz screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default = "default_title_style")]
    pub title: StyleConfig,
    #[serde(default = "default_correct_style")]
    pub correct: StyleConfig,
    #[serde(default = "default_incorrect_style")]
    pub incorrect: StyleConfig,
}

fn default_title_style() -> StyleConfig {
    StyleConfig::with_fg("yellow")
}

fn default_correct_style() -> StyleConfig {
    StyleConfig::with_fg("green")
}

fn default_incorrect_style() -> StyleConfig {
    StyleConfig {
        modifiers: vec!["italic".to_string()],
        ..StyleConfig::with_fg("red")
    }
}

impl StylesConfig {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleConfig)> {
        [
            ("title", &self.title),
            ("correct", &self.correct),
            ("incorrect", &self.incorrect),
        ]
        .into_iter()
    }
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            title: default_title_style(),
            correct: default_correct_style(),
            incorrect: default_incorrect_style(),
        }
    }
}

/// PoetryDB endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoetryDbConfig {
    #[serde(default = "default_poetrydb_url")]
    pub base_url: String,
}

fn default_poetrydb_url() -> String {
    "https://poetrydb.org".to_string()
}

impl Default for PoetryDbConfig {
    fn default() -> Self {
        Self {
            base_url: default_poetrydb_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poemem_term::{Attribute, Color};

    #[test]
    fn test_embedded_default_matches_defaults() {
        let embedded = AppConfig::embedded_default().unwrap();
        let defaults = AppConfig::default();
        assert_eq!(embedded.logging.level, defaults.logging.level);
        assert_eq!(embedded.quiz.mode, defaults.quiz.mode);
        assert_eq!(embedded.quiz.difficulty, defaults.quiz.difficulty);
        assert_eq!(embedded.quiz.source, defaults.quiz.source);
        assert_eq!(embedded.quiz.substitutions, defaults.quiz.substitutions);
        assert_eq!(embedded.styles.incorrect, defaults.styles.incorrect);
        assert_eq!(embedded.poetrydb.base_url, defaults.poetrydb.base_url);
        assert!(embedded.terminal.wrap_compensation);
        assert!(embedded.validate().is_ok());
    }

    #[test]
    fn test_style_config_to_style() {
        let config = StyleConfig {
            fg: Some("dark-green".to_string()),
            bg: Some("#102030".to_string()),
            modifiers: vec!["bold".to_string(), "underline".to_string()],
        };
        let style = config.to_style().unwrap();
        assert_eq!(style.fg, Some(Color::DarkGreen));
        assert_eq!(
            style.bg,
            Some(Color::Rgb {
                r: 0x10,
                g: 0x20,
                b: 0x30,
            })
        );
        assert!(style.attributes.has(Attribute::Bold));
        assert!(style.attributes.has(Attribute::Underlined));
    }

    #[test]
    fn test_style_config_rejects_unknown_names() {
        assert!(StyleConfig::with_fg("chartreuse-ish").to_style().is_err());
        let config = StyleConfig {
            modifiers: vec!["sparkly".to_string()],
            ..StyleConfig::default()
        };
        assert!(config.to_style().is_err());
    }

    #[test]
    fn test_quiz_options_from_config() {
        let options = AppConfig::default().quiz_options().unwrap();
        assert_eq!(options, QuizOptions::default());
    }
}
