pub mod app_config;

// Re-export common types for convenience
pub use app_config::{
    AppConfig, LoggingConfig, PoetryDbConfig, QuizConfig, StyleConfig, StylesConfig,
    TerminalConfig,
};
