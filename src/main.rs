use anyhow::{Context, Result};
use clap::Parser;
use poemem::cli::{formatting, Cli, CliState};
use poemem::config::{AppConfig, LoggingConfig};
use std::env;
use std::process::ExitCode;

/// Log file written inside the configured log directory
const LOG_FILE_NAME: &str = "poemem.log";

/// Stdout belongs to the quiz, so logs only go to a file.
fn init_logging(config: &LoggingConfig) {
    let default_directive = format!("poemem={}", config.level.to_lowercase());
    let env_override = env::var("RUST_LOG").unwrap_or_default();
    let combined_filter = if env_override.trim().is_empty() {
        default_directive
    } else if env_override.contains("poemem") {
        env_override
    } else {
        format!("{},{}", env_override, default_directive)
    };

    let directory = config.log_directory();
    if let Err(e) = std::fs::create_dir_all(&directory) {
        eprintln!(
            "Warning: Could not initialize file logging in {}: {}",
            directory.display(),
            e
        );
        return;
    }

    let file_appender = tracing_appender::rolling::never(directory, LOG_FILE_NAME);
    tracing_subscriber::fmt()
        .with_env_filter(combined_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::load()?,
    };
    config.apply_env_overrides();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging);

    let mut state = CliState::new_with_config(config)?;
    tracing::debug!("{}", state.config.summary());

    match cli.command {
        Some(command) => match state.execute(command).await {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{}", formatting::render_error(&e));
                return Ok(ExitCode::FAILURE);
            }
        },
        None => state.run_repl().await?,
    }
    Ok(ExitCode::SUCCESS)
}
