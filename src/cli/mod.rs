//! Command line and interactive prompt
//!
//! The same commands are accepted as process arguments and, when none are
//! given, line by line at the `poemem > ` prompt.

pub mod formatting;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use poemem_term::{Console, CrosstermConsole, RawModeGuard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::line::{Line, WrapCompensation};
use crate::poem::{load_local, Poem, PoemCache, PoemError, Source, VerseRange};
use crate::quiz::{run_quiz, Difficulty, QuizMode, QuizResult};

/// Prompt shown by the interactive loop
pub const PROMPT: &str = "poemem > ";

/// Learn poems by heart with fill-in-the-blank quizzes
#[derive(Debug, Parser)]
#[command(name = "poemem", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the usual lookup
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One line typed at the prompt
#[derive(Debug, Parser)]
#[command(name = "poemem", no_binary_name = true, disable_version_flag = true)]
struct PromptLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Quiz yourself on a poem
    Quiz(QuizArgs),
    /// Print a poem
    Fetch(FetchArgs),
    /// Show the active configuration
    Config,
    /// Leave the prompt
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct QuizArgs {
    /// Path of a .txt or .json file, or a title for PoetryDB
    pub query: String,
    /// Where to look for the poem
    #[arg(short, long, value_enum)]
    pub source: Option<Source>,
    /// Verses to quiz, e.g. `2`, `1..3`, `2..` or `..`
    #[arg(short, long, default_value = "..")]
    pub range: VerseRange,
    #[arg(short, long, value_enum)]
    pub mode: Option<QuizMode>,
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct FetchArgs {
    /// Path of a .txt or .json file, or a title for PoetryDB
    pub query: String,
    /// Verses to print
    #[arg(short, long, default_value = "..")]
    pub range: VerseRange,
    /// Where to look for the poem
    #[arg(short, long, value_enum)]
    pub source: Option<Source>,
}

/// Parse a prompt line. Empty input yields `Ok(None)`; `--help` and bad
/// arguments come back as clap errors whose rendering is the message to
/// show.
pub fn parse_command(input: &str) -> std::result::Result<Option<Command>, clap::Error> {
    let words = split_words(input);
    if words.is_empty() {
        return Ok(None);
    }
    PromptLine::try_parse_from(words).map(|line| Some(line.command))
}

/// Split on whitespace, keeping quoted sections together
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_word = false;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

/// Session state shared by every command
pub struct CliState {
    pub config: AppConfig,
    cache: PoemCache,
    rng: StdRng,
    #[cfg(feature = "poetrydb")]
    client: reqwest::Client,
}

impl CliState {
    /// Create a CLI state from a provided config
    pub fn new_with_config(config: AppConfig) -> Result<Self> {
        config.validate().context("validating configuration")?;
        Ok(Self {
            config,
            cache: PoemCache::new(),
            rng: StdRng::from_entropy(),
            #[cfg(feature = "poetrydb")]
            client: reqwest::Client::builder()
                .user_agent(concat!("poemem/", env!("CARGO_PKG_VERSION")))
                .build()
                .context("building HTTP client")?,
        })
    }

    /// Use a fixed random number generator, for reproducible quizzes
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Find a poem, reusing earlier lookups of the same query
    pub async fn find_poem(&mut self, query: &str, source: Source) -> Result<Poem> {
        if let Some(poem) = self.cache.get(query, source) {
            debug!(query, %source, "found poem in cache");
            return Ok(poem.clone());
        }

        let poem = match source {
            Source::Local => load_local(query)?,
            Source::PoetryDb => self.fetch_remote(query).await?,
        };
        info!(query, %source, title = %poem.title, "loaded poem");
        self.cache.insert(query, source, poem.clone());
        Ok(poem)
    }

    #[cfg(feature = "poetrydb")]
    async fn fetch_remote(&self, query: &str) -> Result<Poem, PoemError> {
        crate::poem::fetch_poetrydb(&self.client, &self.config.poetrydb.base_url, query).await
    }

    #[cfg(not(feature = "poetrydb"))]
    async fn fetch_remote(&self, _query: &str) -> Result<Poem, PoemError> {
        Err(PoemError::SourceUnavailable(Source::PoetryDb))
    }

    fn new_line<C: Console>(&self, console: C) -> Line<C> {
        Line::with_compensation(
            console,
            WrapCompensation::from(self.config.terminal.wrap_compensation),
        )
    }

    /// Run a quiz on `poem` using `console`
    pub fn quiz_poem<C: Console>(
        &mut self,
        console: C,
        poem: &Poem,
        args: &QuizArgs,
    ) -> Result<QuizResult> {
        let mut options = self.config.quiz_options()?;
        options.mode = args.mode.unwrap_or(options.mode);
        options.difficulty = args.difficulty.unwrap_or(options.difficulty);
        let title_style = self.config.styles.title.to_style()?;

        let verses = poem.verses();
        let selected = &verses[args.range.apply(verses.len())];

        let line = self.new_line(console);
        let line = formatting::write_title(line, &poem.title, title_style)?;
        let outcome = run_quiz(line, selected, &options, &mut self.rng)?;
        formatting::write_result(outcome.line, &outcome.result, title_style)?;
        Ok(outcome.result)
    }

    /// Print the selected verses of `poem` using `console`
    pub fn print_poem<C: Console>(&self, console: C, poem: &Poem, range: VerseRange) -> Result<()> {
        let title_style = self.config.styles.title.to_style()?;
        let verses = poem.verses();
        let selected = &verses[range.apply(verses.len())];

        let line = self.new_line(console);
        let line = formatting::write_title(line, &poem.title, title_style)?;
        formatting::write_verses(line, selected)?;
        Ok(())
    }

    /// Execute one command. Quizzes and poems are drawn straight onto the
    /// terminal; anything else is returned as text.
    pub async fn execute(&mut self, command: Command) -> Result<Option<String>> {
        debug!(?command, "executing command");
        match command {
            Command::Quiz(args) => {
                let source = args.source.unwrap_or(self.config.quiz.source);
                let poem = self.find_poem(&args.query, source).await?;
                let _raw = RawModeGuard::enter().context("enabling raw mode")?;
                self.quiz_poem(CrosstermConsole::new(), &poem, &args)?;
                Ok(None)
            }
            Command::Fetch(args) => {
                let source = args.source.unwrap_or(self.config.quiz.source);
                let poem = self.find_poem(&args.query, source).await?;
                let _raw = RawModeGuard::enter().context("enabling raw mode")?;
                self.print_poem(CrosstermConsole::new(), &poem, args.range)?;
                Ok(None)
            }
            Command::Config => Ok(Some(self.config.summary())),
            Command::Exit => Ok(None),
        }
    }

    /// Handle a single line of input. Returns an optional output string,
    /// and whether the prompt should close.
    pub async fn handle_line(&mut self, line: &str) -> Result<(Option<String>, bool)> {
        match parse_command(line) {
            Ok(None) => Ok((None, false)),
            Ok(Some(Command::Exit)) => Ok((None, true)),
            Ok(Some(command)) => Ok((self.execute(command).await?, false)),
            Err(e) => Ok((Some(e.render().to_string()), false)),
        }
    }

    /// Run interactive REPL on stdin/stdout
    pub async fn run_repl(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();
        let mut stdout = io::stdout();

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                break;
            } // EOF

            let output = match self.handle_line(&line).await {
                Ok((_, true)) => break,
                Ok((output, false)) => output,
                Err(e) => Some(formatting::render_error(&e)),
            };
            if let Some(out) = output {
                stdout.write_all(out.as_bytes()).await?;
                if !out.ends_with('\n') {
                    stdout.write_all(b"\n").await?;
                }
                stdout.flush().await?;
            }
        }
        Ok(())
    }
}
