//! Quizzes over whole poems
//!
//! A quiz walks the selected verses line by line, blanks words according to
//! the mode and difficulty, and sums the scores of every round. Escape in
//! any round ends the whole quiz.

pub mod blanks;
pub mod selector;

pub use blanks::{quiz_blanks, write_blanks, Blank, QuizStyles, RoundOutcome, ScoreResult};
pub use selector::{words, Selector, WordMatch};

use crate::line::{printable, Line, Result};
use clap::ValueEnum;
use poemem_term::Console;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// How lines are turned into questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// Blank a few words of every line
    #[default]
    Blanks,
    /// Show every other line and blank the ones in between completely
    Lines,
    /// Show only the first words of every line
    Initial,
}

/// How much of each line is hidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizMode::Blanks => "blanks",
            QuizMode::Lines => "lines",
            QuizMode::Initial => "initial",
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        })
    }
}

/// Everything a quiz needs besides the poem and the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOptions {
    pub mode: QuizMode,
    pub difficulty: Difficulty,
    pub styles: QuizStyles,
    /// Applied to every line, in order, before it is shown
    pub substitutions: Vec<(String, String)>,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            mode: QuizMode::default(),
            difficulty: Difficulty::default(),
            styles: QuizStyles::default(),
            substitutions: vec![("ß".to_string(), "ss".to_string())],
        }
    }
}

impl QuizOptions {
    /// Apply the substitutions and replace anything a line cannot display
    pub fn prepare(&self, text: &str) -> String {
        let text = self
            .substitutions
            .iter()
            .fold(text.to_string(), |text, (from, to)| text.replace(from, to));
        printable(&text)
    }
}

/// How a quiz ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizResult {
    Scored(ScoreResult),
    Canceled,
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizResult::Scored(score) => fmt::Display::fmt(score, f),
            QuizResult::Canceled => f.write_str("Quiz canceled :("),
        }
    }
}

#[derive(Debug)]
pub struct QuizOutcome<C: Console> {
    pub line: Line<C>,
    pub result: QuizResult,
}

/// Quiz the user on `verses`, starting on `line`.
pub fn run_quiz<C, R, V>(
    mut line: Line<C>,
    verses: &[V],
    options: &QuizOptions,
    rng: &mut R,
) -> Result<QuizOutcome<C>>
where
    C: Console,
    R: Rng + ?Sized,
    V: AsRef<[String]>,
{
    let selector = Selector::for_mode(options.mode, options.difficulty);
    info!(
        mode = %options.mode,
        difficulty = %options.difficulty,
        verses = verses.len(),
        "starting quiz"
    );

    let mut total = ScoreResult::default();
    for verse in verses {
        for (index, raw) in verse.as_ref().iter().enumerate() {
            let text = options.prepare(raw);
            if options.mode == QuizMode::Lines && index % 2 == 0 {
                line.write(&text)?;
                line = line.new_line(1)?;
                continue;
            }

            let matches = selector.select(&text, rng);
            let blanks = write_blanks(&mut line, &text, &matches)?;
            let round = quiz_blanks(line, &blanks, &options.styles)?;
            line = round.line;
            match round.score {
                Some(score) => total += score,
                None => {
                    debug!("quiz canceled");
                    return Ok(QuizOutcome {
                        line: line.new_line(1)?,
                        result: QuizResult::Canceled,
                    });
                }
            }
        }
        line = line.new_line(1)?;
    }

    info!(correct = total.correct, total = total.total, "quiz finished");
    Ok(QuizOutcome {
        line,
        result: QuizResult::Scored(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use poemem_term::{Key, KeyPress, VirtualConsole};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn verse(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_prepare_applies_substitutions() {
        let options = QuizOptions::default();
        assert_eq!(options.prepare("Straße\tam Fluß"), "Strasse am Fluss");
    }

    #[test]
    fn test_lines_mode_alternates() {
        let verses = vec![verse(&["Tyger Tyger", "burning bright"])];
        let keys = KeyPress::typed("burningbright");
        let line = Line::new(VirtualConsole::new(80).with_keys(keys));
        let options = QuizOptions {
            mode: QuizMode::Lines,
            ..QuizOptions::default()
        };

        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_quiz(line, &verses[..], &options, &mut rng).unwrap();
        assert_eq!(outcome.result, QuizResult::Scored(ScoreResult::new(2, 2)));

        let console = outcome.line.console();
        assert_eq!(console.row_text(0), "Tyger Tyger");
        assert_eq!(console.row_text(1), "burning bright");
        // one after the shown line, one after the round, one after the verse
        assert_eq!(console.newline_count(), 3);
    }

    #[test]
    fn test_cancel_stops_quiz() {
        let verses = vec![verse(&["In the forests"]), verse(&["of the night"])];
        let line = Line::new(VirtualConsole::new(80).with_keys([KeyPress::new(Key::Escape)]));
        let options = QuizOptions {
            difficulty: Difficulty::Extreme,
            ..QuizOptions::default()
        };

        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_quiz(line, &verses[..], &options, &mut rng).unwrap();
        assert_eq!(outcome.result, QuizResult::Canceled);
        assert_eq!(outcome.result.to_string(), "Quiz canceled :(");
        assert_eq!(outcome.line.console().newline_count(), 2);
    }

    #[test]
    fn test_empty_poem_scores_nothing() {
        let verses: Vec<Vec<String>> = Vec::new();
        let line = Line::new(VirtualConsole::new(80));
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run_quiz(line, &verses[..], &QuizOptions::default(), &mut rng).unwrap();
        assert_eq!(outcome.result, QuizResult::Scored(ScoreResult::default()));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(QuizMode::Initial.to_string(), "initial");
        assert_eq!(Difficulty::Extreme.to_string(), "extreme");
        assert_eq!(
            QuizMode::from_str("lines", true).unwrap(),
            QuizMode::Lines
        );
    }
}
