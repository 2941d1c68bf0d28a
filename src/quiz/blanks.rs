//! Fill-in-the-blank rounds on a single line

use super::selector::WordMatch;
use crate::line::{Line, ReadOptions, Result, Span};
use poemem_term::{Attribute, Color, Console, Style};
use std::fmt;
use std::ops::{Add, AddAssign};
use tracing::debug;

/// A hidden word and the placeholder standing in for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blank {
    pub word: String,
    pub span: Span,
}

/// Correct answers out of blanks asked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
}

impl ScoreResult {
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    /// Fraction of correct answers, zero when nothing was asked
    pub fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl Add for ScoreResult {
    type Output = ScoreResult;

    fn add(self, other: ScoreResult) -> ScoreResult {
        ScoreResult::new(self.correct + other.correct, self.total + other.total)
    }
}

impl AddAssign for ScoreResult {
    fn add_assign(&mut self, other: ScoreResult) {
        *self = *self + other;
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You got {}/{} correct, that's {:.0}%",
            self.correct,
            self.total,
            self.rate() * 100.0
        )
    }
}

/// How answers are shown once checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizStyles {
    pub correct: Style,
    pub incorrect: Style,
}

impl Default for QuizStyles {
    fn default() -> Self {
        Self {
            correct: Style::new().fg(Color::Green),
            incorrect: Style::new().with(Attribute::Italic) + Style::new().fg(Color::Red),
        }
    }
}

/// The line after a round, and the score unless the round was canceled
#[derive(Debug)]
pub struct RoundOutcome<C: Console> {
    pub line: Line<C>,
    pub score: Option<ScoreResult>,
}

/// Write `text` with every match replaced by underscores.
///
/// `matches` must be ascending and non-overlapping byte ranges of `text`.
pub fn write_blanks<C: Console>(
    line: &mut Line<C>,
    text: &str,
    matches: &[WordMatch],
) -> Result<Vec<Blank>> {
    let mut blanks = Vec::with_capacity(matches.len());
    let mut rest = 0;
    for found in matches {
        debug_assert!(
            found.start >= rest && found.end() <= text.len(),
            "word matches must be ascending and non-overlapping"
        );
        line.write(&text[rest..found.start])?;
        let placeholder = "_".repeat(found.word.chars().count());
        let span = line.span(&placeholder)?;
        blanks.push(Blank {
            word: found.word.clone(),
            span,
        });
        rest = found.end();
    }
    line.write(&text[rest..])?;
    Ok(blanks)
}

/// Ask for every blank in turn, then move on to a new line.
///
/// Escape cancels the whole round; the line still advances but no score is
/// returned. Wrong answers are replaced by the expected word.
pub fn quiz_blanks<C: Console>(
    mut line: Line<C>,
    blanks: &[Blank],
    styles: &QuizStyles,
) -> Result<RoundOutcome<C>> {
    let options = ReadOptions::default()
        .auto_submit(true)
        .erase_char('_')
        .allow_escape(true);

    let mut score = ScoreResult::default();
    for blank in blanks {
        score.total += 1;
        let Some(answer) = blank.span.read(&mut line, &options)? else {
            debug!(line = line.id(), asked = score.total, "round canceled");
            return Ok(RoundOutcome {
                line: line.new_line(1)?,
                score: None,
            });
        };

        if answer.to_lowercase() == blank.word.to_lowercase() {
            score.correct += 1;
            blank.span.write(&mut line, &answer, Some(styles.correct))?;
        } else {
            debug!(expected = %blank.word, answer = %answer, "wrong answer");
            blank
                .span
                .write(&mut line, &blank.word, Some(styles.incorrect))?;
        }
    }

    debug!(correct = score.correct, total = score.total, "round finished");
    Ok(RoundOutcome {
        line: line.new_line(1)?,
        score: Some(score),
    })
}
