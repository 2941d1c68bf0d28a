//! Word selection policies
//!
//! A selector looks at one line of text and decides which words become
//! blanks. Selectors are plain values; the only state they touch is the
//! random number generator handed to [`Selector::select`].

use super::{Difficulty, QuizMode};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

/// A word picked out of a line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    /// Byte offset of the word within the line
    pub start: usize,
    pub word: String,
}

impl WordMatch {
    pub fn new(start: usize, word: impl Into<String>) -> Self {
        Self {
            start,
            word: word.into(),
        }
    }

    /// Byte offset just past the word
    pub fn end(&self) -> usize {
        self.start + self.word.len()
    }
}

fn word_pattern() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"\p{L}+").unwrap())
}

/// Every run of letters in `text`, left to right
pub fn words(text: &str) -> Vec<WordMatch> {
    matches_of(word_pattern(), text)
}

fn matches_of(pattern: &Regex, text: &str) -> Vec<WordMatch> {
    pattern
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| WordMatch::new(m.start(), m.as_str()))
        .collect()
}

/// Which words of a line to blank out
#[derive(Debug, Clone)]
pub enum Selector {
    /// Split the words longer than `min_len` characters into `count`
    /// contiguous groups and pick one word at random from each group
    RandomSubset { min_len: usize, count: usize },
    /// Every word but one, chosen at random
    SkipOneAtRandom,
    /// Every word after the first `skip`. With `blank_first_tail` the first
    /// word is blanked too, except for its initial letter.
    SkipLeading { skip: usize, blank_first_tail: bool },
    /// Every word
    AllWords,
    /// Every match of a custom pattern
    Pattern(Regex),
}

impl Selector {
    /// The selector a quiz mode uses at a given difficulty
    pub fn for_mode(mode: QuizMode, difficulty: Difficulty) -> Self {
        match mode {
            QuizMode::Blanks => match difficulty {
                Difficulty::Easy => Selector::RandomSubset {
                    min_len: 3,
                    count: 1,
                },
                Difficulty::Medium => Selector::RandomSubset {
                    min_len: 3,
                    count: 2,
                },
                Difficulty::Hard => Selector::RandomSubset {
                    min_len: 3,
                    count: 4,
                },
                Difficulty::Extreme => Selector::SkipOneAtRandom,
            },
            QuizMode::Initial => match difficulty {
                Difficulty::Easy => Selector::SkipLeading {
                    skip: 2,
                    blank_first_tail: false,
                },
                Difficulty::Medium | Difficulty::Hard => Selector::SkipLeading {
                    skip: 1,
                    blank_first_tail: false,
                },
                Difficulty::Extreme => Selector::SkipLeading {
                    skip: 1,
                    blank_first_tail: true,
                },
            },
            QuizMode::Lines => Selector::AllWords,
        }
    }

    /// Pick the words to blank in `text`, in ascending order without overlap
    pub fn select<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Vec<WordMatch> {
        match self {
            Selector::RandomSubset { min_len, count } => {
                let long_words: Vec<_> = words(text)
                    .into_iter()
                    .filter(|w| w.word.chars().count() > *min_len)
                    .collect();
                select_at_random(long_words, *count, rng)
            }
            Selector::SkipOneAtRandom => skip_at_random(words(text), rng),
            Selector::SkipLeading {
                skip,
                blank_first_tail,
            } => {
                let all = words(text);
                let mut selected = Vec::with_capacity(all.len());
                if *blank_first_tail {
                    if let Some(tail) = all.first().and_then(initial_tail) {
                        selected.push(tail);
                    }
                }
                selected.extend(all.into_iter().skip((*skip).max(usize::from(*blank_first_tail))));
                selected
            }
            Selector::AllWords => words(text),
            Selector::Pattern(pattern) => matches_of(pattern, text),
        }
    }
}

/// The part of a word after its first letter
fn initial_tail(word: &WordMatch) -> Option<WordMatch> {
    let first = word.word.chars().next()?;
    let rest = &word.word[first.len_utf8()..];
    if rest.is_empty() {
        return None;
    }
    Some(WordMatch::new(word.start + first.len_utf8(), rest))
}

/// One random item from each of `count` contiguous, equally sized groups.
///
/// The group size is rounded up, so fewer than `count` items come back when
/// the items don't divide evenly.
fn select_at_random<T, R: Rng + ?Sized>(items: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    let count = count.min(items.len());
    if count == 0 {
        return Vec::new();
    }
    let size = items.len().div_ceil(count);
    let picks: Vec<usize> = (0..items.len())
        .step_by(size)
        .map(|start| rng.gen_range(start..(start + size).min(items.len())))
        .collect();

    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| picks.contains(i))
        .map(|(_, item)| item)
        .collect()
}

/// All items except one chosen at random
fn skip_at_random<T, R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Vec<T> {
    if items.is_empty() {
        return items;
    }
    let skipped = rng.gen_range(0..items.len());
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != skipped)
        .map(|(_, item)| item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn texts(matches: &[WordMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.word.as_str()).collect()
    }

    fn assert_ordered(matches: &[WordMatch]) {
        for pair in matches.windows(2) {
            assert!(pair[0].end() <= pair[1].start, "{pair:?}");
        }
    }

    #[test]
    fn test_words_are_letter_runs() {
        let found = words("Über den Wolken, muss die Freiheit");
        assert_eq!(
            texts(&found),
            vec!["Über", "den", "Wolken", "muss", "die", "Freiheit"]
        );
        assert_eq!(found[1].start, "Über ".len());
    }

    #[test]
    fn test_random_subset_buckets() {
        let text = "Once upon midnight dreary, while pondered, weak and weary";
        let selector = Selector::RandomSubset {
            min_len: 3,
            count: 2,
        };
        let mut rng = rng();
        for _ in 0..20 {
            let picked = selector.select(text, &mut rng);
            assert_eq!(picked.len(), 2);
            assert_ordered(&picked);
            assert!(picked.iter().all(|m| m.word.chars().count() > 3));
        }
    }

    #[test]
    fn test_random_subset_uneven_groups() {
        // Five candidates in groups of two: three picks
        let picked = select_at_random(vec![1, 2, 3, 4, 5], 4, &mut rng());
        assert_eq!(picked.len(), 3);
        assert!(picked[0] <= 2 && (3..=4).contains(&picked[1]) && picked[2] == 5);
    }

    #[test]
    fn test_random_subset_without_candidates() {
        let selector = Selector::RandomSubset {
            min_len: 3,
            count: 2,
        };
        assert!(selector.select("I am a cat", &mut rng()).is_empty());
    }

    #[test]
    fn test_skip_one_at_random() {
        let picked = Selector::SkipOneAtRandom.select("one two three four", &mut rng());
        assert_eq!(picked.len(), 3);
        assert_ordered(&picked);
        assert!(Selector::SkipOneAtRandom.select("", &mut rng()).is_empty());
    }

    #[test]
    fn test_initial_easy_shows_two_words() {
        let selector = Selector::for_mode(QuizMode::Initial, Difficulty::Easy);
        let picked = selector.select("Tyger Tyger, burning bright", &mut rng());
        assert_eq!(texts(&picked), vec!["burning", "bright"]);
    }

    #[test]
    fn test_initial_extreme_blanks_first_tail() {
        let selector = Selector::for_mode(QuizMode::Initial, Difficulty::Extreme);
        let picked = selector.select("Tyger Tyger, burning bright", &mut rng());
        assert_eq!(texts(&picked), vec!["yger", "Tyger", "burning", "bright"]);
        assert_eq!(picked[0].start, 1);
        assert_ordered(&picked);
    }

    #[test]
    fn test_initial_extreme_single_letter_first_word() {
        let selector = Selector::for_mode(QuizMode::Initial, Difficulty::Extreme);
        let picked = selector.select("I wandered lonely", &mut rng());
        assert_eq!(texts(&picked), vec!["wandered", "lonely"]);
    }

    #[test]
    fn test_lines_mode_blanks_everything() {
        let selector = Selector::for_mode(QuizMode::Lines, Difficulty::Hard);
        let picked = selector.select("In the forests of the night", &mut rng());
        assert_eq!(picked.len(), 6);
    }

    #[test]
    fn test_pattern_selector() {
        let selector = Selector::Pattern(Regex::new(r"\bcat\b").unwrap());
        let picked = selector.select("The cat sat", &mut rng());
        assert_eq!(picked, vec![WordMatch::new(4, "cat")]);
    }

    #[test]
    fn test_blanks_difficulty_counts() {
        let cases = [
            (Difficulty::Easy, 1),
            (Difficulty::Medium, 2),
            (Difficulty::Hard, 4),
        ];
        for (difficulty, expected) in cases {
            match Selector::for_mode(QuizMode::Blanks, difficulty) {
                Selector::RandomSubset { min_len, count } => {
                    assert_eq!(min_len, 3);
                    assert_eq!(count, expected);
                }
                other => panic!("unexpected selector {other:?}"),
            }
        }
        assert!(matches!(
            Selector::for_mode(QuizMode::Blanks, Difficulty::Extreme),
            Selector::SkipOneAtRandom
        ));
    }
}
