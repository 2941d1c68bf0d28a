//! Rendering poems, titles and results onto the active line

use crate::line::{printable, Line, Result};
use crate::poem::PoemError;
use crate::quiz::QuizResult;
use poemem_term::{Console, Style};

/// An empty line, the title, then two line breaks
pub fn write_title<C: Console>(line: Line<C>, title: &str, style: Style) -> Result<Line<C>> {
    let mut line = line.new_line(1)?;
    line.write_styled(&printable(title), style)?;
    line.new_line(2)
}

/// The quiz result followed by two line breaks
pub fn write_result<C: Console>(
    mut line: Line<C>,
    result: &QuizResult,
    style: Style,
) -> Result<Line<C>> {
    line.write_styled(&result.to_string(), style)?;
    line.new_line(2)
}

/// Every line of every verse, with an empty line after each verse
pub fn write_verses<C, V>(mut line: Line<C>, verses: &[V]) -> Result<Line<C>>
where
    C: Console,
    V: AsRef<[String]>,
{
    for verse in verses {
        for text in verse.as_ref() {
            line.write(&printable(text))?;
            line = line.new_line(1)?;
        }
        line = line.new_line(1)?;
    }
    Ok(line)
}

/// Message shown for a failed command. Poem lookups fail with a plain
/// message; anything else is reported in full.
pub fn render_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<PoemError>() {
        Some(poem_error) => poem_error.to_string(),
        None => format!("Unhandled error: {:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poemem_term::{Color, VirtualConsole};

    #[test]
    fn test_title_layout() {
        let yellow = Style::new().fg(Color::Yellow);
        let line = Line::new(VirtualConsole::new(40));
        let line = write_title(line, "Ozymandias", yellow).unwrap();

        let console = line.console();
        assert_eq!(console.row_text(0), "");
        assert_eq!(console.row_text(1), "Ozymandias");
        assert_eq!(console.cell(0, 1).unwrap().style, Some(yellow));
        assert_eq!(console.newline_count(), 3);
        assert_eq!(console.position(), (0, 3));
    }

    #[test]
    fn test_result_layout() {
        let line = Line::new(VirtualConsole::new(60));
        let line = write_result(line, &QuizResult::Canceled, Style::new()).unwrap();
        assert_eq!(line.console().row_text(0), "Quiz canceled :(");
        assert_eq!(line.console().newline_count(), 2);
    }

    #[test]
    fn test_verses_layout() {
        let verses = vec![
            vec!["a\tb".to_string(), "c".to_string()],
            vec!["d".to_string()],
        ];
        let line = write_verses(Line::new(VirtualConsole::new(20)), &verses[..]).unwrap();
        assert_eq!(line.console().text(), "a b\nc\n\nd");
        assert_eq!(line.console().newline_count(), 5);
    }

    #[test]
    fn test_render_error() {
        let err = anyhow::Error::new(PoemError::NotFound("x".into()));
        assert_eq!(render_error(&err), "No poem titled 'x' was found.");

        let err = anyhow::anyhow!("boom");
        assert!(render_error(&err).starts_with("Unhandled error: boom"));
    }
}
