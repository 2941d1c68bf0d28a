use poemem::cli::CliState;
use poemem::config::AppConfig;
use poemem::poem::{load_local, PoemError, Source, VerseRange};

const FIXTURES: &str = "tests/fixtures/poems";

#[test]
fn test_text_fixture() {
    let poem = load_local(format!("{FIXTURES}/FireAndIce.txt")).unwrap();
    assert_eq!(poem.title, "Fire And Ice");
    assert_eq!(poem.author, "unspecified");
    assert_eq!(poem.lines.len(), 10);

    let verses = poem.verses();
    assert_eq!(verses.len(), 2);
    assert_eq!(verses[0].len(), 4);
    assert_eq!(verses[1].last().map(String::as_str), Some("And would suffice."));
}

#[test]
fn test_json_fixture() {
    let poem = load_local(format!("{FIXTURES}/ozymandias.json")).unwrap();
    assert_eq!(poem.author, "Percy Bysshe Shelley");
    let verses = poem.verses();
    assert_eq!(verses.len(), 2);

    let range: VerseRange = "1..".parse().unwrap();
    let selected = &verses[range.apply(verses.len())];
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0][0], "Look on my works, ye Mighty, and despair!");
}

#[test]
fn test_unsupported_fixture() {
    let err = load_local(format!("{FIXTURES}/notes.md")).unwrap_err();
    assert!(matches!(err, PoemError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_find_poem_caches() {
    let mut state = CliState::new_with_config(AppConfig::default()).unwrap();
    let query = format!("{FIXTURES}/FireAndIce.txt");
    let first = state.find_poem(&query, Source::Local).await.unwrap();
    let second = state.find_poem(&query, Source::Local).await.unwrap();
    assert_eq!(first, second);

    let err = state
        .find_poem(&format!("{FIXTURES}/missing.txt"), Source::Local)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PoemError>(),
        Some(PoemError::FileNotFound(_))
    ));
}
