use std::io::Write;

use concordance_index::{BuildError, Concordance};
use tempfile::NamedTempFile;

fn build(lines: &[&str], capacity: usize) -> Result<Concordance, BuildError> {
    let mut file = NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    Concordance::build_from_file(file.path(), capacity)
}

#[test]
fn two_book_scenario() {
    let concordance = build(
        &[
            "Book 01 Genesis",
            "001:001 In the beginning God created",
            "Book 02 Exodus",
            "001:001 Now these are the names",
        ],
        101,
    )
    .expect("well-formed source builds");

    let stats = concordance.stats();
    assert_eq!(stats.total_words, 10);
    // "the" occurs in both verses; everything else is unique.
    assert_eq!(stats.distinct_words, 9);
    assert_eq!(stats.verses, 2);
    assert_eq!(stats.chapters, 2);
    assert_eq!(concordance.books().get(1), Some("Genesis"));
    assert_eq!(concordance.books().get(2), Some("Exodus"));

    assert_eq!(concordance.query("beginning"), vec!["Genesis 1:1"]);
    assert_eq!(concordance.query("names"), vec!["Exodus 1:1"]);
    assert_eq!(concordance.query("the"), vec!["Genesis 1:1", "Exodus 1:1"]);
}

#[test]
fn continuation_lines_attach_to_the_current_verse() {
    let concordance = build(
        &[
            "Book 01 Genesis",
            "001:001 In the beginning",
            "God created the heaven",
        ],
        101,
    )
    .unwrap();

    assert_eq!(concordance.query("god"), vec!["Genesis 1:1"]);
    assert_eq!(concordance.query("heaven"), vec!["Genesis 1:1"]);
    // Both occurrences of "the" carry the same coordinate, so the second
    // collapses against the list's last entry.
    assert_eq!(concordance.query("the"), vec!["Genesis 1:1"]);
    assert_eq!(concordance.stats().total_words, 7);
    assert_eq!(concordance.stats().distinct_words, 6);
}

#[test]
fn same_verse_repeats_collapse_even_with_intervening_words() {
    let concordance = build(&["Book 01 Genesis", "001:001 hill hill valley hill"], 101).unwrap();
    // Every "hill" occurrence resolves to the same coordinate; the
    // last-entry comparison drops all but the first.
    assert_eq!(concordance.query("hill"), vec!["Genesis 1:1"]);
    assert_eq!(concordance.stats().total_words, 4);
    assert_eq!(concordance.stats().distinct_words, 2);
}

#[test]
fn chapter_rollover_and_verse_numbering() {
    let concordance = build(
        &[
            "Book 01 Genesis",
            "001:001 alpha",
            "001:002 beta",
            "002:001 gamma",
        ],
        101,
    )
    .unwrap();

    assert_eq!(concordance.stats().chapters, 2);
    assert_eq!(concordance.stats().verses, 3);
    assert_eq!(concordance.query("beta"), vec!["Genesis 1:2"]);
    assert_eq!(concordance.query("gamma"), vec!["Genesis 2:1"]);
}

#[test]
fn queries_normalize_their_input() {
    let concordance = build(&["Book 01 Genesis", "001:001 In the beginning"], 101).unwrap();
    assert_eq!(concordance.query("Beginning,"), vec!["Genesis 1:1"]);
    assert_eq!(concordance.query("beginning's"), vec!["Genesis 1:1"]);
}

#[test]
fn unknown_and_rejected_words_yield_no_results() {
    let concordance = build(&["Book 01 Genesis", "001:001 In the beginning"], 101).unwrap();
    assert!(concordance.query("zebra").is_empty());
    assert!(concordance.query("3rd").is_empty());
    assert!(concordance.query("").is_empty());
}

#[test]
fn out_of_sequence_book_header_fails_with_its_line() {
    let err = build(
        &[
            "Book 01 Genesis",
            "001:001 In the beginning",
            "Book 03 Exodus",
        ],
        101,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Format { line: 3, .. }), "got {err}");
}

#[test]
fn out_of_sequence_verse_fails_with_its_line() {
    let err = build(
        &[
            "Book 01 Genesis",
            "001:001 In the beginning",
            "001:003 And God said",
        ],
        101,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::Format { line: 3, .. }), "got {err}");
}

#[test]
fn rejected_token_aborts_the_build() {
    let err = build(&["Book 01 Genesis", "001:001 In the 3rd year"], 101).unwrap_err();
    match err {
        BuildError::Format { line, detail } => {
            assert_eq!(line, 2);
            assert!(detail.contains("disallowed"), "detail: {detail}");
        }
        other => panic!("expected a format error, got {other}"),
    }
}

#[test]
fn capacity_one_exhausts_on_the_second_distinct_word() {
    let err = build(&["Book 01 Genesis", "001:001 light darkness"], 1).unwrap_err();
    match err {
        BuildError::TableExhausted { line, word } => {
            assert_eq!(line, 2);
            assert_eq!(word, "darkness");
        }
        other => panic!("expected table exhaustion, got {other}"),
    }
}

#[test]
fn zero_capacity_is_rejected_before_touching_the_source() {
    let err = Concordance::build_from_file("does-not-exist.txt", 0).unwrap_err();
    assert!(matches!(err, BuildError::InvalidCapacity));
}

#[test]
fn missing_source_is_reported_as_unavailable() {
    let err = Concordance::build_from_file("does-not-exist.txt", 101).unwrap_err();
    assert!(matches!(err, BuildError::SourceUnavailable { .. }));
}
