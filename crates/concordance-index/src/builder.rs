//! One-pass construction of a [`Concordance`] from a line-structured
//! scripture file.
//!
//! The grammar is line-oriented. A line longer than seven characters that
//! starts with the literal `Book` introduces a book (`Book NN <name>`, NN a
//! 2-digit sequential number). A line longer than seven characters whose
//! first character is a digit starts a verse (`CCC:VVV <text>` with
//! zero-padded 3-digit fields). Every other line continues the current
//! verse. Validation is strict and fail-fast: the first malformed line or
//! token aborts the whole build with its line number, and the partial index
//! is discarded.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use concordance_types::{BookNames, BuildStats, VerseRef};
use thiserror::Error;
use tracing::info;

use crate::Concordance;
use crate::normalize::{self, Normalized};
use crate::table::{Insertion, ProbeTable};

/// Why a build failed. Every failure discards the partial index.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The source file could not be opened, or stopped being readable
    /// mid-pass.
    #[error("scripture source {} unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The requested table capacity was not a positive integer.
    #[error("table capacity must be a positive integer")]
    InvalidCapacity,
    /// A line violated the book-header or verse grammar, or a token could
    /// not be normalized.
    #[error("format problem on line {line}: {detail}")]
    Format { line: usize, detail: String },
    /// Probing cycled without a free slot; the chosen capacity was too
    /// small for the source.
    #[error("hash table exhausted on line {line} while inserting {word:?}")]
    TableExhausted { line: usize, word: String },
}

/// A classified source line.
enum Line<'a> {
    BookHeader { number: u16, name: &'a str },
    VerseStart {
        chapter: u16,
        verse: u16,
        first_of_chapter: bool,
        text: &'a str,
    },
    Continuation(&'a str),
}

fn classify(raw: &str) -> Result<Line<'_>, String> {
    if raw.len() > 7 && raw.starts_with("Book") {
        let number = numeric_field(raw, 5, 7)?;
        let name = rest_of_line(raw, 7)?;
        return Ok(Line::BookHeader { number, name });
    }
    if raw.len() > 7 && raw.as_bytes()[0].is_ascii_digit() {
        let chapter = numeric_field(raw, 0, 3)?;
        if raw.as_bytes()[3] != b':' {
            return Err("expected ':' between chapter and verse fields".to_string());
        }
        let verse_field = raw
            .get(4..7)
            .ok_or_else(|| "verse field is not 3 characters".to_string())?;
        let verse: u16 = verse_field
            .parse()
            .map_err(|_| format!("verse field {verse_field:?} is not a number"))?;
        let text = rest_of_line(raw, 7)?;
        return Ok(Line::VerseStart {
            chapter,
            verse,
            first_of_chapter: verse_field == "001",
            text,
        });
    }
    Ok(Line::Continuation(raw.trim()))
}

fn numeric_field(raw: &str, start: usize, end: usize) -> Result<u16, String> {
    let field = raw
        .get(start..end)
        .ok_or_else(|| format!("numeric field at columns {start}..{end} is malformed"))?;
    field
        .parse()
        .map_err(|_| format!("field {field:?} at columns {start}..{end} is not a number"))
}

fn rest_of_line(raw: &str, from: usize) -> Result<&str, String> {
    raw.get(from..)
        .map(str::trim)
        .ok_or_else(|| format!("line is split mid-character at column {from}"))
}

pub(crate) fn build_from_file(path: &Path, capacity: usize) -> Result<Concordance, BuildError> {
    if capacity == 0 {
        return Err(BuildError::InvalidCapacity);
    }
    let file = File::open(path).map_err(|source| BuildError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut table = ProbeTable::with_capacity(capacity);
    let mut books = BookNames::default();
    let mut stats = BuildStats::default();
    let mut book: u16 = 0;
    let mut chapter: u16 = 0;
    let mut verse: u16 = 0;

    info!("building concordance from {}", path.display());

    for (index, read) in reader.lines().enumerate() {
        let line_no = index + 1;
        let raw = read.map_err(|source| BuildError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let classified = classify(&raw).map_err(|detail| BuildError::Format {
            line: line_no,
            detail,
        })?;
        match classified {
            Line::BookHeader { number, name } => {
                book += 1;
                if number != book {
                    return Err(BuildError::Format {
                        line: line_no,
                        detail: format!("book number {number:02} out of sequence, expected {book:02}"),
                    });
                }
                if name.is_empty() {
                    return Err(BuildError::Format {
                        line: line_no,
                        detail: "book header has no name".to_string(),
                    });
                }
                books.push(name.to_string());
                chapter = 0;
                info!("working on {name}");
            }
            Line::VerseStart {
                chapter: parsed_chapter,
                verse: parsed_verse,
                first_of_chapter,
                text,
            } => {
                if first_of_chapter {
                    verse = 1;
                    chapter += 1;
                    stats.chapters += 1;
                } else {
                    verse += 1;
                }
                if parsed_chapter != chapter || parsed_verse != verse {
                    return Err(BuildError::Format {
                        line: line_no,
                        detail: format!(
                            "verse numbered {parsed_chapter}:{parsed_verse}, expected {chapter}:{verse}"
                        ),
                    });
                }
                stats.verses += 1;
                let at = VerseRef { book, chapter, verse };
                ingest(text, line_no, at, &mut table, &mut stats)?;
            }
            Line::Continuation(text) => {
                let at = VerseRef { book, chapter, verse };
                ingest(text, line_no, at, &mut table, &mut stats)?;
            }
        }
    }

    info!(
        "concordance built: {} words, {} distinct, {} verses, {} chapters",
        stats.total_words, stats.distinct_words, stats.verses, stats.chapters
    );

    Ok(Concordance { table, books, stats })
}

/// Tokenize one line of verse text and record every accepted key at `at`.
fn ingest(
    text: &str,
    line_no: usize,
    at: VerseRef,
    table: &mut ProbeTable,
    stats: &mut BuildStats,
) -> Result<(), BuildError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    for token in trimmed.split(' ') {
        let key = match normalize::normalize(token) {
            Ok(Normalized::Word(key)) => key,
            Ok(Normalized::Empty) => {
                return Err(BuildError::Format {
                    line: line_no,
                    detail: "empty token in verse text".to_string(),
                });
            }
            Err(err) => {
                return Err(BuildError::Format {
                    line: line_no,
                    detail: err.to_string(),
                });
            }
        };
        stats.total_words += 1;
        match table.insert(&key, at) {
            Ok(Insertion::NewKey) => stats.distinct_words += 1,
            Ok(Insertion::Appended | Insertion::DuplicateSuppressed) => {}
            Err(full) => {
                return Err(BuildError::TableExhausted {
                    line: line_no,
                    word: full.key,
                });
            }
        }
    }
    Ok(())
}
