//! Shared value types for the scripture concordance.
//!
//! A concordance maps each distinct word to every location where it occurs.
//! The types here are the currency the engine and its callers exchange:
//! [`VerseRef`] pins a word occurrence to a (book, chapter, verse)
//! coordinate, [`BookNames`] resolves the 1-based book index assigned in
//! file order back to a display name, and [`BuildStats`] carries the
//! counters accumulated while the index is built.
//!
//! ```rust
//! use concordance_types::{BookNames, VerseRef};
//!
//! let mut books = BookNames::default();
//! books.push("Genesis".to_string());
//! let r = VerseRef { book: 1, chapter: 1, verse: 1 };
//! assert_eq!(books.render(r).as_deref(), Some("Genesis 1:1"));
//! ```

use std::fmt;

/// A (book, chapter, verse) coordinate into the source text.
///
/// `book` is 1-based, assigned in the order book headers appear in the
/// source file. Equality is structural; references are freely copied into
/// per-word occurrence lists.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct VerseRef {
    pub book: u16,
    pub chapter: u16,
    pub verse: u16,
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// Append-only registry of book display names, keyed by 1-based book index.
///
/// Populated exactly once per book header encountered during a build, in
/// file order; read-only afterward.
#[derive(Clone, Debug, Default)]
pub struct BookNames {
    names: Vec<String>,
}

impl BookNames {
    /// Append the next book's display name.
    pub fn push(&mut self, name: String) {
        self.names.push(name);
    }

    /// Look up a display name by 1-based book index.
    pub fn get(&self, book: u16) -> Option<&str> {
        let idx = (book as usize).checked_sub(1)?;
        self.names.get(idx).map(String::as_str)
    }

    /// Number of registered books.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Render a reference as `"<book name> <chapter>:<verse>"`, or `None`
    /// if the book index was never registered.
    pub fn render(&self, r: VerseRef) -> Option<String> {
        self.get(r.book).map(|name| format!("{name} {r}"))
    }
}

/// Counters accumulated over one build pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BuildStats {
    /// Every accepted word occurrence, duplicates included.
    pub total_words: u64,
    /// Words that created a fresh table slot.
    pub distinct_words: u64,
    pub verses: u64,
    pub chapters: u64,
}
