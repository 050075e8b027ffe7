//! In-memory concordance over structured scripture text.
//!
//! A [`Concordance`] is built in one pass over a line-oriented source file
//! (`Book NN <name>` headers, `CCC:VVV <text>` verse starts, free
//! continuation lines) and then answers exact-word lookups for the rest of
//! its life. Construction is all-or-nothing: the first grammar violation,
//! unnormalizable token, or exhausted probe cycle aborts the build with a
//! typed [`BuildError`], and no partial index survives.
//!
//! The index itself is the fixed-capacity quadratic-probing table of
//! [`table::ProbeTable`], keyed by the canonical lowercase words produced
//! by [`normalize::normalize`] and addressed by the positional polynomial
//! hash in [`hash`]. Completed concordances are immutable; share one behind
//! an `Arc` and query it from as many readers as needed.
//!
//! # Example
//! ```no_run
//! use concordance_index::Concordance;
//!
//! # fn main() -> Result<(), concordance_index::BuildError> {
//! let concordance = Concordance::build_from_file("kjv12.txt", 49_999)?;
//! for location in concordance.query("beginning") {
//!     println!("{location}");
//! }
//! let stats = concordance.stats();
//! println!("{} distinct words", stats.distinct_words);
//! # Ok(()) }
//! ```

use std::path::Path;

use concordance_types::{BookNames, BuildStats, VerseRef};

mod builder;
pub mod hash;
pub mod normalize;
pub mod table;

pub use builder::BuildError;
pub use normalize::{Normalized, NormalizeError};
pub use table::{Insertion, ProbeTable, TableFull};

/// A completed concordance: the probe table, the book-name registry, and
/// the counters accumulated during the build. Read-only after construction.
#[derive(Debug)]
pub struct Concordance {
    table: ProbeTable,
    books: BookNames,
    stats: BuildStats,
}

impl Concordance {
    /// Build a concordance from `path` with a fixed table capacity.
    ///
    /// The capacity must be positive and is never grown; a source with more
    /// distinct words than the probe sequences can place fails with
    /// [`BuildError::TableExhausted`].
    pub fn build_from_file(path: impl AsRef<Path>, capacity: usize) -> Result<Self, BuildError> {
        builder::build_from_file(path.as_ref(), capacity)
    }

    /// Every location of `raw`, rendered `"<book name> <chapter>:<verse>"`
    /// in first-occurrence order. Unknown words and raw input the
    /// normalizer rejects yield an empty list.
    pub fn query(&self, raw: &str) -> Vec<String> {
        self.references(raw)
            .into_iter()
            .flatten()
            .filter_map(|r| self.books.render(*r))
            .collect()
    }

    /// The unrendered occurrence list for `raw`, if the word is resident.
    pub fn references(&self, raw: &str) -> Option<&[VerseRef]> {
        match normalize::normalize(raw) {
            Ok(Normalized::Word(key)) => self.table.lookup(&key),
            Ok(Normalized::Empty) | Err(_) => None,
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn books(&self) -> &BookNames {
        &self.books
    }

    /// The table capacity the concordance was built with.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
}
