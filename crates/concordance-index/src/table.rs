//! Fixed-capacity open-addressing table with quadratic probing.
//!
//! Capacity is fixed at construction and the table never resizes: when a
//! probe sequence cycles without finding its key or an empty slot, insertion
//! fails and the caller must abandon the build with a bigger capacity.

use concordance_types::VerseRef;
use thiserror::Error;

use crate::hash::slot_index;

/// One occupied entry: a canonical key and its occurrence list in
/// first-insertion order. Once created for a key, a slot is never removed
/// or replaced; its list only grows.
#[derive(Clone, Debug)]
struct Slot {
    key: String,
    refs: Vec<VerseRef>,
}

/// The probe sequence for `key` cycled without finding the key or an empty
/// slot.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("no free slot along the probe cycle for {key:?}")]
pub struct TableFull {
    pub key: String,
}

/// How an insertion landed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Insertion {
    /// The key created a fresh slot.
    NewKey,
    /// The key was resident and the reference was appended.
    Appended,
    /// The reference equalled the slot list's last entry and was dropped.
    DuplicateSuppressed,
}

#[derive(Clone, Debug)]
pub struct ProbeTable {
    slots: Vec<Option<Slot>>,
}

impl ProbeTable {
    /// The builder validates that `capacity` is positive before
    /// constructing a table.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Find the slot index for `key`: the slot already holding it, or the
    /// empty slot where it would be placed. `None` means the probe sequence
    /// returned to its start without success.
    ///
    /// The sequence starts at the key's hash `s`, jumps to `(2s) % n`, then
    /// advances by `s` each step. When `s == 0` the stride is zero and the
    /// sequence cannot move past an occupied home slot.
    pub fn probe(&self, key: &str) -> Option<usize> {
        let n = self.capacity();
        let start = slot_index(key, n);
        if self.admits(start, key) {
            return Some(start);
        }
        let mut idx = (2 * start) % n;
        while idx != start {
            if self.admits(idx, key) {
                return Some(idx);
            }
            idx = (idx + start) % n;
        }
        None
    }

    fn admits(&self, idx: usize, key: &str) -> bool {
        match &self.slots[idx] {
            None => true,
            Some(slot) => slot.key == key,
        }
    }

    /// Record an occurrence of `key`, creating its slot on first sight.
    ///
    /// A reference identical to the slot list's last entry is suppressed;
    /// the same reference separated by a different one is recorded again.
    /// Only the last entry is consulted.
    pub fn insert(&mut self, key: &str, reference: VerseRef) -> Result<Insertion, TableFull> {
        let idx = self.probe(key).ok_or_else(|| TableFull {
            key: key.to_string(),
        })?;
        let entry = &mut self.slots[idx];
        match entry {
            Some(slot) => {
                if slot.refs.last() == Some(&reference) {
                    Ok(Insertion::DuplicateSuppressed)
                } else {
                    slot.refs.push(reference);
                    Ok(Insertion::Appended)
                }
            }
            None => {
                *entry = Some(Slot {
                    key: key.to_string(),
                    refs: vec![reference],
                });
                Ok(Insertion::NewKey)
            }
        }
    }

    /// The occurrence list for `key` in insertion order, if resident.
    pub fn lookup(&self, key: &str) -> Option<&[VerseRef]> {
        let idx = self.probe(key)?;
        match &self.slots[idx] {
            Some(slot) if slot.key == key => Some(&slot.refs),
            _ => None,
        }
    }
}
