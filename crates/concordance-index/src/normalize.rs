//! Token normalization: raw whitespace-delimited tokens in, canonical
//! lowercase lookup keys out.
//!
//! The pipeline removes a fixed set of punctuation marks wherever they
//! appear, then applies three ordered suffix passes (`--`, `'s`, a bare
//! trailing apostrophe). Whatever remains must be entirely letters and
//! hyphens; anything else rejects the token outright rather than salvaging
//! part of it, since a malformed token means the source file is corrupt.

use thiserror::Error;

const PUNCTUATION: [char; 8] = ['.', ',', ';', ':', '?', '!', '(', ')'];

/// Outcome of normalizing a token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Normalized {
    /// The raw token was empty to begin with.
    Empty,
    /// The canonical lowercase lookup key.
    Word(String),
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum NormalizeError {
    #[error("disallowed character {0:?} in token")]
    DisallowedChar(char),
    #[error("token reduced to nothing after stripping")]
    Stripped,
}

/// Normalize a raw token into a lookup key.
///
/// Hyphens survive anywhere in the token (`co-operate` stays intact), and
/// only the specific trailing forms are stripped: `shall--` becomes
/// `shall`, `Love's` becomes `love`, `james'` becomes `james`.
pub fn normalize(raw: &str) -> Result<Normalized, NormalizeError> {
    if raw.is_empty() {
        return Ok(Normalized::Empty);
    }

    let mut word: String = raw.chars().filter(|c| !PUNCTUATION.contains(c)).collect();
    if word.is_empty() {
        return Err(NormalizeError::Stripped);
    }

    // Suffix passes in fixed order; the length guards keep two-character
    // tokens like "--" intact.
    if word.len() > 2 && word.ends_with("--") {
        word.truncate(word.len() - 2);
    }
    if word.len() > 2 && word.ends_with("'s") {
        word.truncate(word.len() - 2);
    }
    if word.ends_with('\'') {
        word.pop();
    }
    if word.is_empty() {
        return Err(NormalizeError::Stripped);
    }

    let mut key = String::with_capacity(word.len());
    for c in word.chars() {
        if !c.is_alphabetic() && c != '-' {
            return Err(NormalizeError::DisallowedChar(c));
        }
        key.extend(c.to_lowercase());
    }
    Ok(Normalized::Word(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> String {
        match normalize(raw) {
            Ok(Normalized::Word(key)) => key,
            other => panic!("expected a key for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn strips_possessive_suffix() {
        assert_eq!(key("Love's"), "love");
    }

    #[test]
    fn strips_trailing_double_hyphen() {
        assert_eq!(key("shall--"), "shall");
    }

    #[test]
    fn strips_punctuation_everywhere() {
        assert_eq!(key("not,"), "not");
        assert_eq!(key("(selah)"), "selah");
    }

    #[test]
    fn keeps_interior_hyphen() {
        assert_eq!(key("co-operate"), "co-operate");
    }

    #[test]
    fn strips_bare_trailing_apostrophe() {
        assert_eq!(key("james'"), "james");
    }

    #[test]
    fn rejects_digits() {
        assert_eq!(normalize("3rd"), Err(NormalizeError::DisallowedChar('3')));
    }

    #[test]
    fn rejects_interior_apostrophe() {
        assert_eq!(normalize("don't"), Err(NormalizeError::DisallowedChar('\'')));
    }

    #[test]
    fn empty_input_is_the_empty_sentinel() {
        assert_eq!(normalize(""), Ok(Normalized::Empty));
    }

    #[test]
    fn rejects_tokens_that_strip_to_nothing() {
        assert_eq!(normalize("()"), Err(NormalizeError::Stripped));
        assert_eq!(normalize("'"), Err(NormalizeError::Stripped));
    }

    #[test]
    fn lowercases_keys() {
        assert_eq!(key("GOD"), "god");
        assert_eq!(key("Beginning"), "beginning");
    }
}
