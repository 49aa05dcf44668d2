//! Candidate filtering against the word under the cursor.
//!
//! Core idea: case-insensitive substring match (not prefix-anchored).
//! - `typed` matches `candidate` if `candidate` contains `typed`, ignoring case.
//! - An empty `typed` matches everything.

/// Returns true if `candidate` is a plausible completion for `typed`.
pub fn matches(candidate: &str, typed: &str) -> bool {
    if typed.is_empty() {
        return true;
    }
    candidate.to_lowercase().contains(&typed.to_lowercase())
}

/// Matches against an optional word; no word means no filtering.
pub(crate) fn accepts(candidate: &str, word: Option<&str>) -> bool {
    word.is_none_or(|typed| matches(candidate, typed))
}
