//! Enclosing-block lookup for nested property completion.
//!
//! The scan is a single-line heuristic, not a brace-balanced parse. It walks lines upward
//! from the cursor and stops at the first line that either opens a `name: {` block or
//! contains a `}` closing past the opening. Only reliable for one level of nesting:
//!
//! ```text
//! font: {          <- parent of the cursor below
//!   fontSize: 12,
//!   |
//! ```
//!
//! ```text
//! font: { fontSize: 12 }
//! |                <- no parent, the block closed on its own line
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::document::DocumentView;

static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\S+)\s*:\s*\{").expect("valid regex"));

/// Name of the nearest `name: {` block still open at `line`, if any.
///
/// The returned name is taken verbatim from the document, so a selector block such as
/// `"Window": {` yields `"Window"` with its quotes.
pub fn resolve_parent(document: &dyn DocumentView, line: usize) -> Option<String> {
    let last = document.line_count().checked_sub(1)?;
    for n in (0..=line.min(last)).rev() {
        let Some(text) = document.line_text(n) else {
            continue;
        };
        let open = BLOCK_OPEN.captures(text).and_then(|caps| caps.get(1));
        if let Some(close) = text.rfind('}') {
            // A line with no opening counts as opening before column 0.
            let closes_after_open = open.is_none_or(|name| name.start() < close);
            if closes_after_open {
                tracing::debug!(line = n, "scan stopped at closed block");
                return None;
            }
        }
        if let Some(name) = open {
            return Some(name.as_str().to_string());
        }
    }
    None
}
