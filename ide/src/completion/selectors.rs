//! Class and id names declared in companion markup.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::SelectorKind;

// The attribute name must follow whitespace: `textid=`, `data-id=` and `ns:class=` are
// other attributes.
static CLASS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)class="(.*?)""#).expect("valid regex"));
static ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)id="(.*?)""#).expect("valid regex"));

/// Distinct selector tokens of `kind` in `markup`, in order of first appearance.
///
/// Attribute values are split on whitespace, so `class="a b"` yields `a` and `b`.
/// One linear pass over the text.
pub fn extract_selectors(markup: &str, kind: SelectorKind) -> Vec<String> {
    let re = match kind {
        SelectorKind::Class => &*CLASS_ATTR,
        SelectorKind::Id => &*ID_ATTR,
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in re.captures_iter(markup).filter_map(|caps| caps.get(1)) {
        for token in value.as_str().split_whitespace() {
            if seen.insert(token) {
                out.push(token.to_string());
            }
        }
    }
    out
}
