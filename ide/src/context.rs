//! Cursor-context classification for style documents.
//!
//! Only the text on the cursor line up to the cursor is inspected. Four ordered patterns
//! decide the context; the first match wins:
//!
//! 1. property value: `color: re`, `font: { fontWeight: "b`
//! 2. property name:  `  backgr` (no colon yet)
//! 3. class or id:    `".tit`, `'#lbl`
//! 4. tag:            `"Win`

use std::sync::LazyLock;

use regex::Regex;

static PROPERTY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*:\s*[\w"'.]*$"#).expect("valid regex"));
static PROPERTY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\w*$").expect("valid regex"));
static CLASS_OR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"]([.#])\w*$"#).expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^['"]\w*$"#).expect("valid regex"));

/// Which selector attribute a `".`/`"#` prefix refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Class,
    Id,
}

impl SelectorKind {
    /// Markup attribute carrying selectors of this kind.
    pub fn attribute(self) -> &'static str {
        match self {
            SelectorKind::Class => "class",
            SelectorKind::Id => "id",
        }
    }
}

/// What the cursor is sitting in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextKind {
    PropertyValue { property: String },
    PropertyName,
    ClassOrId { selector: SelectorKind },
    Tag,
}

/// Classified context of one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    pub kind: ContextKind,
    pub line_prefix: String,
    /// Word touching the cursor, if any.
    pub word_prefix: Option<String>,
}

/// Classifies `line_prefix`, or returns `None` when the cursor is not completion-eligible.
pub fn classify(line_prefix: &str, word_prefix: Option<&str>) -> Option<CompletionContext> {
    let kind = classify_kind(line_prefix)?;
    Some(CompletionContext {
        kind,
        line_prefix: line_prefix.to_string(),
        word_prefix: word_prefix.map(str::to_string),
    })
}

fn classify_kind(line_prefix: &str) -> Option<ContextKind> {
    // The value pattern must run before the name pattern: both describe the start of a
    // property, the value pattern is the stricter one.
    if let Some(caps) = PROPERTY_VALUE.captures(line_prefix) {
        return Some(ContextKind::PropertyValue {
            property: caps[1].to_string(),
        });
    }
    if PROPERTY_NAME.is_match(line_prefix) {
        return Some(ContextKind::PropertyName);
    }
    if let Some(caps) = CLASS_OR_ID.captures(line_prefix) {
        let selector = if &caps[1] == "#" {
            SelectorKind::Id
        } else {
            SelectorKind::Class
        };
        return Some(ContextKind::ClassOrId { selector });
    }
    if TAG.is_match(line_prefix) {
        return Some(ContextKind::Tag);
    }
    None
}

/// Every top-level pattern that accepts `line_prefix`, in priority order.
#[cfg(test)]
pub(crate) fn matching_patterns(line_prefix: &str) -> Vec<&'static str> {
    [
        ("value", &*PROPERTY_VALUE),
        ("name", &*PROPERTY_NAME),
        ("selector", &*CLASS_OR_ID),
        ("tag", &*TAG),
    ]
    .into_iter()
    .filter(|(_, re)| re.is_match(line_prefix))
    .map(|(name, _)| name)
    .collect()
}
