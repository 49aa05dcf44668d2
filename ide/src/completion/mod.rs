//! Completion candidates for style documents.
//! Insert cursors are UTF-8 byte offsets into `insert_text`.

use serde::{Deserialize, Serialize};

mod items;
mod matchers;
mod rules;
mod selectors;

pub(crate) use items::{property_name_items, property_value_items, selector_items, tag_items};
pub use matchers::matches;
pub(crate) use matchers::accepts;
pub use rules::{I18nRule, ImageRule, Rule, RuleContext, RuleSet};
pub use selectors::extract_selectors;

/// Default for `CompletionConfig.object_types`.
pub const DEFAULT_OBJECT_TYPES: &[&str] = &["Font"];
/// Default for `CompletionConfig.indent`.
pub const DEFAULT_INDENT: &str = "\t";

/// Configuration knobs for the completion engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CompletionConfig {
    /// Property types whose values are structured blocks (`font: { ... }`).
    #[serde(default = "default_object_types")]
    pub object_types: Vec<String>,
    /// Indentation placed inside inserted blocks.
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_object_types() -> Vec<String> {
    DEFAULT_OBJECT_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            object_types: default_object_types(),
            indent: default_indent(),
        }
    }
}

impl CompletionConfig {
    pub(crate) fn is_object_type(&self, ty: &str) -> bool {
        self.object_types.iter().any(|t| t == ty)
    }
}

/// High-level bucket for UI grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidateKind {
    Tag,
    Property,
    Value,
    Selector,
    /// An i18n key.
    Text,
    /// A project asset path.
    File,
}

/// One completion candidate for an editor UI.
///
/// If `cursor` is set, it is the desired caret offset inside `insert_text` after the
/// insertion. Without `insert_text` the editor inserts `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub label: String,
    pub kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<u32>,
}

impl Candidate {
    pub fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            insert_text: None,
            cursor: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the inserted text with the caret at its end.
    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.cursor = Some(u32::try_from(text.len()).unwrap_or(u32::MAX));
        self.insert_text = Some(text);
        self
    }

    /// Sets the inserted text with the caret at byte offset `cursor`.
    pub fn with_template(mut self, text: impl Into<String>, cursor: usize) -> Self {
        let text = text.into();
        let cursor = cursor.min(text.len());
        self.cursor = Some(u32::try_from(cursor).unwrap_or(u32::MAX));
        self.insert_text = Some(text);
        self
    }

    /// Text to insert, falling back to the label.
    pub fn text(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }

    /// Insertion as snippet syntax, with `$0` at the caret.
    pub fn snippet(&self) -> String {
        let text = self.text();
        let cursor = self
            .cursor
            .and_then(|c| usize::try_from(c).ok())
            .filter(|&c| text.is_char_boundary(c))
            .unwrap_or(text.len());

        let mut out = String::with_capacity(text.len() + 2);
        escape_snippet(&text[..cursor], &mut out);
        out.push_str("$0");
        escape_snippet(&text[cursor..], &mut out);
        out
    }
}

fn escape_snippet(text: &str, out: &mut String) {
    for c in text.chars() {
        if matches!(c, '$' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// `<head>{\n<indent>\n}` with the caret on the indented line.
pub(crate) fn block_template(head: &str, config: &CompletionConfig) -> (String, usize) {
    let opened = format!("{head}{{\n{}", config.indent);
    let cursor = opened.len();
    (format!("{opened}\n}}"), cursor)
}
