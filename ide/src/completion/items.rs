//! Builds the candidate list for a classified context.
//! Every list is filtered through the matcher against the word at the cursor.

use std::path::Path;

use schema::Schema;

use crate::completion::{
    Candidate, CandidateKind, CompletionConfig, accepts, block_template, extract_selectors,
};
use crate::context::SelectorKind;
use crate::project::ProjectLookup;

/// Tag names. The opening quote is already typed, so the insertion closes it and opens
/// the selector block.
pub(crate) fn tag_items(
    schema: &Schema,
    word: Option<&str>,
    config: &CompletionConfig,
) -> Vec<Candidate> {
    schema
        .tags
        .iter()
        .filter(|(name, _)| accepts(name, word))
        .map(|(name, info)| {
            let (text, cursor) = block_template(&format!("{name}\": "), config);
            let item = Candidate::new(name.clone(), CandidateKind::Tag).with_template(text, cursor);
            if info.display_name.is_empty() {
                item
            } else {
                item.with_detail(info.display_name.clone())
            }
        })
        .collect()
}

/// Property names, restricted to the parent type's children inside a structured block.
///
/// Nested children are offered as flat properties: only one level of nesting is modeled.
pub(crate) fn property_name_items(
    schema: &Schema,
    parent: Option<&str>,
    word: Option<&str>,
    config: &CompletionConfig,
) -> Vec<Candidate> {
    if let Some(nested) = parent.and_then(|parent| schema.nested_properties(parent)) {
        return nested
            .iter()
            .filter(|name| accepts(name, word))
            .map(|name| flat_property(name))
            .collect();
    }

    if let Some(parent) = parent {
        tracing::debug!(parent, "parent has no nested properties, offering all");
    }

    schema
        .properties
        .iter()
        .filter(|(name, _)| accepts(name, word))
        .map(|(name, info)| match info.ty.as_deref() {
            Some(ty) if config.is_object_type(ty) => {
                let (text, cursor) = block_template(&format!("{name}: "), config);
                Candidate::new(name.clone(), CandidateKind::Property).with_template(text, cursor)
            }
            _ => flat_property(name),
        })
        .collect()
}

fn flat_property(name: &str) -> Candidate {
    Candidate::new(name, CandidateKind::Property).with_insert_text(format!("{name}: "))
}

/// Enumerated values of `property`; nothing when the property or its values are unknown.
pub(crate) fn property_value_items(
    schema: &Schema,
    property: &str,
    word: Option<&str>,
) -> Vec<Candidate> {
    let Some(info) = schema.property(property) else {
        tracing::debug!(property, "unknown property");
        return Vec::new();
    };
    let Some(values) = info.values.as_deref() else {
        return Vec::new();
    };
    values
        .iter()
        .filter(|value| accepts(value, word))
        .map(|value| Candidate::new(value.clone(), CandidateKind::Value))
        .collect()
}

/// Class or id selectors declared in the companion markup of `style_path`.
///
/// A missing or unreadable companion yields no candidates.
pub(crate) fn selector_items(
    project: &dyn ProjectLookup,
    style_path: &Path,
    kind: SelectorKind,
    word: Option<&str>,
) -> Vec<Candidate> {
    let Some(markup_path) = project.companion_markup(style_path) else {
        tracing::debug!(style = %style_path.display(), "no companion markup");
        return Vec::new();
    };
    let markup = match project.read_text(&markup_path) {
        Ok(markup) => markup,
        Err(err) => {
            tracing::debug!(path = %markup_path.display(), %err, "companion markup unreadable");
            return Vec::new();
        }
    };
    let file_name = markup_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    extract_selectors(&markup, kind)
        .into_iter()
        .filter(|token| accepts(token, word))
        .map(|token| Candidate::new(token, CandidateKind::Selector).with_detail(file_name.clone()))
        .collect()
}
