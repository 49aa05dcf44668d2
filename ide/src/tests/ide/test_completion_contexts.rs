use std::path::Path;
use std::sync::Arc;

use schema::SchemaStore;

use crate::tests::ide::completion_dsl::{FixtureProject, STYLE_PATH, schema, t};
use crate::{CandidateKind, CompletionConfig, CompletionEngine, CompletionRequest, Position};

// ----------------------------
// Tags
// ----------------------------

#[test]
fn completion_tag_after_opening_quote_lists_all_tags() {
    t("\"$0")
        .expect_labels(&["Window", "Label", "ImageView"])
        .expect_all_kind(CandidateKind::Tag)
        .expect_item("Window", |item| {
            assert_eq!(item.detail.as_deref(), Some("Ti.UI.Window"));
            assert_eq!(item.insert_text.as_deref(), Some("Window\": {\n\t\n}"));
            assert_eq!(item.cursor, Some(12));
        });
}

#[test]
fn completion_tag_prefix_filters_case_insensitively() {
    t("'vie$0").expect_labels(&["ImageView"]);
    t("\"WIN$0").expect_labels(&["Window"]);
}

#[test]
fn completion_tag_uses_whole_word_at_cursor() {
    // The word touching the cursor extends past it, as editors report it.
    t("\"Lab$0el").expect_labels(&["Label"]);
}

// ----------------------------
// Property names
// ----------------------------

#[test]
fn completion_property_name_on_blank_line_lists_top_level_properties() {
    t("\"Label\": {\n  $0\n}")
        .expect_labels(&["font", "width", "height", "color", "textAlign", "fontWeight"])
        .expect_all_kind(CandidateKind::Property);
}

#[test]
fn completion_property_name_object_types_insert_block() {
    t("  fo$0")
        .expect_labels(&["font", "fontWeight"])
        .expect_item("font", |item| {
            assert_eq!(item.insert_text.as_deref(), Some("font: {\n\t\n}"));
            assert_eq!(item.cursor, Some(9));
        })
        .expect_item("fontWeight", |item| {
            assert_eq!(item.insert_text.as_deref(), Some("fontWeight: "));
            assert_eq!(item.cursor, Some(12));
        });
}

#[test]
fn completion_property_name_inside_font_block_restricts_to_font_properties() {
    t("\"Label\": {\n  font: {\n    $0\n  }\n}")
        .expect_labels(&["fontSize", "fontFamily", "fontWeight"])
        .expect_not_contains_labels(&["width", "color", "font"]);
}

#[test]
fn completion_nested_properties_are_flat_leaves() {
    // `font` is object-typed at the top level, but nested children never open a block.
    let s = schema()
        .typed_prop("font", "Font")
        .ty("Font", &["font", "fontSize"])
        .build();
    t("font: {\n  $0")
        .schema(s)
        .expect_labels(&["font", "fontSize"])
        .expect_item("font", |item| {
            assert_eq!(item.insert_text.as_deref(), Some("font: "));
        });
}

#[test]
fn completion_nested_restriction_matches_schema_example() {
    let s = schema()
        .typed_prop("font", "Font")
        .prop("width")
        .ty("Font", &["fontSize", "fontFamily"])
        .build();
    t("font: {\n  $0")
        .schema(s)
        .expect_labels(&["fontSize", "fontFamily"]);
}

#[test]
fn completion_property_name_after_closed_inline_block_is_top_level() {
    t("font: { fontSize: 12 }\n$0")
        .expect_contains_labels(&["width", "color"])
        .expect_not_contains_labels(&["fontSize", "fontFamily"]);
}

#[test]
fn completion_property_name_with_unknown_parent_type_falls_back() {
    let s = schema()
        .typed_prop("shadow", "Shadow")
        .prop("width")
        .build();
    t("shadow: {\n  $0").schema(s).expect_labels(&["shadow", "width"]);
}

#[test]
fn completion_property_name_honors_config_indent() {
    let config = CompletionConfig {
        object_types: vec!["Font".to_string()],
        indent: "    ".to_string(),
    };
    t("fon$0")
        .config(config)
        .expect_item("font", |item| {
            assert_eq!(item.insert_text.as_deref(), Some("font: {\n    \n}"));
            assert_eq!(item.cursor, Some(12));
        });
}

// ----------------------------
// Property values
// ----------------------------

#[test]
fn completion_property_value_lists_enumerated_values() {
    t("  color: $0")
        .expect_labels(&["red", "green", "blue"])
        .expect_all_kind(CandidateKind::Value);
}

#[test]
fn completion_property_value_filters_by_substring() {
    t("color: r$0").expect_labels(&["red", "green"]);
    t("color: bl$0").expect_labels(&["blue"]);
    t("textAlign: Ti.UI.TEXT_ALIGNMENT_C$0").expect_labels(&["Ti.UI.TEXT_ALIGNMENT_CENTER"]);
}

#[test]
fn completion_property_value_inside_inline_block_uses_innermost_property() {
    t("font: { fontWeight: b$0").expect_labels(&["bold"]);
}

#[test]
fn completion_property_value_for_free_form_or_unknown_property_is_empty() {
    t("width: $0").expect_empty();
    t("unknownThing: $0").expect_empty();
}

// ----------------------------
// Class and id selectors
// ----------------------------

const MARKUP: &str = r#"<Alloy>
  <Window class="container" id="win">
    <Label class="title header" id="lbl1"/>
    <Label class="header" textid="greeting"/>
  </Window>
</Alloy>"#;

#[test]
fn completion_class_selectors_come_from_companion_markup() {
    t("\".$0")
        .companion(MARKUP)
        .expect_labels(&["container", "title", "header"])
        .expect_all_kind(CandidateKind::Selector)
        .expect_item("title", |item| {
            assert_eq!(item.detail.as_deref(), Some("index.xml"));
        });
}

#[test]
fn completion_class_selectors_for_single_label() {
    t("\".$0")
        .companion(r#"<Label class="title header" id="lbl1"/>"#)
        .expect_labels(&["title", "header"]);
}

#[test]
fn completion_id_selectors_come_from_companion_markup() {
    t("'#$0").companion(MARKUP).expect_labels(&["win", "lbl1"]);
    t("'#lb$0").companion(MARKUP).expect_labels(&["lbl1"]);
}

#[test]
fn completion_id_selectors_skip_prefixed_attributes() {
    t("'#$0")
        .companion(r#"<View data-id="notanid" id="real"/>"#)
        .expect_labels(&["real"]);
    t("\".$0")
        .companion(r#"<View ns:class="nope" class="box"/>"#)
        .expect_labels(&["box"]);
}

#[test]
fn completion_selectors_without_companion_are_empty() {
    t("\".$0").expect_empty();
    t("\".$0")
        .project(FixtureProject::default().with_missing_companion())
        .expect_empty();
}

// ----------------------------
// Not completion-eligible
// ----------------------------

#[test]
fn completion_outside_any_context_is_empty() {
    t("\"Label\": {$0").expect_empty();
    t("  color: \"red\",$0").expect_empty();
    t("// comment$0").expect_empty();
}

#[test]
fn completion_cursor_column_past_line_end_is_clamped() {
    let document = vec!["  color: ".to_string()];
    let store = Arc::new(SchemaStore::preloaded(schema().demo().build()));
    let engine = CompletionEngine::new(store, FixtureProject::default());
    let request = CompletionRequest::new(&document, Path::new(STYLE_PATH), Position::new(0, 99));
    let labels: Vec<_> = engine
        .complete(&request)
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(labels, ["red", "green", "blue"]);
}

#[test]
fn completion_cursor_line_past_document_end_is_empty() {
    let document = vec!["color: ".to_string()];
    let store = Arc::new(SchemaStore::preloaded(schema().demo().build()));
    let engine = CompletionEngine::new(store, FixtureProject::default());
    let request = CompletionRequest::new(&document, Path::new(STYLE_PATH), Position::new(3, 0));
    assert!(engine.complete(&request).unwrap().is_empty());
}
