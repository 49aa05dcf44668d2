//! IDE helpers for Alloy style (`.tss`) documents.
//!
//! Coordinates are zero-based lines and UTF-8 byte columns.

mod completion;
mod context;
mod document;
mod parent;
mod project;

use std::path::Path;
use std::sync::Arc;

use schema::{Schema, SchemaError, SchemaStore};

pub use completion::{
    Candidate, CandidateKind, CompletionConfig, DEFAULT_INDENT, DEFAULT_OBJECT_TYPES, I18nRule,
    ImageRule, Rule, RuleContext, RuleSet, extract_selectors, matches,
};
pub use context::{CompletionContext, ContextKind, SelectorKind, classify};
pub use document::{DocumentView, Position, TextDocument};
pub use parent::resolve_parent;
pub use project::{AlloyProject, DEFAULT_LOCALE, ProjectLookup};

/// One completion request: a document snapshot, its path, and the cursor.
#[derive(Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub document: &'a dyn DocumentView,
    /// Identity of the style document, handed to the [`ProjectLookup`].
    pub path: &'a Path,
    pub position: Position,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(document: &'a dyn DocumentView, path: &'a Path, position: Position) -> Self {
        Self {
            document,
            path,
            position,
        }
    }
}

/// Context-aware completion over a shared schema.
///
/// Stateless across requests apart from the schema store, so one engine can serve
/// concurrent requests.
pub struct CompletionEngine {
    schema: Arc<SchemaStore>,
    project: Arc<dyn ProjectLookup>,
    rules: RuleSet,
    config: CompletionConfig,
}

impl CompletionEngine {
    /// Engine with the built-in rules and default configuration.
    pub fn new(schema: Arc<SchemaStore>, project: impl ProjectLookup + 'static) -> Self {
        Self {
            schema,
            project: Arc::new(project),
            rules: RuleSet::default(),
            config: CompletionConfig::default(),
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Candidates at the request cursor.
    ///
    /// Only a schema load failure is an error; every other failure yields no candidates.
    pub fn complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<Vec<Candidate>, SchemaError> {
        let schema = self.schema.get()?;
        Ok(CompletionSession {
            engine: self,
            schema,
            request,
        }
        .run())
    }
}

impl std::fmt::Debug for CompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionEngine")
            .field("schema", &self.schema)
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

struct CompletionSession<'a> {
    engine: &'a CompletionEngine,
    schema: &'a Schema,
    request: &'a CompletionRequest<'a>,
}

impl CompletionSession<'_> {
    fn run(self) -> Vec<Candidate> {
        let Ok(line) = usize::try_from(self.request.position.line) else {
            return Vec::new();
        };
        let Some(text) = self.request.document.line_text(line) else {
            tracing::debug!(line, "cursor line outside document");
            return Vec::new();
        };
        let line_prefix = document::line_prefix(text, self.request.position.column);
        let word_prefix = document::word_at(text, line_prefix.len());

        // 1) Specialized rules get the first chance to answer.
        if let Some(items) = self.complete_with_rule(line_prefix, word_prefix) {
            return items;
        }

        // 2) Classify the cursor context.
        let Some(ctx) = context::classify(line_prefix, word_prefix) else {
            tracing::trace!(line_prefix, "no completion context");
            return Vec::new();
        };
        tracing::debug!(kind = ?ctx.kind, word = ?ctx.word_prefix, "completion context");

        // 3) Generate candidates for the context.
        let items = self.complete_for_context(&ctx, line);
        tracing::trace!(count = items.len(), "completion candidates");
        items
    }

    fn complete_with_rule(
        &self,
        line_prefix: &str,
        word_prefix: Option<&str>,
    ) -> Option<Vec<Candidate>> {
        let rule = self.engine.rules.find(line_prefix)?;
        let cx = RuleContext {
            line_prefix,
            word_prefix,
            style_path: self.request.path,
            project: self.engine.project.as_ref(),
            schema: self.schema,
            config: &self.engine.config,
        };
        let items = rule.complete(&cx);
        if items.is_none() {
            tracing::debug!(rule = rule.name(), "rule declined");
        }
        items
    }

    fn complete_for_context(&self, ctx: &CompletionContext, line: usize) -> Vec<Candidate> {
        let word = ctx.word_prefix.as_deref();
        let config = &self.engine.config;
        match &ctx.kind {
            ContextKind::PropertyValue { property } => {
                completion::property_value_items(self.schema, property, word)
            }
            ContextKind::PropertyName => {
                let parent = resolve_parent(self.request.document, line);
                tracing::debug!(parent = ?parent, "resolved parent block");
                completion::property_name_items(self.schema, parent.as_deref(), word, config)
            }
            ContextKind::ClassOrId { selector } => completion::selector_items(
                self.engine.project.as_ref(),
                self.request.path,
                *selector,
                word,
            ),
            ContextKind::Tag => completion::tag_items(self.schema, word, config),
        }
    }
}
