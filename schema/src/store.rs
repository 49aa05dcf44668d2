use once_cell::sync::OnceCell;

use crate::{Schema, SchemaError, SchemaSource};

/// Lazily loaded, process-wide schema.
///
/// Lifecycle: empty until the first [`SchemaStore::get`], then immutable for the lifetime
/// of the store. Concurrent first callers wait on the single in-flight load. A failed load
/// leaves the store empty, so the next call retries. There is no invalidation; build a new
/// store to pick up a changed schema.
pub struct SchemaStore {
    source: Box<dyn SchemaSource>,
    schema: OnceCell<Schema>,
}

impl SchemaStore {
    pub fn new(source: impl SchemaSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            schema: OnceCell::new(),
        }
    }

    /// A store that is already loaded with `schema`.
    pub fn preloaded(schema: Schema) -> Self {
        Self {
            source: Box::new(Schema::default()),
            schema: OnceCell::with_value(schema),
        }
    }

    pub fn get(&self) -> Result<&Schema, SchemaError> {
        self.schema.get_or_try_init(|| {
            let schema = self.source.load()?;
            tracing::info!(
                tags = schema.tags.len(),
                properties = schema.properties.len(),
                types = schema.types.len(),
                "schema loaded"
            );
            Ok(schema)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.schema.get().is_some()
    }
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
