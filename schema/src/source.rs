use std::fs;
use std::path::{Path, PathBuf};

use crate::{Schema, SchemaError};

/// Produces a [`Schema`] on demand.
///
/// Called at most once per successful [`crate::SchemaStore`] load.
pub trait SchemaSource: Send + Sync {
    fn load(&self) -> Result<Schema, SchemaError>;
}

/// A JSON schema document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for JsonFile {
    fn load(&self) -> Result<Schema, SchemaError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SchemaError::Io {
            path: self.path.clone(),
            source,
        })?;
        Schema::from_json_str(&text).map_err(|err| match err {
            SchemaError::Json { source, .. } => SchemaError::Json {
                path: Some(self.path.clone()),
                source,
            },
            other => other,
        })
    }
}

/// An in-memory schema, e.g. a test fixture.
impl SchemaSource for Schema {
    fn load(&self) -> Result<Schema, SchemaError> {
        Ok(self.clone())
    }
}

impl<F> SchemaSource for F
where
    F: Fn() -> Result<Schema, SchemaError> + Send + Sync,
{
    fn load(&self) -> Result<Schema, SchemaError> {
        self()
    }
}
