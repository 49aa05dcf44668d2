use std::path::PathBuf;

/// Failure to produce a [`crate::Schema`].
///
/// Surfaced to the caller on the request that triggered the load; the store stays empty
/// so a later request retries.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema from {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schema JSON{}", location(.path))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema source failed: {0}")]
    Source(String),
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}
