//! Static dictionary of tags, properties and property types for Alloy style sheets.
//!
//! The schema is an external artifact: it is loaded once per [`SchemaStore`] and never
//! mutated afterwards. Lookups return `Option` so callers decide how to degrade when
//! an entry is missing.

mod error;
mod model;
mod source;
mod store;

pub use error::SchemaError;
pub use model::{PropertyInfo, Schema, TagInfo, TypeInfo};
pub use source::{JsonFile, SchemaSource};
pub use store::SchemaStore;
