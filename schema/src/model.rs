use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::SchemaError;

/// Known tags, properties and structured property types.
///
/// Maps keep the key order of the schema document, which is the order candidates are
/// offered in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub tags: IndexMap<String, TagInfo>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyInfo>,
    #[serde(default)]
    pub types: IndexMap<String, TypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagInfo {
    #[serde(default, alias = "apiName")]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Legal child properties of a structured (object-valued) type such as `Font`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub properties: Vec<String>,
}

/// On-disk shapes accepted by [`Schema::from_json_str`].
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Legacy {
        alloy: LegacyAlloy,
        titanium: LegacyTitanium,
    },
    Flat(Schema),
}

#[derive(Deserialize)]
struct LegacyAlloy {
    #[serde(default)]
    tags: IndexMap<String, TagInfo>,
}

#[derive(Deserialize)]
struct LegacyTitanium {
    #[serde(default)]
    properties: IndexMap<String, PropertyInfo>,
    #[serde(default)]
    types: IndexMap<String, TypeInfo>,
}

impl Schema {
    /// Parses either the flat `{tags, properties, types}` document or the
    /// `{alloy: {tags}, titanium: {properties, types}}` completions document.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let doc: SchemaDocument =
            serde_json::from_str(json).map_err(|source| SchemaError::Json { path: None, source })?;
        Ok(match doc {
            SchemaDocument::Legacy { alloy, titanium } => Schema {
                tags: alloy.tags,
                properties: titanium.properties,
                types: titanium.types,
            },
            SchemaDocument::Flat(schema) => schema,
        })
    }

    pub fn tag(&self, name: &str) -> Option<&TagInfo> {
        self.tags.get(name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.get(name)
    }

    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Declared type of `property`, if both the property and its `type` field exist.
    pub fn property_type(&self, property: &str) -> Option<&str> {
        self.property(property)?.ty.as_deref()
    }

    /// Child properties allowed inside a `parent: { ... }` block.
    ///
    /// Returns `None` unless `parent` is a known property whose type is known and declares
    /// at least one property.
    pub fn nested_properties(&self, parent: &str) -> Option<&[String]> {
        let ty = self.property_type(parent)?;
        let Some(info) = self.type_info(ty) else {
            tracing::debug!(parent, ty, "parent type missing from schema");
            return None;
        };
        if info.properties.is_empty() {
            return None;
        }
        Some(info.properties.as_slice())
    }
}
