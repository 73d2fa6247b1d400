//! Object metadata models.
//!
//! Mirrors what the host's object-info service reports per object type: the
//! identifier key prefix and a field map with data types and lookup names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::variant::Variant;

/// Data type tag reported for relationship name fields (`Rel.Name`)
pub const TEXT_DATA_TYPE: &str = "text";

/// Metadata of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
}

impl FieldInfo {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            relationship_name: None,
        }
    }

    /// Lookup field exposing its target under `relationship_name`
    pub fn lookup(data_type: impl Into<String>, relationship_name: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            relationship_name: Some(relationship_name.into()),
        }
    }
}

/// Metadata of one object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    #[validate(length(min = 1, message = "Object api name is required"))]
    pub api_name: String,
    #[validate(length(equal = 3, message = "Key prefix must be exactly 3 characters"))]
    pub key_prefix: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldInfo>,
}

impl ObjectInfo {
    pub fn new(api_name: impl Into<String>, key_prefix: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            key_prefix: key_prefix.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn for_variant(variant: Variant, key_prefix: impl Into<String>) -> Self {
        Self::new(variant.api_name(), key_prefix)
    }

    pub fn with_field(mut self, name: impl Into<String>, info: FieldInfo) -> Self {
        self.fields.insert(name.into(), info);
        self
    }

    /// The variant this object type stands for, if it is one of ours
    pub fn variant(&self) -> Option<Variant> {
        Variant::from_api_name(&self.api_name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.get(name)
    }

    /// First field declaring `relationship` as its relationship name
    pub fn field_by_relationship(&self, relationship: &str) -> Option<&FieldInfo> {
        self.fields
            .values()
            .find(|f| f.relationship_name.as_deref() == Some(relationship))
    }
}

/// All object metadata known to a session, in the order it was loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectMetadata {
    objects: Vec<ObjectInfo>,
}

impl ObjectMetadata {
    pub fn new(objects: Vec<ObjectInfo>) -> Self {
        Self { objects }
    }

    pub fn with(mut self, info: ObjectInfo) -> Self {
        self.objects.push(info);
        self
    }

    pub fn objects(&self) -> &[ObjectInfo] {
        &self.objects
    }

    pub fn get(&self, api_name: &str) -> Option<&ObjectInfo> {
        self.objects.iter().find(|o| o.api_name == api_name)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
