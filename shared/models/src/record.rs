//! Raw record and tree models for the BOM viewer.
//!
//! This module defines the hierarchical input handed over by the record-fetch
//! service: loosely typed records keyed by field api name, wrapped in tree nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a record's identifier; its prefix decides the record variant.
pub const ID_FIELD: &str = "Id";

/// A record as returned by the host platform: field api name to scalar value,
/// or to a nested object for resolved relationships (e.g. a product lookup).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record holding only an identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut record = Self::new();
        record.insert(ID_FIELD, Value::String(id.into()));
        record
    }

    /// Builder-style insert, mostly used when assembling fixtures
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field; non-string values yield `None`
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Nested relationship object stored under `relationship`
    pub fn related(&self, relationship: &str) -> Option<&Map<String, Value>> {
        self.0.get(relationship).and_then(Value::as_object)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Checks whether any field holds a nested relationship object
    pub fn has_nested(&self) -> bool {
        self.0.values().any(Value::is_object)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Text rendering of a field value as the table widget displays it.
/// `null` reads as absent.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// One node of the BOM hierarchy as delivered by the record-fetch service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub obj: RawRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(obj: RawRecord) -> Self {
        Self {
            obj,
            parent_id: None,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.obj.id()
    }

    /// Children in input order; an absent sequence reads as empty
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}
