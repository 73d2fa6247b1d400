//! Table column models.
//!
//! `RelatedListInfo` is what the host reports for the root object's line-item
//! related list; `ColumnSpec` is the column definition the tree-table consumes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// A column of the host's related-list layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayColumn {
    pub field_api_name: String,
    pub label: String,
}

impl DisplayColumn {
    pub fn new(field_api_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_api_name: field_api_name.into(),
            label: label.into(),
        }
    }
}

/// Related-list layout of the line items under a root record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RelatedListInfo {
    #[validate(length(min = 1, message = "Related list label is required"))]
    pub label: String,
    #[validate(length(min = 1, message = "At least one object api name is required"))]
    pub object_api_names: Vec<String>,
    #[serde(default)]
    pub display_columns: Vec<DisplayColumn>,
}

/// Column definition for the tree-table widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub field_name: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrap_text: bool,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub type_attributes: Value,
}
