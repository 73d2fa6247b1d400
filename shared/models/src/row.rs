//! Display row model handed to the tree-table widget.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::ID_FIELD;
use crate::variant::Variant;

/// `_bomType` of every sales line
pub const SALES_BOM_TYPE: &str = "SALES";

/// A projected, flattened and link-resolved BOM row.
///
/// The underscore-prefixed members are the uniform columns every variant
/// fills; `fields` carries the source record including its dotted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    #[serde(rename = "_target", default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(rename = "_name", default)]
    pub name: Option<String>,
    #[serde(rename = "_parent", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(rename = "_parentName", default)]
    pub parent_name: String,
    #[serde(rename = "_quantity", default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
    #[serde(rename = "_listPrice", default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Value>,
    #[serde(rename = "_discount", default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Value>,
    #[serde(rename = "_totalPrice", default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Value>,
    #[serde(rename = "_objType")]
    pub obj_type: Variant,
    #[serde(rename = "_bomType", default)]
    pub bom_type: String,
    #[serde(rename = "_children", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DisplayRow>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DisplayRow {
    pub fn new(obj_type: Variant, fields: Map<String, Value>) -> Self {
        Self {
            target: None,
            name: None,
            parent: None,
            parent_name: String::new(),
            quantity: None,
            list_price: None,
            discount: None,
            total_price: None,
            obj_type,
            bom_type: String::new(),
            children: None,
            fields,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.field(ID_FIELD).and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn children(&self) -> &[DisplayRow] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of rows in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(DisplayRow::subtree_len).sum::<usize>()
    }
}
