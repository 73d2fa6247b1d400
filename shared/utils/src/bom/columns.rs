//! Column derivation
//!
//! Turns the root object's related-list layout into tree-table columns. Name
//! fields become links over the resolved `_target` URLs, everything else is
//! typed from object metadata.

use bomview_models::{ColumnSpec, RelatedListInfo, Variant};
use serde::Serialize;
use serde_json::{json, Value};

use super::links::NAME_KEYS;
use super::registry::TypeRegistry;
use crate::error::BomViewResult;
use crate::validation::validate_model;

pub const DEFAULT_TITLE: &str = "BOM Viewer";

/// Columns plus everything derived alongside them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    /// Field api names to request from the record-fetch service
    pub fields: Vec<String>,
    /// Sales-line variant the columns were built for
    pub column_variant: Option<Variant>,
}

fn column(field_name: &str, label: &str, column_type: &str, type_attributes: Value) -> ColumnSpec {
    ColumnSpec {
        field_name: field_name.to_string(),
        label: label.to_string(),
        column_type: Some(column_type.to_string()),
        wrap_text: false,
        type_attributes,
    }
}

fn labelled_by(field_name: &str) -> Value {
    json!({ "label": { "fieldName": field_name } })
}

/// Trailing row-action column offering `Edit`
pub fn action_column() -> ColumnSpec {
    column(
        "",
        "",
        "action",
        json!({
            "rowActions": [{ "label": "Edit", "name": "edit_record" }],
            "menuAlignment": "right"
        }),
    )
}

/// Layout shown before the related-list layout is known
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        column("_target", "Name", "url", labelled_by("_name")),
        column("_parent", "Parent", "url", labelled_by("_parentName")),
        column("_quantity", "Quantity", "TextArea", labelled_by("_quantity")),
        column("_listPrice", "List Price", "currency", labelled_by("_listPrice")),
        column("_discount", "Discount", "percentage", labelled_by("_discount")),
        column("_totalPrice", "Total Price", "currency", labelled_by("_totalPrice")),
        action_column(),
    ]
}

pub fn header_title(related_list: Option<&RelatedListInfo>) -> String {
    match related_list {
        Some(info) => format!("{} - {}", DEFAULT_TITLE, info.label),
        None => DEFAULT_TITLE.to_string(),
    }
}

/// Column showing `field_api_name` of the line object.
///
/// Name fields link to the row (`_target`), `Rel.Name` fields link to the
/// relationship record (`Rel._target`); both are labelled by the original
/// field. Other fields take the metadata type, lower-cased.
pub fn derive_column(
    field_api_name: &str,
    label: &str,
    variant: Option<Variant>,
    registry: &TypeRegistry,
) -> BomViewResult<ColumnSpec> {
    let is_name = NAME_KEYS.contains(&field_api_name);
    let relationship_name = field_api_name.strip_suffix(".Name");

    let spec = if is_name || relationship_name.is_some() {
        let field_name = match relationship_name {
            Some(relationship) if !is_name => format!("{}._target", relationship),
            _ => "_target".to_string(),
        };
        ColumnSpec {
            field_name,
            label: label.to_string(),
            column_type: Some("url".to_string()),
            wrap_text: true,
            type_attributes: labelled_by(field_api_name),
        }
    } else {
        let column_type = match variant {
            Some(variant) => registry
                .field_data_type(field_api_name, variant)?
                .map(|t| t.to_lowercase()),
            None => None,
        };
        ColumnSpec {
            field_name: field_api_name.to_string(),
            label: label.to_string(),
            column_type,
            wrap_text: true,
            type_attributes: json!({ "minimumFractionDigits": "2" }),
        }
    };

    Ok(spec)
}

/// Full layout for a related list, or the default layout without one
pub fn layout_for(
    related_list: Option<&RelatedListInfo>,
    registry: &TypeRegistry,
) -> BomViewResult<ColumnLayout> {
    let Some(info) = related_list else {
        return Ok(ColumnLayout {
            title: header_title(None),
            columns: default_columns(),
            fields: Vec::new(),
            column_variant: None,
        });
    };
    validate_model(info)?;

    let variant = info
        .object_api_names
        .first()
        .and_then(|api_name| Variant::from_api_name(api_name));

    let mut columns = info
        .display_columns
        .iter()
        .map(|col| derive_column(&col.field_api_name, &col.label, variant, registry))
        .collect::<BomViewResult<Vec<_>>>()?;
    columns.push(action_column());

    Ok(ColumnLayout {
        title: header_title(Some(info)),
        columns,
        fields: info
            .display_columns
            .iter()
            .map(|col| col.field_api_name.clone())
            .collect(),
        column_variant: variant.filter(|v| v.is_sales_line()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::fixtures::metadata;
    use bomview_models::DisplayColumn;

    fn registry() -> TypeRegistry {
        TypeRegistry::new(metadata()).unwrap()
    }

    fn opportunity_list() -> RelatedListInfo {
        RelatedListInfo {
            label: "Products".to_string(),
            object_api_names: vec!["OpportunityLineItem".to_string()],
            display_columns: vec![
                DisplayColumn::new("Name", "Line"),
                DisplayColumn::new("Product2.Name", "Product"),
                DisplayColumn::new("Quantity", "Quantity"),
                DisplayColumn::new("ListPrice", "List Price"),
            ],
        }
    }

    #[test]
    fn test_layout_from_related_list() {
        let layout = layout_for(Some(&opportunity_list()), &registry()).unwrap();

        assert_eq!(layout.title, "BOM Viewer - Products");
        assert_eq!(layout.fields, vec!["Name", "Product2.Name", "Quantity", "ListPrice"]);
        assert_eq!(layout.column_variant, Some(Variant::OpportunityLine));
        assert_eq!(layout.columns.len(), 5);

        let name = &layout.columns[0];
        assert_eq!(name.field_name, "_target");
        assert_eq!(name.column_type.as_deref(), Some("url"));
        assert_eq!(name.type_attributes, json!({"label": {"fieldName": "Name"}}));

        let product = &layout.columns[1];
        assert_eq!(product.field_name, "Product2._target");
        assert_eq!(product.type_attributes, json!({"label": {"fieldName": "Product2.Name"}}));

        let quantity = &layout.columns[2];
        assert_eq!(quantity.field_name, "Quantity");
        assert_eq!(quantity.column_type.as_deref(), Some("double"));
        assert!(quantity.wrap_text);
        assert_eq!(quantity.type_attributes, json!({"minimumFractionDigits": "2"}));

        assert_eq!(layout.columns[3].column_type.as_deref(), Some("currency"));
        assert_eq!(layout.columns[4].column_type.as_deref(), Some("action"));
    }

    #[test]
    fn test_default_layout() {
        let layout = layout_for(None, &registry()).unwrap();

        assert_eq!(layout.title, "BOM Viewer");
        assert!(layout.fields.is_empty());
        assert_eq!(layout.column_variant, None);
        let field_names: Vec<_> = layout.columns.iter().map(|c| c.field_name.as_str()).collect();
        assert_eq!(
            field_names,
            vec!["_target", "_parent", "_quantity", "_listPrice", "_discount", "_totalPrice", ""]
        );
    }

    #[test]
    fn test_unknown_object_leaves_columns_untyped() {
        let info = RelatedListInfo {
            label: "Lines".to_string(),
            object_api_names: vec!["Custom_Line__c".to_string()],
            display_columns: vec![DisplayColumn::new("Amount__c", "Amount")],
        };

        let layout = layout_for(Some(&info), &registry()).unwrap();

        assert_eq!(layout.columns[0].column_type, None);
        assert_eq!(layout.column_variant, None);
    }

    #[test]
    fn test_missing_metadata_for_known_object_fails() {
        let registry = TypeRegistry::new(bomview_models::ObjectMetadata::default()).unwrap();

        let err = layout_for(Some(&opportunity_list()), &registry).unwrap_err();

        assert_eq!(err.error_code(), "METADATA_UNAVAILABLE");
    }

    #[test]
    fn test_related_list_requires_object_name() {
        let mut info = opportunity_list();
        info.object_api_names.clear();

        assert!(layout_for(Some(&info), &registry()).is_err());
    }
}
