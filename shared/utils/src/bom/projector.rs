//! Variant Projector
//!
//! Derives the uniform display columns of a row from its classified record.
//! Every variant has exactly one projection rule; adding a variant forces a
//! new arm in each match below.

use bomview_models::{
    configuration_fields, value_text, DisplayRow, RawRecord, TreeNode, Variant, SALES_BOM_TYPE,
};
use serde_json::{Map, Value};

use super::flatten::flatten_for_variant;
use crate::error::{BomViewError, BomViewResult};

/// Source fields of the four amount columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountFields {
    pub quantity: &'static str,
    pub list_price: &'static str,
    pub discount: &'static str,
    pub total_price: &'static str,
}

const OPPORTUNITY_AMOUNTS: AmountFields = AmountFields {
    quantity: "Quantity",
    list_price: "ListPrice",
    discount: "Discount",
    total_price: "TotalPrice",
};

const SALES_AGREEMENT_AMOUNTS: AmountFields = AmountFields {
    quantity: "TotalPlannedQuantity",
    list_price: "ListPrice",
    discount: "DiscountPercentage",
    total_price: "TotalPlannedAmount",
};

/// Amount columns a variant fills; quote and order lines leave them empty
pub fn amount_fields(variant: Variant) -> Option<AmountFields> {
    match variant {
        Variant::OpportunityLine => Some(OPPORTUNITY_AMOUNTS),
        Variant::SalesAgreementLine => Some(SALES_AGREEMENT_AMOUNTS),
        Variant::ConfigurationLine | Variant::QuoteLine | Variant::OrderLine => None,
    }
}

/// Display name of a record: the unique id of a configuration line, else
/// `Name` falling back to the related product's `Name`.
pub fn display_name(record: &RawRecord, variant: Variant) -> Option<String> {
    match variant {
        Variant::ConfigurationLine => record
            .get(configuration_fields::UNIQUE_ID)
            .and_then(value_text),
        Variant::QuoteLine
        | Variant::OrderLine
        | Variant::OpportunityLine
        | Variant::SalesAgreementLine => record.get("Name").and_then(value_text).or_else(|| {
            record
                .related(variant.product_relationship())
                .and_then(|product| product.get("Name"))
                .and_then(value_text)
        }),
    }
}

/// `key: value` lines of a configuration line's extended information, in
/// payload order. An absent or empty payload yields an empty description;
/// anything that is not a serialized JSON object is an error.
pub fn extended_description(record: &RawRecord) -> BomViewResult<String> {
    let record_id = record.id().unwrap_or_default();
    let payload = match record.get(configuration_fields::EXTENDED_INFORMATION) {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(Value::String(payload)) if payload.is_empty() => return Ok(String::new()),
        Some(Value::String(payload)) => payload,
        Some(other) => {
            return Err(BomViewError::malformed_extended_information(
                record_id,
                format!("expected a serialized mapping, found {}", other),
            ))
        }
    };

    let entries: Map<String, Value> = serde_json::from_str(payload)
        .map_err(|e| BomViewError::malformed_extended_information(record_id, e.to_string()))?;

    let lines: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{}: {}", key, description_value(value)))
        .collect();
    Ok(lines.join("\n"))
}

fn description_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Projects one classified node into its display row, without children and
/// without links.
pub fn project(
    node: &TreeNode,
    parent_name: &str,
    variant: Variant,
    product_relationship: Option<&str>,
) -> BomViewResult<DisplayRow> {
    let record = &node.obj;
    let flat = flatten_for_variant(record, variant, product_relationship);

    let mut row = DisplayRow::new(variant, flat.into_fields());
    row.name = display_name(record, variant);
    row.parent_name = parent_name.to_string();

    match variant {
        Variant::ConfigurationLine => {
            let description = extended_description(record)?;
            row.bom_type = record
                .get(configuration_fields::BOM_TYPE)
                .and_then(value_text)
                .unwrap_or_default();
            row.fields.insert(
                configuration_fields::REVENUE_IMPACT.to_string(),
                Value::String(description.clone()),
            );
            row.fields.insert(
                configuration_fields::DESCRIPTION.to_string(),
                Value::String(description.clone()),
            );
            row.quantity = Some(Value::String(description));
        }
        Variant::QuoteLine | Variant::OrderLine => {
            row.bom_type = SALES_BOM_TYPE.to_string();
        }
        Variant::OpportunityLine | Variant::SalesAgreementLine => {
            row.bom_type = SALES_BOM_TYPE.to_string();
            if let Some(amounts) = amount_fields(variant) {
                row.quantity = record.get(amounts.quantity).cloned();
                row.list_price = record.get(amounts.list_price).cloned();
                row.discount = record.get(amounts.discount).cloned();
                row.total_price = record.get(amounts.total_price).cloned();
            }
        }
    }

    Ok(row)
}
