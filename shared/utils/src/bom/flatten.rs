//! Flattener
//!
//! Copies nested relationship objects onto their owning record under dotted
//! keys (`Product2.Name`), so table columns can address related fields
//! directly. Flattening is purely structural: link resolution for the
//! relationship records is planned separately in `links`.

use bomview_models::{RawRecord, Variant};
use serde_json::{Map, Value};

/// Expands every nested object on `record` into `<key>.<innerKey>` fields,
/// recursing into nested objects of nested objects. The nested values stay in
/// place; flattening an already flattened record changes nothing.
pub fn flatten(record: &mut RawRecord) {
    let mut dotted = Vec::new();
    for (key, value) in record.fields() {
        if let Value::Object(inner) = value {
            collect_dotted(key, inner, &mut dotted);
        }
    }

    let fields = record.fields_mut();
    for (key, value) in dotted {
        fields.insert(key, value);
    }
}

fn collect_dotted(prefix: &str, inner: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in inner {
        let path = format!("{}.{}", prefix, key);
        if let Value::Object(nested) = value {
            collect_dotted(&path, nested, out);
        }
        out.push((path, value.clone()));
    }
}

/// Copies a configuration line's product record under the relationship name
/// the table's sales-line columns use, e.g. `Product__r` to `Product2`.
pub fn alias_product_relationship(record: &mut RawRecord, relationship: &str) {
    let source = Variant::ConfigurationLine.product_relationship();
    if relationship == source {
        return;
    }
    if let Some(product) = record.get(source).cloned() {
        record.insert(relationship, product);
    }
}

/// Flattened copy of a node's record, aliased first when it is a
/// configuration line and a column relationship is known.
pub fn flatten_for_variant(
    record: &RawRecord,
    variant: Variant,
    product_relationship: Option<&str>,
) -> RawRecord {
    let mut flat = record.clone();
    if let (Variant::ConfigurationLine, Some(relationship)) = (variant, product_relationship) {
        alias_product_relationship(&mut flat, relationship);
    }
    flatten(&mut flat);
    flat
}
