//! Shared test fixtures: metadata for all five variants, record ids and a
//! scripted link resolver with per-id latency and failures.

use async_trait::async_trait;
use bomview_models::{FieldInfo, ObjectInfo, ObjectMetadata, RawRecord, TreeNode, Variant};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use super::links::{LinkResolver, PageAction};
use crate::error::{BomViewError, BomViewResult};

/// 15-character record id with the given key prefix
pub fn id(prefix: &str, n: u32) -> String {
    format!("{}{:012}", prefix, n)
}

pub fn metadata() -> ObjectMetadata {
    ObjectMetadata::default()
        .with(
            ObjectInfo::for_variant(Variant::ConfigurationLine, "a1C")
                .with_field("LGK__UniqueId__c", FieldInfo::new("String"))
                .with_field("Product__c", FieldInfo::lookup("Reference", "Product__r")),
        )
        .with(
            ObjectInfo::for_variant(Variant::QuoteLine, "a0x")
                .with_field("SBQQ__Quantity__c", FieldInfo::new("Double"))
                .with_field("SBQQ__Product__c", FieldInfo::lookup("Reference", "SBQQ__Product__r")),
        )
        .with(
            ObjectInfo::for_variant(Variant::OrderLine, "802")
                .with_field("Quantity", FieldInfo::new("Double"))
                .with_field("UnitPrice", FieldInfo::new("Currency"))
                .with_field("Product2Id", FieldInfo::lookup("Reference", "Product2")),
        )
        .with(
            ObjectInfo::for_variant(Variant::OpportunityLine, "00k")
                .with_field("Quantity", FieldInfo::new("Double"))
                .with_field("ListPrice", FieldInfo::new("Currency"))
                .with_field("Discount", FieldInfo::new("Percent"))
                .with_field("TotalPrice", FieldInfo::new("Currency"))
                .with_field("Product2Id", FieldInfo::lookup("Reference", "Product2")),
        )
        .with(
            ObjectInfo::for_variant(Variant::SalesAgreementLine, "0YB")
                .with_field("TotalPlannedQuantity", FieldInfo::new("Double"))
                .with_field("ProductId", FieldInfo::lookup("Reference", "Product")),
        )
}

pub fn node(record: RawRecord, children: Vec<TreeNode>) -> TreeNode {
    let node = TreeNode::leaf(record);
    if children.is_empty() {
        node
    } else {
        node.with_children(children)
    }
}

/// Resolves `/r/<id>/<action>` after an optional per-id delay
#[derive(Default)]
pub struct ScriptedResolver {
    delays: HashMap<String, u64>,
    failures: HashSet<String>,
    resolved: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, record_id: impl Into<String>, millis: u64) -> Self {
        self.delays.insert(record_id.into(), millis);
        self
    }

    pub fn failing_on(mut self, record_id: impl Into<String>) -> Self {
        self.failures.insert(record_id.into());
        self
    }

    /// Ids in the order their resolution completed
    pub fn completion_order(&self) -> Vec<String> {
        self.resolved.lock().unwrap().clone()
    }
}

pub fn url(record_id: &str) -> String {
    format!("/r/{}/view", record_id)
}

#[async_trait]
impl LinkResolver for ScriptedResolver {
    async fn resolve(&self, record_id: &str, action: PageAction) -> BomViewResult<String> {
        if let Some(millis) = self.delays.get(record_id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        if self.failures.contains(record_id) {
            return Err(BomViewError::link_resolution(record_id, "navigation service unavailable"));
        }
        self.resolved.lock().unwrap().push(record_id.to_string());
        Ok(format!("/r/{}/{}", record_id, action.as_str()))
    }
}
