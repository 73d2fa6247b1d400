//! BOM view assembly.
//!
//! Fetches the tree for a root record through the host's record-fetch
//! service and produces everything the table needs in one pass: columns,
//! title, rendered rows, record count and initially expanded rows.

use async_trait::async_trait;
use bomview_models::{ColumnSpec, DisplayRow, RelatedListInfo, RootRecord, TreeNode};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use super::columns::layout_for;
use super::links::LinkResolver;
use super::registry::TypeRegistry;
use super::render::{BomRenderer, UnclassifiedPolicy};
use super::summary::summarize;
use crate::error::BomViewResult;

/// Sales lines only, or manufacturing items as well
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFilter {
    sales_only: bool,
}

impl ItemFilter {
    pub fn sales_only() -> Self {
        Self { sales_only: true }
    }

    pub fn from_include_mfg_items(include: bool) -> Self {
        Self { sales_only: !include }
    }

    pub fn is_sales_only(self) -> bool {
        self.sales_only
    }

    pub fn include_mfg_items(self) -> bool {
        !self.sales_only
    }
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self::sales_only()
    }
}

/// Host service returning the raw BOM tree under a root record
#[async_trait]
pub trait BomSource: Send + Sync {
    async fn fetch_tree(
        &self,
        root: &RootRecord,
        fields: &[String],
        sales_only: bool,
    ) -> BomViewResult<Vec<TreeNode>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomView {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<DisplayRow>,
    pub record_count: usize,
    pub expanded_rows: Vec<String>,
}

pub struct BomViewer {
    registry: Arc<TypeRegistry>,
    resolver: Arc<dyn LinkResolver>,
    unclassified: UnclassifiedPolicy,
}

impl BomViewer {
    pub fn new(registry: Arc<TypeRegistry>, resolver: Arc<dyn LinkResolver>) -> Self {
        Self {
            registry,
            resolver,
            unclassified: UnclassifiedPolicy::default(),
        }
    }

    pub fn with_unclassified_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified = policy;
        self
    }

    pub async fn load(
        &self,
        source: &dyn BomSource,
        root: &RootRecord,
        related_list: Option<&RelatedListInfo>,
        filter: ItemFilter,
    ) -> BomViewResult<BomView> {
        let layout = layout_for(related_list, &self.registry)?;
        let tree = source
            .fetch_tree(root, &layout.fields, filter.is_sales_only())
            .await?;
        let summary = summarize(&tree);

        let rows = if tree.is_empty() {
            Vec::new()
        } else {
            let mut renderer = BomRenderer::new(self.registry.clone(), self.resolver.clone())
                .with_unclassified_policy(self.unclassified);
            if let Some(variant) = layout.column_variant {
                renderer = renderer.with_column_variant(variant)?;
            }
            renderer.render(&tree).await?
        };

        info!(
            root = %root.id,
            object = root.object.api_name(),
            records = summary.record_count,
            sales_only = filter.is_sales_only(),
            "BOM view loaded"
        );

        Ok(BomView {
            title: layout.title,
            columns: layout.columns,
            rows,
            record_count: summary.record_count,
            expanded_rows: summary.expanded_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::fixtures::{id, metadata, node, ScriptedResolver};
    use bomview_models::{DisplayColumn, RawRecord, RootObject};
    use std::sync::Mutex;

    /// Serves a fixed tree and records each request
    struct StaticSource {
        tree: Vec<TreeNode>,
        requests: Mutex<Vec<(String, Vec<String>, bool)>>,
    }

    impl StaticSource {
        fn new(tree: Vec<TreeNode>) -> Self {
            Self {
                tree,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BomSource for StaticSource {
        async fn fetch_tree(
            &self,
            root: &RootRecord,
            fields: &[String],
            sales_only: bool,
        ) -> BomViewResult<Vec<TreeNode>> {
            self.requests
                .lock()
                .unwrap()
                .push((root.id.clone(), fields.to_vec(), sales_only));
            let tree = if sales_only {
                self.tree
                    .iter()
                    .map(|n| TreeNode { children: None, ..n.clone() })
                    .collect()
            } else {
                self.tree.clone()
            };
            Ok(tree)
        }
    }

    fn viewer() -> BomViewer {
        BomViewer::new(
            Arc::new(TypeRegistry::new(metadata()).unwrap()),
            Arc::new(ScriptedResolver::new()),
        )
    }

    fn opportunity_tree() -> Vec<TreeNode> {
        vec![node(
            RawRecord::with_id(id("00k", 1)).field("Name", "Pump").field("Quantity", 2),
            vec![node(
                RawRecord::with_id(id("a1C", 2))
                    .field("LGK__UniqueId__c", "CFG-2")
                    .field("Product__c", id("01t", 5))
                    .field("Product__r", serde_json::json!({"Id": id("01t", 5), "Name": "Impeller"})),
                vec![],
            )],
        )]
    }

    #[tokio::test]
    async fn test_load_with_manufacturing_items() {
        let source = StaticSource::new(opportunity_tree());
        let related = RelatedListInfo {
            label: "Opportunity Products".to_string(),
            object_api_names: vec!["OpportunityLineItem".to_string()],
            display_columns: vec![
                DisplayColumn::new("Name", "Line"),
                DisplayColumn::new("Product2.Name", "Product"),
            ],
        };
        let root = RootRecord::new(RootObject::Opportunity, id("006", 1));

        let view = viewer()
            .load(&source, &root, Some(&related), ItemFilter::from_include_mfg_items(true))
            .await
            .unwrap();

        assert_eq!(view.title, "BOM Viewer - Opportunity Products");
        assert_eq!(view.record_count, 2);
        assert_eq!(view.expanded_rows, vec![id("00k", 1), id("a1C", 2)]);
        assert_eq!(view.rows.len(), 1);
        let config_row = &view.rows[0].children()[0];
        assert_eq!(config_row.parent_name, "Pump");
        assert_eq!(
            config_row.field("Product2.Name"),
            Some(&serde_json::json!("Impeller"))
        );

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests[0].1, vec!["Name", "Product2.Name"]);
        assert!(!requests[0].2);
    }

    #[tokio::test]
    async fn test_load_sales_only_default_layout() {
        let source = StaticSource::new(opportunity_tree());
        let root = RootRecord::new(RootObject::Opportunity, id("006", 1));

        let view = viewer()
            .load(&source, &root, None, ItemFilter::default())
            .await
            .unwrap();

        assert_eq!(view.title, "BOM Viewer");
        assert_eq!(view.record_count, 1);
        assert_eq!(view.expanded_rows, vec![id("00k", 1)]);
        assert!(view.rows[0].children.is_none());
        assert!(source.requests.lock().unwrap()[0].2);
    }

    #[tokio::test]
    async fn test_load_empty_tree() {
        let source = StaticSource::new(Vec::new());
        let root = RootRecord::new(RootObject::Quote, id("a0y", 1));

        let view = viewer()
            .load(&source, &root, None, ItemFilter::default())
            .await
            .unwrap();

        assert!(view.rows.is_empty());
        assert_eq!(view.record_count, 0);
        assert!(view.expanded_rows.is_empty());
    }

    #[test]
    fn test_item_filter() {
        assert!(ItemFilter::default().is_sales_only());
        assert!(ItemFilter::from_include_mfg_items(true).include_mfg_items());
        assert!(!ItemFilter::from_include_mfg_items(false).include_mfg_items());
    }
}
