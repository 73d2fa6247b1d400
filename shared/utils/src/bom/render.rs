//! BOM rendering entry point.
//!
//! Classifies, projects and link-resolves a raw tree into display rows.
//! Children of a node are rendered before the node's own links are resolved,
//! siblings render concurrently, and results are collected by position so the
//! output keeps input order no matter which resolution finishes first. A
//! failing sibling never cuts the others short: every sibling runs to
//! completion and the first error in input order is returned.

use bomview_models::{DisplayRow, ObjectMetadata, TreeNode, Variant};
use futures::future::{join_all, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::links::{resolve_links, LinkResolver};
use super::projector::{display_name, project};
use super::registry::TypeRegistry;
use super::summary::count_nodes;
use crate::error::{BomViewError, BomViewResult};

/// What happens to a node whose identifier matches no known key prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnclassifiedPolicy {
    /// Omit the node and its subtree; siblings keep their relative order
    #[default]
    Drop,
    /// Fail the render pass with `UnclassifiedRecord`
    Reject,
}

pub struct BomRenderer {
    registry: Arc<TypeRegistry>,
    resolver: Arc<dyn LinkResolver>,
    product_relationship: Option<&'static str>,
    unclassified: UnclassifiedPolicy,
}

impl BomRenderer {
    pub fn new(registry: Arc<TypeRegistry>, resolver: Arc<dyn LinkResolver>) -> Self {
        Self {
            registry,
            resolver,
            product_relationship: None,
            unclassified: UnclassifiedPolicy::default(),
        }
    }

    /// Sets the line variant whose columns the table shows; configuration
    /// lines then expose their product under that variant's relationship.
    pub fn with_column_variant(mut self, variant: Variant) -> BomViewResult<Self> {
        self.product_relationship = Some(self.registry.product_relationship(variant)?);
        Ok(self)
    }

    pub fn with_unclassified_policy(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified = policy;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Renders the whole tree; any failure fails the pass
    #[instrument(name = "bom_render", skip_all, fields(nodes = count_nodes(tree)))]
    pub async fn render(&self, tree: &[TreeNode]) -> BomViewResult<Vec<DisplayRow>> {
        let rows = self.render_level(tree, "").await?;
        info!(
            rows = rows.iter().map(DisplayRow::subtree_len).sum::<usize>(),
            "BOM render pass complete"
        );
        Ok(rows)
    }

    fn render_level<'a>(
        &'a self,
        nodes: &'a [TreeNode],
        parent_name: &'a str,
    ) -> BoxFuture<'a, BomViewResult<Vec<DisplayRow>>> {
        async move {
            let rendered = join_all(nodes.iter().map(|node| self.render_node(node, parent_name)))
                .await
                .into_iter()
                .collect::<BomViewResult<Vec<_>>>()?;
            Ok(rendered.into_iter().flatten().collect())
        }
        .boxed()
    }

    async fn render_node(&self, node: &TreeNode, parent_name: &str) -> BomViewResult<Option<DisplayRow>> {
        let Some(variant) = self.registry.classify(&node.obj) else {
            return self.unclassified(node).map(|()| None);
        };
        debug!(record_id = node.id().unwrap_or_default(), %variant, "Projecting node");

        let children = if node.has_children() {
            let name = display_name(&node.obj, variant).unwrap_or_default();
            Some(self.render_level(node.children(), &name).await?)
        } else {
            None
        };

        let mut row = project(node, parent_name, variant, self.product_relationship)?;
        row.children = children;

        let row = resolve_links(row, node.parent_id.as_deref(), self.resolver.as_ref()).await?;
        Ok(Some(row))
    }

    fn unclassified(&self, node: &TreeNode) -> BomViewResult<()> {
        let record_id = node.id().unwrap_or_default();
        match self.unclassified {
            UnclassifiedPolicy::Drop => {
                warn!(record_id, "Dropping record with unknown key prefix");
                Ok(())
            }
            UnclassifiedPolicy::Reject => Err(BomViewError::unclassified_record(record_id)),
        }
    }
}

/// One-shot render with default settings
pub async fn render(
    tree: &[TreeNode],
    metadata: ObjectMetadata,
    resolver: Arc<dyn LinkResolver>,
) -> BomViewResult<Vec<DisplayRow>> {
    let registry = Arc::new(TypeRegistry::new(metadata)?);
    BomRenderer::new(registry, resolver).render(tree).await
}
