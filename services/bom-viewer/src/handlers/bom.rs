//! BOM rendering handlers
//!
//! The host posts the tree it fetched together with the object metadata of
//! its line objects; rows come back with links resolved against the
//! configured record page origin.

use axum::{extract::State, response::Json};
use bomview_models::{ObjectMetadata, RelatedListInfo, TreeNode, Variant, DisplayRow};
use bomview_utils::{layout_for, summarize, BomRenderer, ColumnLayout, TreeSummary, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub tree: Vec<TreeNode>,
    pub metadata: ObjectMetadata,
    #[serde(default)]
    pub column_variant: Option<Variant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub rows: Vec<DisplayRow>,
    pub record_count: usize,
    pub expanded_rows: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub tree: Vec<TreeNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsRequest {
    #[serde(default)]
    pub related_list: Option<RelatedListInfo>,
    #[serde(default)]
    pub metadata: ObjectMetadata,
}

/// Render a raw BOM tree into display rows
///
/// POST /api/v1/bom/render
pub async fn render_bom(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> ApiResult<Json<RenderResponse>> {
    let registry = Arc::new(TypeRegistry::new(request.metadata)?);
    let mut renderer = BomRenderer::new(registry, state.resolver.clone())
        .with_unclassified_policy(state.config.render.unclassified);
    if let Some(variant) = request.column_variant {
        renderer = renderer.with_column_variant(variant)?;
    }

    let rows = renderer.render(&request.tree).await?;
    let summary = summarize(&request.tree);
    info!(records = summary.record_count, "Rendered BOM tree");

    Ok(Json(RenderResponse {
        rows,
        record_count: summary.record_count,
        expanded_rows: summary.expanded_rows,
    }))
}

/// Count nodes and pick the initially expanded rows
///
/// POST /api/v1/bom/summary
pub async fn summarize_bom(Json(request): Json<SummaryRequest>) -> Json<TreeSummary> {
    Json(summarize(&request.tree))
}

/// Derive tree-table columns from the related-list layout
///
/// POST /api/v1/bom/columns
pub async fn bom_columns(Json(request): Json<ColumnsRequest>) -> ApiResult<Json<ColumnLayout>> {
    let registry = TypeRegistry::new(request.metadata)?;
    let layout = layout_for(request.related_list.as_ref(), &registry)?;
    Ok(Json(layout))
}
