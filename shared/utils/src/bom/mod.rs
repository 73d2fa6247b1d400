//! BOM tree rendering
//!
//! Turns the raw hierarchy of sales and configuration line records returned
//! by the record-fetch service into display rows for a tree table.
//!
//! - `registry`: key-prefix classification and field metadata
//! - `flatten`: dotted-key copies of relationship objects
//! - `projector`: per-variant display columns
//! - `links`: URL attachment through the host navigation service
//! - `render`: recursive, order-preserving render pass
//! - `summary`: node count and initially expanded rows
//! - `columns` / `view`: table layout and the full load sequence

pub mod registry;
pub mod flatten;
pub mod projector;
pub mod links;
pub mod render;
pub mod summary;
pub mod columns;
pub mod view;

#[cfg(test)]
mod fixtures;

pub use registry::TypeRegistry;
pub use flatten::{flatten, flatten_for_variant};
pub use projector::{display_name, extended_description, project};
pub use links::{LinkRequest, LinkResolver, LinkSlot, PageAction, RecordPageResolver};
pub use render::{render, BomRenderer, UnclassifiedPolicy};
pub use summary::{count_nodes, initial_expanded_ids, summarize, TreeSummary};
pub use columns::{layout_for, ColumnLayout};
pub use view::{BomSource, BomView, BomViewer, ItemFilter};
