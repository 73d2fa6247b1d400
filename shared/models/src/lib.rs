//! # BOM Viewer Domain Models
//!
//! This crate contains the data model shared by the BOM rendering engine and
//! the viewer service. All models serialize with the field names the host
//! platform and the tree-table widget use.
//!
//! ## Key Models
//!
//! - **TreeNode / RawRecord**: the hierarchical line-item tree as fetched from the host
//! - **Variant**: the five line-item kinds a node can represent
//! - **ObjectMetadata**: per-object key prefix and field metadata used for classification
//! - **DisplayRow**: the flattened, normalized row handed to the table
//! - **ColumnSpec / RelatedListInfo**: table column definitions and their source layout

pub mod record;
pub mod variant;
pub mod metadata;
pub mod row;
pub mod column;

pub use record::*;
pub use variant::*;
pub use metadata::*;
pub use row::*;
pub use column::*;
