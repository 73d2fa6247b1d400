//! Type Registry
//!
//! Classifies BOM records by identifier key prefix and answers field metadata
//! lookups. Metadata is loaded once per session and only read afterwards, so a
//! registry can be shared freely across concurrent render tasks.

use bomview_models::{ObjectInfo, ObjectMetadata, RawRecord, Variant, TEXT_DATA_TYPE};

use crate::error::{BomViewError, BomViewResult};
use crate::validation::validate_model;

#[derive(Debug, Clone)]
pub struct TypeRegistry {
    metadata: ObjectMetadata,
}

impl TypeRegistry {
    /// Builds a registry, rejecting entries without a usable key prefix
    pub fn new(metadata: ObjectMetadata) -> BomViewResult<Self> {
        for info in metadata.objects() {
            validate_model(info)?;
        }
        Ok(Self { metadata })
    }

    pub fn metadata(&self) -> &ObjectMetadata {
        &self.metadata
    }

    /// Variant of a record, decided by its identifier prefix alone.
    ///
    /// Entries are tried in load order and the first prefix match wins; a match
    /// on an object type that is not a BOM variant yields `None`.
    pub fn classify(&self, record: &RawRecord) -> Option<Variant> {
        self.classify_id(record.id()?)
    }

    pub fn classify_id(&self, record_id: &str) -> Option<Variant> {
        self.metadata
            .objects()
            .iter()
            .find(|info| record_id.starts_with(info.key_prefix.as_str()))
            .and_then(ObjectInfo::variant)
    }

    pub fn object_info(&self, variant: Variant) -> BomViewResult<&ObjectInfo> {
        self.metadata
            .get(variant.api_name())
            .ok_or_else(|| BomViewError::metadata_unavailable(variant.api_name()))
    }

    /// Data type tag of `field_path` on `variant`.
    ///
    /// `Field` is looked up directly. For `Rel.Field`, `Rel.Name` is always
    /// text; otherwise the type of the lookup field whose relationship name is
    /// `Rel` is returned. Deeper paths have no type.
    pub fn field_data_type(&self, field_path: &str, variant: Variant) -> BomViewResult<Option<String>> {
        let info = self.object_info(variant)?;
        let segments: Vec<&str> = field_path.split('.').collect();

        let data_type = match segments.as_slice() {
            [field] => info.field(field).map(|f| f.data_type.clone()),
            [_, "Name"] => Some(TEXT_DATA_TYPE.to_string()),
            [relationship, _] => info
                .field_by_relationship(relationship)
                .map(|f| f.data_type.clone()),
            _ => None,
        };

        Ok(data_type)
    }

    /// Relationship name under which `variant` nests its product record.
    /// Fails when the variant's metadata was never loaded.
    pub fn product_relationship(&self, variant: Variant) -> BomViewResult<&'static str> {
        self.object_info(variant)?;
        Ok(variant.product_relationship())
    }
}
