//! Link Resolver
//!
//! Attaches navigable URLs to a projected row: `_parent` for the tree
//! wrapper's parent id, `_target` for the row's primary record, and
//! `<field>._target` on the row for every relationship object carrying an id
//! or a name. All resolutions for one row run concurrently and the row is
//! only returned once every one of them succeeded.

use async_trait::async_trait;
use bomview_models::{configuration_fields, DisplayRow, Variant, ID_FIELD};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{BomViewError, BomViewResult};
use crate::validation::validate_record_id;

/// Fields whose value labels a relationship record's link
pub const NAME_KEYS: [&str; 2] = ["Name", "OrderItemNumber"];

/// Wrapper and bookkeeping keys never treated as relationship objects
const EXCLUDED_KEYS: [&str; 3] = ["children", "_children", "obj"];

/// Name attached to relationship objects that expose a name field
pub const NESTED_NAME_KEY: &str = "_name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAction {
    View,
    Edit,
}

impl PageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

/// Host navigation service turning a record id into a URL
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, record_id: &str, action: PageAction) -> BomViewResult<String>;
}

/// Builds standard record page URLs: `<base>/lightning/r/<id>/<action>`
#[derive(Debug, Clone, Default)]
pub struct RecordPageResolver {
    base_url: String,
}

impl RecordPageResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LinkResolver for RecordPageResolver {
    async fn resolve(&self, record_id: &str, action: PageAction) -> BomViewResult<String> {
        validate_record_id(record_id)
            .map_err(|e| BomViewError::link_resolution(record_id, e.to_string()))?;
        Ok(format!(
            "{}/lightning/r/{}/{}",
            self.base_url,
            record_id,
            action.as_str()
        ))
    }
}

/// Where a resolved URL is stored on the row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSlot {
    Parent,
    Target,
    /// `<field>._target` on the row itself, not on the nested object
    Related(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub slot: LinkSlot,
    pub record_id: String,
}

impl LinkRequest {
    fn new(slot: LinkSlot, record_id: impl Into<String>) -> Self {
        Self {
            slot,
            record_id: record_id.into(),
        }
    }
}

/// Identifier a row links to: the product for configuration lines, the
/// record itself otherwise
pub fn target_id(row: &DisplayRow) -> Option<&str> {
    let field = match row.obj_type {
        Variant::ConfigurationLine => configuration_fields::PRODUCT_ID,
        _ => ID_FIELD,
    };
    row.field(field).and_then(Value::as_str)
}

/// Collects the link resolutions a row needs and tags every relationship
/// object exposing a name field with `_name`.
///
/// A relationship record's id is its own `Id`, falling back to the row's
/// `<field>Id` (e.g. `Product2Id`). Relationship objects without any id are
/// left unlinked.
pub fn plan_links(row: &mut DisplayRow, parent_id: Option<&str>) -> Vec<LinkRequest> {
    let mut requests = Vec::new();

    if let Some(parent_id) = parent_id {
        requests.push(LinkRequest::new(LinkSlot::Parent, parent_id));
    }

    match target_id(row) {
        Some(target) => requests.push(LinkRequest::new(LinkSlot::Target, target)),
        None => debug!(obj_type = %row.obj_type, "Row has no target id, leaving _target unset"),
    }

    let mut names = Vec::new();
    for (key, value) in &row.fields {
        // dotted keys are flattened copies, not relationships of this record
        if EXCLUDED_KEYS.contains(&key.as_str()) || key.contains('.') {
            continue;
        }
        let Value::Object(inner) = value else {
            continue;
        };

        let name = inner
            .iter()
            .find(|(inner_key, _)| NAME_KEYS.contains(&inner_key.as_str()))
            .map(|(_, name)| name.clone());
        let own_id = inner.get(ID_FIELD).and_then(Value::as_str);
        let related_id = own_id.or_else(|| {
            row.fields
                .get(&format!("{}{}", key, ID_FIELD))
                .and_then(Value::as_str)
        });

        if own_id.is_some() || name.is_some() {
            if let Some(related_id) = related_id {
                requests.push(LinkRequest::new(
                    LinkSlot::Related(format!("{}._target", key)),
                    related_id,
                ));
            }
        }
        if let Some(name) = name {
            names.push((key.clone(), name));
        }
    }

    for (key, name) in names {
        if let Some(Value::Object(inner)) = row.fields.get_mut(&key) {
            inner.insert(NESTED_NAME_KEY.to_string(), name);
        }
    }

    requests
}

/// Resolves every planned link of `row` concurrently and stores the URLs.
/// All resolutions run to completion; the first failure in planning order is
/// returned.
pub async fn resolve_links(
    mut row: DisplayRow,
    parent_id: Option<&str>,
    resolver: &dyn LinkResolver,
) -> BomViewResult<DisplayRow> {
    let requests = plan_links(&mut row, parent_id);

    let urls = join_all(requests.iter().map(|request| async move {
        resolver
            .resolve(&request.record_id, PageAction::View)
            .await
            .map_err(|e| match e {
                e @ BomViewError::LinkResolution { .. } => e,
                other => BomViewError::link_resolution(&request.record_id, other.to_string()),
            })
    }))
    .await
    .into_iter()
    .collect::<BomViewResult<Vec<_>>>()?;

    for (request, url) in requests.into_iter().zip(urls) {
        match request.slot {
            LinkSlot::Parent => row.parent = Some(url),
            LinkSlot::Target => row.target = Some(url),
            LinkSlot::Related(key) => {
                row.fields.insert(key, Value::String(url));
            }
        }
    }

    Ok(row)
}
