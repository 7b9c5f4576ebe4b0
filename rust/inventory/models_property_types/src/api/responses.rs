//! API layer response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::PropertyType;

/// An owner and its stored property types, as returned after a persist or a fetch.
///
/// Every property type carries a real id; deleted rows are no longer present.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPropertyTypes {
    pub owner_id: String,
    pub owner_name: String,
    pub property_types: Vec<PropertyType>,
}
