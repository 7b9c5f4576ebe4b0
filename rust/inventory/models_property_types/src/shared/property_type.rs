//! Property type (schema definition) model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{DefinitionId, NodeType, PropertyKind, ValueSlots};

fn default_true() -> bool {
    true
}

/// A named, typed slot in an owner's schema together with its type-level default value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    #[schema(value_type = String)]
    pub id: DefinitionId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    /// Position among the visible property types of the owner
    #[serde(default)]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Type-level default value
    #[serde(flatten)]
    pub slots: ValueSlots,
    #[serde(default = "default_true")]
    pub is_editable: bool,
    #[serde(default = "default_true")]
    pub is_instance_property: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub is_deleted: bool,
}

impl PropertyType {
    /// Create an empty property type of the given kind
    pub fn new(id: DefinitionId, kind: PropertyKind, node_type: Option<NodeType>) -> Self {
        Self {
            id,
            name: String::new(),
            kind,
            node_type,
            index: 0,
            category: None,
            external_id: None,
            slots: ValueSlots::default(),
            is_editable: true,
            is_instance_property: true,
            is_mandatory: false,
            is_deleted: false,
        }
    }
}
