//! API layer request types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::{NodeType, PropertyKind, PropertyType, ValueSlots};

// ===== Property Type Mutations =====

/// One property type row of a mutation payload.
///
/// A missing `id` asks the gateway to create the row. Rows with `isDeleted` set are
/// removed by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTypeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(flatten)]
    pub slots: ValueSlots,
    pub is_editable: bool,
    pub is_instance_property: bool,
    pub is_mandatory: bool,
    pub is_deleted: bool,
}

/// Everything the gateway needs to persist the property types of one owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistPayload {
    /// Missing when the owner itself has not been created yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub owner_name: String,
    pub property_types: Vec<PropertyTypeInput>,
}

// ===== Property Instance Values =====

/// A concrete value of one property type on one entity instance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "propertyTypeID")]
    pub property_type_id: String,
    #[serde(rename = "entityID")]
    pub entity_id: String,
    #[serde(flatten)]
    pub slots: ValueSlots,
}

// ===== Conversions =====

impl From<&PropertyType> for PropertyTypeInput {
    fn from(definition: &PropertyType) -> Self {
        Self {
            id: definition.id.persisted_id().map(str::to_string),
            name: definition.name.clone(),
            kind: definition.kind,
            node_type: definition.node_type,
            index: definition.index,
            category: definition.category.clone(),
            external_id: definition.external_id.clone(),
            slots: definition.slots.clone(),
            is_editable: definition.is_editable,
            is_instance_property: definition.is_instance_property,
            is_mandatory: definition.is_mandatory,
            is_deleted: definition.is_deleted,
        }
    }
}
