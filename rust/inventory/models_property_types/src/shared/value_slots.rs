//! Flat value record shared by property types and property instances.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::SlotGroup;

/// Reference to a catalog node held by node-kind properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct NodeValue {
    pub id: String,
    pub name: String,
}

/// The typed storage slots of a property value.
///
/// Only the slots of the [SlotGroup] owned by the property's kind carry meaning; the
/// others are expected to be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_from_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_to_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_value: Option<NodeValue>,
}

impl ValueSlots {
    /// True when no slot holds a value
    pub fn is_empty(&self) -> bool {
        self.string_value.is_none()
            && self.int_value.is_none()
            && self.float_value.is_none()
            && self.boolean_value.is_none()
            && self.latitude_value.is_none()
            && self.longitude_value.is_none()
            && self.range_from_value.is_none()
            && self.range_to_value.is_none()
            && self.node_value.is_none()
    }

    /// Keep the slots of `group` and clear every other slot
    pub fn retain_group(self, group: SlotGroup) -> Self {
        let mut kept = ValueSlots::default();
        match group {
            SlotGroup::Text => kept.string_value = self.string_value,
            SlotGroup::Int => kept.int_value = self.int_value,
            SlotGroup::Float => kept.float_value = self.float_value,
            SlotGroup::Bool => kept.boolean_value = self.boolean_value,
            SlotGroup::Coordinate => {
                kept.latitude_value = self.latitude_value;
                kept.longitude_value = self.longitude_value;
            }
            SlotGroup::Interval => {
                kept.range_from_value = self.range_from_value;
                kept.range_to_value = self.range_to_value;
            }
            SlotGroup::Node => kept.node_value = self.node_value,
        }
        kept
    }

    /// True when a slot outside of `group` holds a value
    pub fn has_foreign_slots(&self, group: SlotGroup) -> bool {
        self.clone().retain_group(group) != *self
    }
}
