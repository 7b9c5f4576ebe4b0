//! Value kinds shared across every layer.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Kind of a property type, determining which value slots carry its value.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyKind {
    /// Free text.
    String,
    /// Whole numbers.
    Int,
    /// True or false.
    Bool,
    /// Decimal numbers.
    Float,
    /// Calendar date, stored as text.
    Date,
    /// One of a list of options, stored as text.
    Enum,
    /// Numeric interval.
    Range,
    /// Email address, stored as text.
    Email,
    /// Latitude and longitude pair.
    GpsLocation,
    /// Local date and time, stored as text.
    DatetimeLocal,
    /// Reference to another catalog node, tagged with a [NodeType].
    Node,
}

impl PropertyKind {
    /// Whether values of this kind reference another node
    pub fn is_node(&self) -> bool {
        matches!(self, PropertyKind::Node)
    }

    /// The group of value slots owned by this kind
    pub fn slot_group(&self) -> SlotGroup {
        match self {
            PropertyKind::String
            | PropertyKind::Email
            | PropertyKind::Date
            | PropertyKind::DatetimeLocal
            | PropertyKind::Enum => SlotGroup::Text,
            PropertyKind::Int => SlotGroup::Int,
            PropertyKind::Float => SlotGroup::Float,
            PropertyKind::Bool => SlotGroup::Bool,
            PropertyKind::GpsLocation => SlotGroup::Coordinate,
            PropertyKind::Range => SlotGroup::Interval,
            PropertyKind::Node => SlotGroup::Node,
        }
    }
}

/// Type of node a [PropertyKind::Node] property references.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    Equipment,
    Location,
    Service,
    WorkOrder,
}

/// A set of value slots that together hold one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    /// `stringValue`
    Text,
    /// `intValue`
    Int,
    /// `floatValue`
    Float,
    /// `booleanValue`
    Bool,
    /// `latitudeValue` and `longitudeValue`
    Coordinate,
    /// `rangeFromValue` and `rangeToValue`
    Interval,
    /// `nodeValue`
    Node,
}
