//! Conversion between kind tagged values and the flat [ValueSlots] record.

use models_property_types::{NodeValue, PropertyKind, SlotGroup, ValueSlots};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value of any supported kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LogicalValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Coordinate { latitude: f64, longitude: f64 },
    Interval { from: f64, to: f64 },
    NodeRef { id: String, name: String },
}

impl LogicalValue {
    /// The slot group this value is written to
    pub fn slot_group(&self) -> SlotGroup {
        match self {
            LogicalValue::Text(_) => SlotGroup::Text,
            LogicalValue::Int(_) => SlotGroup::Int,
            LogicalValue::Float(_) => SlotGroup::Float,
            LogicalValue::Bool(_) => SlotGroup::Bool,
            LogicalValue::Coordinate { .. } => SlotGroup::Coordinate,
            LogicalValue::Interval { .. } => SlotGroup::Interval,
            LogicalValue::NodeRef { .. } => SlotGroup::Node,
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            LogicalValue::Float(v) => v.is_finite(),
            LogicalValue::Coordinate {
                latitude,
                longitude,
            } => latitude.is_finite() && longitude.is_finite(),
            LogicalValue::Interval { from, to } => from.is_finite() && to.is_finite(),
            _ => true,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueCodecError {
    #[error("A {kind} property cannot hold a {value:?} value")]
    KindMismatch {
        kind: PropertyKind,
        value: LogicalValue,
    },
    #[error("Numeric values must be finite")]
    NonFinite,
}

/// Read the value of `kind` out of `slots`.
///
/// Composite kinds only yield a value when every part is present.
pub fn get_value(kind: PropertyKind, slots: &ValueSlots) -> Option<LogicalValue> {
    match kind.slot_group() {
        SlotGroup::Text => slots.string_value.clone().map(LogicalValue::Text),
        SlotGroup::Int => slots.int_value.map(LogicalValue::Int),
        SlotGroup::Float => slots.float_value.map(LogicalValue::Float),
        SlotGroup::Bool => slots.boolean_value.map(LogicalValue::Bool),
        SlotGroup::Coordinate => match (slots.latitude_value, slots.longitude_value) {
            (Some(latitude), Some(longitude)) => Some(LogicalValue::Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        },
        SlotGroup::Interval => match (slots.range_from_value, slots.range_to_value) {
            (Some(from), Some(to)) => Some(LogicalValue::Interval { from, to }),
            _ => None,
        },
        SlotGroup::Node => slots.node_value.as_ref().map(|node| LogicalValue::NodeRef {
            id: node.id.clone(),
            name: node.name.clone(),
        }),
    }
}

/// Write `value` into the slots owned by `kind`.
///
/// Every slot outside the kind's group is cleared; `None` clears everything.
pub fn set_value(
    kind: PropertyKind,
    value: Option<LogicalValue>,
) -> Result<ValueSlots, ValueCodecError> {
    let mut slots = ValueSlots::default();
    let Some(value) = value else {
        return Ok(slots);
    };
    if value.slot_group() != kind.slot_group() {
        return Err(ValueCodecError::KindMismatch { kind, value });
    }
    if !value.is_finite() {
        return Err(ValueCodecError::NonFinite);
    }

    match value {
        LogicalValue::Text(text) => slots.string_value = Some(text),
        LogicalValue::Int(v) => slots.int_value = Some(v),
        LogicalValue::Float(v) => slots.float_value = Some(v),
        LogicalValue::Bool(v) => slots.boolean_value = Some(v),
        LogicalValue::Coordinate {
            latitude,
            longitude,
        } => {
            slots.latitude_value = Some(latitude);
            slots.longitude_value = Some(longitude);
        }
        LogicalValue::Interval { from, to } => {
            slots.range_from_value = Some(from);
            slots.range_to_value = Some(to);
        }
        LogicalValue::NodeRef { id, name } => slots.node_value = Some(NodeValue { id, name }),
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;

    fn sample(kind: PropertyKind) -> LogicalValue {
        match kind.slot_group() {
            SlotGroup::Text => LogicalValue::Text("Red".into()),
            SlotGroup::Int => LogicalValue::Int(-12),
            SlotGroup::Float => LogicalValue::Float(2.5),
            SlotGroup::Bool => LogicalValue::Bool(false),
            SlotGroup::Coordinate => LogicalValue::Coordinate {
                latitude: 40.0,
                longitude: -73.5,
            },
            SlotGroup::Interval => LogicalValue::Interval { from: 1.0, to: 9.0 },
            SlotGroup::Node => LogicalValue::NodeRef {
                id: "loc-1".into(),
                name: "HQ".into(),
            },
        }
    }

    #[test]
    fn it_round_trips_every_kind() {
        use strum::IntoEnumIterator;

        for kind in PropertyKind::iter() {
            let value = sample(kind);
            let slots = set_value(kind, Some(value.clone())).unwrap();
            assert_eq!(get_value(kind, &slots), Some(value));
            assert!(!slots.has_foreign_slots(kind.slot_group()));
        }
    }

    #[test]
    fn it_clears_all_slots_on_none() {
        let slots = set_value(PropertyKind::Range, None).unwrap();
        assert!(slots.is_empty());
        assert_eq!(get_value(PropertyKind::Range, &slots), None);
    }

    #[test]
    fn it_ignores_partial_composites() {
        let slots = ValueSlots {
            latitude_value: Some(40.0),
            ..Default::default()
        };
        assert_eq!(get_value(PropertyKind::GpsLocation, &slots), None);

        let slots = ValueSlots {
            range_to_value: Some(3.0),
            ..Default::default()
        };
        assert_eq!(get_value(PropertyKind::Range, &slots), None);
    }

    #[test]
    fn it_reads_only_the_owned_slot() {
        let slots = ValueSlots {
            string_value: Some("stale".into()),
            int_value: Some(3),
            ..Default::default()
        };
        assert_eq!(get_value(PropertyKind::Int, &slots), Some(LogicalValue::Int(3)));
        assert_eq!(get_value(PropertyKind::Bool, &slots), None);
    }

    #[test]
    fn it_rejects_mismatched_values() {
        assert_matches!(
            set_value(PropertyKind::Int, Some(LogicalValue::Text("1".into()))),
            Err(ValueCodecError::KindMismatch { kind: PropertyKind::Int, .. })
        );
        assert_matches!(
            set_value(PropertyKind::Float, Some(LogicalValue::Float(f64::NAN))),
            Err(ValueCodecError::NonFinite)
        );
    }

    #[test]
    fn it_shares_the_text_slot_across_text_kinds() {
        let slots = set_value(
            PropertyKind::Email,
            Some(LogicalValue::Text("ops@example.com".into())),
        )
        .unwrap();
        assert_eq!(
            get_value(PropertyKind::String, &slots),
            Some(LogicalValue::Text("ops@example.com".into()))
        );
    }
}
