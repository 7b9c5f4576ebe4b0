//! Type level default values.

use super::value_codec::{LogicalValue, get_value};
use models_property_types::{PropertyKind, PropertyType, SlotGroup, ValueSlots};

/// Whether `slots` carry a usable default for `kind`.
///
/// Booleans always have one (a missing value reads as false). Node references never do.
pub fn slots_have_default(kind: PropertyKind, slots: &ValueSlots) -> bool {
    match kind.slot_group() {
        SlotGroup::Bool => true,
        SlotGroup::Node => false,
        SlotGroup::Text => slots
            .string_value
            .as_deref()
            .is_some_and(|text| !text.is_empty()),
        _ => get_value(kind, slots).is_some(),
    }
}

pub fn has_default(definition: &PropertyType) -> bool {
    slots_have_default(definition.kind, &definition.slots)
}

/// The default shown for a definition, with a missing boolean read as false
pub fn default_value(definition: &PropertyType) -> Option<LogicalValue> {
    match get_value(definition.kind, &definition.slots) {
        None if definition.kind == PropertyKind::Bool => Some(LogicalValue::Bool(false)),
        value => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models_property_types::{DefinitionId, NodeType, NodeValue};

    fn definition(kind: PropertyKind, slots: ValueSlots) -> PropertyType {
        let node_type = kind.is_node().then_some(NodeType::Location);
        PropertyType {
            slots,
            ..PropertyType::new(DefinitionId::Temp(0), kind, node_type)
        }
    }

    #[test]
    fn it_requires_non_empty_text() {
        for kind in [
            PropertyKind::String,
            PropertyKind::Email,
            PropertyKind::Date,
            PropertyKind::DatetimeLocal,
            PropertyKind::Enum,
        ] {
            assert!(!has_default(&definition(kind, ValueSlots::default())));
            let empty = ValueSlots {
                string_value: Some(String::new()),
                ..Default::default()
            };
            assert!(!has_default(&definition(kind, empty)));
            let filled = ValueSlots {
                string_value: Some("x".into()),
                ..Default::default()
            };
            assert!(has_default(&definition(kind, filled)));
        }
    }

    #[test]
    fn it_accepts_zero_numbers() {
        let int = ValueSlots {
            int_value: Some(0),
            ..Default::default()
        };
        assert!(has_default(&definition(PropertyKind::Int, int)));
        assert!(!has_default(&definition(PropertyKind::Float, ValueSlots::default())));
    }

    #[test]
    fn it_always_has_a_bool_default() {
        let d = definition(PropertyKind::Bool, ValueSlots::default());
        assert!(has_default(&d));
        assert_eq!(default_value(&d), Some(LogicalValue::Bool(false)));
    }

    #[test]
    fn it_rejects_partial_coordinates() {
        let slots = ValueSlots {
            latitude_value: Some(40.0),
            longitude_value: None,
            ..Default::default()
        };
        assert!(!has_default(&definition(PropertyKind::GpsLocation, slots)));
    }

    #[test]
    fn it_never_defaults_node_kinds() {
        let slots = ValueSlots {
            node_value: Some(NodeValue {
                id: "loc-1".into(),
                name: "HQ".into(),
            }),
            ..Default::default()
        };
        assert!(!has_default(&definition(PropertyKind::Node, slots)));
    }
}
