//! Per owner kind rules applied to a property type list.

use super::save_gate::ValidationError;
use models_property_types::{OwnerKind, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumString};

/// Rules that vary with the kind of entity owning the property types.
pub trait OwnerPolicy: Clone + Send + Sync + 'static {
    fn owner_kind(&self) -> OwnerKind;

    /// Name under which a definition must be unique among its visible siblings.
    /// Definitions without a key are not checked.
    fn uniqueness_key(&self, definition: &PropertyType) -> Option<String> {
        let name = definition.name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Checks on owner data edited next to the property types
    fn extra_validation(&self) -> Vec<ValidationError> {
        Vec::new()
    }
}

/// Reports the first name that appears more than once in `names`
pub fn duplicate_sibling<'a>(
    sibling: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Option<ValidationError> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .find(|name| !seen.insert(*name))
        .map(|name| ValidationError::DuplicateSiblingName {
            sibling,
            name: name.to_string(),
        })
}

/// Equipment types also carry position and port definitions whose names must be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentTypePolicy {
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub ports: Vec<String>,
}

impl OwnerPolicy for EquipmentTypePolicy {
    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::EquipmentType
    }

    fn extra_validation(&self) -> Vec<ValidationError> {
        [
            duplicate_sibling("position", self.positions.iter().map(String::as_str)),
            duplicate_sibling("port", self.ports.iter().map(String::as_str)),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Which of a port type's two property lists an editor works on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PortPropertyRole {
    /// Properties of the port itself
    #[default]
    Properties,
    /// Properties of links connected to the port
    LinkProperties,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortTypePolicy {
    pub role: PortPropertyRole,
}

impl OwnerPolicy for PortTypePolicy {
    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::EquipmentPortType
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTypePolicy;

impl OwnerPolicy for LocationTypePolicy {
    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::LocationType
    }
}
