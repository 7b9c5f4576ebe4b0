//! Catalog of the value kinds an operator can pick for a property type.

use crate::domain::ports::FeatureFlagProvider;
use models_property_types::{NodeType, PropertyKind};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Feature flags that gate selectable kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeatureFlag {
    /// Enables the `service` node type
    Services,
    /// Enables the `work_order` node type
    WorkOrderProperties,
}

/// Errors raised for invalid kind selections
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KindError {
    #[error("Node properties require a node type")]
    MissingNodeType,
    #[error("Property kind {0} cannot carry a node type")]
    UnexpectedNodeType(PropertyKind),
    #[error("Unknown property kind option: {0}")]
    UnknownOptionKey(String),
    #[error("Property kind option {0} is not available")]
    Unavailable(KindOption),
}

/// A selectable kind: a [PropertyKind] plus the [NodeType] when the kind is a node reference.
///
/// Construction goes through [KindOption::new] so a node kind always has a node type and no
/// other kind ever has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KindOption {
    kind: PropertyKind,
    node_type: Option<NodeType>,
}

impl KindOption {
    /// The option used when a new property type is added without an explicit choice
    pub const STRING: KindOption = KindOption {
        kind: PropertyKind::String,
        node_type: None,
    };

    pub fn new(kind: PropertyKind, node_type: Option<NodeType>) -> Result<Self, KindError> {
        match (kind.is_node(), node_type) {
            (true, None) => Err(KindError::MissingNodeType),
            (false, Some(_)) => Err(KindError::UnexpectedNodeType(kind)),
            _ => Ok(KindOption { kind, node_type }),
        }
    }

    /// A node reference option for `node_type`
    pub const fn node(node_type: NodeType) -> Self {
        KindOption {
            kind: PropertyKind::Node,
            node_type: Some(node_type),
        }
    }

    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub const fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }

    /// The option key: the node type name for node kinds, the kind name otherwise
    pub fn key(&self) -> &'static str {
        match self.node_type {
            Some(node_type) => node_type.into(),
            None => self.kind.into(),
        }
    }
}

impl fmt::Display for KindOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for KindOption {
    type Err = KindError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if let Ok(node_type) = NodeType::from_str(key) {
            return Ok(KindOption::node(node_type));
        }
        match PropertyKind::from_str(key) {
            Ok(PropertyKind::Node) | Err(_) => Err(KindError::UnknownOptionKey(key.to_string())),
            Ok(kind) => KindOption::new(kind, None),
        }
    }
}

impl TryFrom<String> for KindOption {
    type Error = KindError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

impl From<KindOption> for String {
    fn from(option: KindOption) -> Self {
        option.key().to_string()
    }
}

/// Option key for a kind and its node type
pub fn resolve_option_key(
    kind: PropertyKind,
    node_type: Option<NodeType>,
) -> Result<String, KindError> {
    KindOption::new(kind, node_type).map(String::from)
}

/// Inverse of [resolve_option_key]
pub fn parse_option_key(key: &str) -> Result<(PropertyKind, Option<NodeType>), KindError> {
    let option = KindOption::from_str(key)?;
    Ok((option.kind, option.node_type))
}

/// One row of the kind catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindDescriptor {
    pub option: KindOption,
    pub label: &'static str,
    #[serde(skip)]
    pub gate: Option<FeatureFlag>,
}

const fn scalar(kind: PropertyKind, label: &'static str) -> KindDescriptor {
    KindDescriptor {
        option: KindOption {
            kind,
            node_type: None,
        },
        label,
        gate: None,
    }
}

const fn node(node_type: NodeType, label: &'static str, gate: Option<FeatureFlag>) -> KindDescriptor {
    KindDescriptor {
        option: KindOption::node(node_type),
        label,
        gate,
    }
}

const CATALOG: [KindDescriptor; 14] = [
    scalar(PropertyKind::String, "Text"),
    scalar(PropertyKind::Int, "Number"),
    scalar(PropertyKind::Float, "Float"),
    scalar(PropertyKind::Bool, "True or False"),
    scalar(PropertyKind::Date, "Date"),
    scalar(PropertyKind::DatetimeLocal, "Date & Time"),
    scalar(PropertyKind::Email, "Email"),
    scalar(PropertyKind::GpsLocation, "Coordinates"),
    scalar(PropertyKind::Range, "Range"),
    scalar(PropertyKind::Enum, "Multiple choice"),
    node(NodeType::Equipment, "Equipment", None),
    node(NodeType::Location, "Location", None),
    node(NodeType::Service, "Service", Some(FeatureFlag::Services)),
    node(
        NodeType::WorkOrder,
        "Work Order",
        Some(FeatureFlag::WorkOrderProperties),
    ),
];

/// The kinds available to one edit session, with feature gates already evaluated.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    enabled: HashSet<FeatureFlag>,
}

impl KindRegistry {
    pub fn new<F: FeatureFlagProvider>(flags: &F) -> Self {
        let enabled = CATALOG
            .iter()
            .filter_map(|descriptor| descriptor.gate)
            .filter(|flag| flags.is_enabled(*flag))
            .collect();
        KindRegistry { enabled }
    }

    /// Available kinds in catalog order
    pub fn list_kinds(&self) -> Vec<KindDescriptor> {
        CATALOG
            .iter()
            .filter(|descriptor| self.gate_open(descriptor.gate))
            .copied()
            .collect()
    }

    pub fn is_available(&self, option: KindOption) -> bool {
        CATALOG
            .iter()
            .any(|descriptor| descriptor.option == option && self.gate_open(descriptor.gate))
    }

    /// Ok when the option is offered by this registry
    pub fn check(&self, option: KindOption) -> Result<(), KindError> {
        if self.is_available(option) {
            Ok(())
        } else {
            Err(KindError::Unavailable(option))
        }
    }

    /// Display label, also returned for gated options
    pub fn label(&self, option: KindOption) -> &'static str {
        CATALOG
            .iter()
            .find(|descriptor| descriptor.option == option)
            .map(|descriptor| descriptor.label)
            .unwrap_or_else(|| option.key())
    }

    fn gate_open(&self, gate: Option<FeatureFlag>) -> bool {
        gate.is_none_or(|flag| self.enabled.contains(&flag))
    }
}
