//! Per instance values of instance property types.

use super::value_codec::{LogicalValue, ValueCodecError, set_value};
use models_property_types::{DefinitionId, PropertyType, api::PropertyInput};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstanceValueError {
    #[error("Property type {0} is not an instance property")]
    NotInstanceProperty(DefinitionId),
    #[error("Property type {0} has not been saved yet")]
    NotPersisted(DefinitionId),
    #[error("Property type {0} was deleted")]
    Deleted(DefinitionId),
    #[error("Property '{0}' is mandatory")]
    MissingMandatory(String),
    #[error(transparent)]
    Value(#[from] ValueCodecError),
}

/// Build the value of `definition` on entity `entity_id`
pub fn instance_value(
    definition: &PropertyType,
    entity_id: &str,
    value: Option<LogicalValue>,
) -> Result<PropertyInput, InstanceValueError> {
    if definition.is_mandatory && value.is_none() {
        return Err(InstanceValueError::MissingMandatory(definition.name.clone()));
    }
    let property_type_id = instance_target(definition)?;
    Ok(PropertyInput {
        id: None,
        property_type_id,
        entity_id: entity_id.to_string(),
        slots: set_value(definition.kind, value)?,
    })
}

/// The value a new entity starts with: the type level default of `definition`
pub fn initial_instance_value(
    definition: &PropertyType,
    entity_id: &str,
) -> Result<PropertyInput, InstanceValueError> {
    let property_type_id = instance_target(definition)?;
    Ok(PropertyInput {
        id: None,
        property_type_id,
        entity_id: entity_id.to_string(),
        slots: definition
            .slots
            .clone()
            .retain_group(definition.kind.slot_group()),
    })
}

fn instance_target(definition: &PropertyType) -> Result<String, InstanceValueError> {
    if definition.is_deleted {
        return Err(InstanceValueError::Deleted(definition.id.clone()));
    }
    if !definition.is_instance_property {
        return Err(InstanceValueError::NotInstanceProperty(
            definition.id.clone(),
        ));
    }
    definition
        .id
        .persisted_id()
        .map(str::to_string)
        .ok_or_else(|| InstanceValueError::NotPersisted(definition.id.clone()))
}
