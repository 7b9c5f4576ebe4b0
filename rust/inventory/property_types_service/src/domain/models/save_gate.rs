//! Decides whether an edited property type list may be persisted.

use super::{default_value::has_default, owner_policy::OwnerPolicy, schema_list::SchemaListEditor};
use models_property_types::DefinitionId;
use serde::Serialize;
use thiserror::Error;

/// A reason an edit session cannot be saved. The message is shown next to the offending field.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyOwnerName,
    #[error("Property '{name}' must have a default value")]
    MissingDefault { id: DefinitionId, name: String },
    #[error("Cannot have duplicate property names")]
    DuplicateName {
        name: String,
        ids: Vec<DefinitionId>,
    },
    #[error("Cannot have duplicate {sibling} names")]
    DuplicateSiblingName { sibling: &'static str, name: String },
}

impl ValidationError {
    /// Whether this error points at the property type `id`
    pub fn affects(&self, id: &DefinitionId) -> bool {
        match self {
            ValidationError::MissingDefault { id: target, .. } => target == id,
            ValidationError::DuplicateName { ids, .. } => ids.contains(id),
            ValidationError::EmptyOwnerName | ValidationError::DuplicateSiblingName { .. } => {
                false
            }
        }
    }
}

/// Every reason the session cannot be saved, in field order
pub fn validate<P: OwnerPolicy>(owner_name: &str, editor: &SchemaListEditor<P>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if owner_name.trim().is_empty() {
        errors.push(ValidationError::EmptyOwnerName);
    }

    let mut groups: Vec<(String, Vec<DefinitionId>)> = Vec::new();
    for definition in editor.visible() {
        if !definition.is_instance_property && !has_default(definition) {
            errors.push(ValidationError::MissingDefault {
                id: definition.id.clone(),
                name: definition.name.clone(),
            });
        }

        let Some(key) = editor.policy().uniqueness_key(definition) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, ids)) => ids.push(definition.id.clone()),
            None => groups.push((key, vec![definition.id.clone()])),
        }
    }

    errors.extend(
        groups
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, ids)| ValidationError::DuplicateName { name, ids }),
    );
    errors.extend(editor.policy().extra_validation());
    errors
}

pub fn can_save<P: OwnerPolicy>(owner_name: &str, editor: &SchemaListEditor<P>) -> bool {
    validate(owner_name, editor).is_empty()
}
