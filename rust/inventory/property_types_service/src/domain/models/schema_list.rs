//! Ordered, soft deleting editor over the property types of one owner.

use super::{
    kind_registry::{KindError, KindOption, KindRegistry},
    owner_policy::OwnerPolicy,
    value_codec::{LogicalValue, ValueCodecError, set_value},
};
use models_property_types::{DefinitionId, PropertyType};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use thiserror::Error;


/// A single field update applied by [SchemaListEditor::edit]
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyTypeEdit {
    Name(String),
    /// Changes kind and node type, clearing the default value
    Kind(KindOption),
    DefaultValue(Option<LogicalValue>),
    Mandatory(bool),
    /// Clearing instance-ness also clears mandatory
    InstanceProperty(bool),
    Editable(bool),
    Category(Option<String>),
    ExternalId(Option<String>),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaEditError {
    #[error("Unknown property type {0}")]
    UnknownId(DefinitionId),
    #[error("Property type {0} was deleted")]
    Deleted(DefinitionId),
    #[error("Cannot move property type from {from} to {to} in a list of {len}")]
    ReorderOutOfRange { from: usize, to: usize, len: usize },
    #[error("Only instance properties can be mandatory")]
    MandatoryRequiresInstance,
    #[error("Node properties cannot have a default value")]
    NodeDefault,
    #[error("Property type {0} appears more than once")]
    DuplicateId(DefinitionId),
    #[error("Stored property type cannot use the local id {0}")]
    TempIdInStoredList(DefinitionId),
    #[error(transparent)]
    Kind(#[from] KindError),
    #[error(transparent)]
    Value(#[from] ValueCodecError),
}

/// Owns the property types of one owner for the length of an edit session.
///
/// Definitions live behind [Arc]s so an edit replaces exactly one entry and leaves its
/// siblings pointer-equal. Persisted definitions are tombstoned on remove and stay in the
/// backing order until the session is committed; temp definitions are dropped outright.
#[derive(Debug, Clone)]
pub struct SchemaListEditor<P> {
    policy: P,
    registry: Arc<KindRegistry>,
    definitions: HashMap<DefinitionId, Arc<PropertyType>>,
    order: Vec<DefinitionId>,
    tombstones: HashSet<DefinitionId>,
    next_temp_id: u32,
}

impl<P: OwnerPolicy> SchemaListEditor<P> {
    pub fn new(policy: P, registry: Arc<KindRegistry>) -> Self {
        SchemaListEditor {
            policy,
            registry,
            definitions: HashMap::new(),
            order: Vec::new(),
            tombstones: HashSet::new(),
            next_temp_id: 0,
        }
    }

    /// Load a stored list. Entries are ordered by their `index`, deleted entries become
    /// tombstones and visible indices are renumbered from 0.
    pub fn from_definitions(
        policy: P,
        registry: Arc<KindRegistry>,
        definitions: impl IntoIterator<Item = PropertyType>,
    ) -> Result<Self, SchemaEditError> {
        let mut editor = Self::new(policy, registry);
        editor.load(definitions)?;
        Ok(editor)
    }

    /// Swap the whole list for a freshly stored one, leaving the editor untouched on error
    pub fn replace_all(
        &mut self,
        definitions: impl IntoIterator<Item = PropertyType>,
    ) -> Result<(), SchemaEditError> {
        let mut next = Self::new(self.policy.clone(), self.registry.clone());
        next.next_temp_id = self.next_temp_id;
        next.load(definitions)?;
        *self = next;
        Ok(())
    }

    fn load(
        &mut self,
        definitions: impl IntoIterator<Item = PropertyType>,
    ) -> Result<(), SchemaEditError> {
        let mut definitions: Vec<PropertyType> = definitions.into_iter().collect();
        definitions.sort_by_key(|definition| definition.index);

        for mut definition in definitions {
            if definition.id.is_temp() {
                return Err(SchemaEditError::TempIdInStoredList(definition.id));
            }
            if self.definitions.contains_key(&definition.id) {
                return Err(SchemaEditError::DuplicateId(definition.id));
            }
            KindOption::new(definition.kind, definition.node_type)?;
            definition.slots = definition.slots.retain_group(definition.kind.slot_group());
            if !definition.is_instance_property {
                definition.is_mandatory = false;
            }
            if definition.is_deleted {
                self.tombstones.insert(definition.id.clone());
            }
            self.order.push(definition.id.clone());
            self.definitions
                .insert(definition.id.clone(), Arc::new(definition));
        }
        self.renumber();
        Ok(())
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Definitions that are not tombstoned, in display order
    pub fn visible(&self) -> impl Iterator<Item = &PropertyType> + '_ {
        self.order
            .iter()
            .filter(|id| !self.tombstones.contains(*id))
            .filter_map(|id| self.definitions.get(id))
            .map(Arc::as_ref)
    }

    pub fn visible_len(&self) -> usize {
        self.order.len() - self.tombstones.len()
    }

    /// Every definition including tombstones, in backing order
    pub fn backing(&self) -> impl Iterator<Item = &PropertyType> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.definitions.get(id))
            .map(Arc::as_ref)
    }

    pub fn get(&self, id: &DefinitionId) -> Option<&PropertyType> {
        self.definitions.get(id).map(Arc::as_ref)
    }

    /// The shared handle of a definition
    pub fn shared(&self, id: &DefinitionId) -> Option<&Arc<PropertyType>> {
        self.definitions.get(id)
    }

    pub fn is_tombstoned(&self, id: &DefinitionId) -> bool {
        self.tombstones.contains(id)
    }

    /// Append a new definition of the given kind with a fresh temp id
    pub fn add(&mut self, option: KindOption) -> Result<DefinitionId, SchemaEditError> {
        self.registry.check(option)?;

        let id = DefinitionId::Temp(self.next_temp_id);
        self.next_temp_id += 1;

        let mut definition = PropertyType::new(id.clone(), option.kind(), option.node_type());
        definition.index = self.visible_len() as u32;

        tracing::debug!(id = %id, option = %option, index = definition.index, "added property type");
        self.order.push(id.clone());
        self.definitions.insert(id.clone(), Arc::new(definition));
        Ok(id)
    }

    /// Append a new text definition
    pub fn add_default(&mut self) -> Result<DefinitionId, SchemaEditError> {
        self.add(KindOption::STRING)
    }

    /// Drop a temp definition or tombstone a persisted one
    pub fn remove(&mut self, id: &DefinitionId) -> Result<(), SchemaEditError> {
        if self.tombstones.contains(id) {
            return Err(SchemaEditError::Deleted(id.clone()));
        }
        if id.is_temp() {
            if self.definitions.remove(id).is_none() {
                return Err(SchemaEditError::UnknownId(id.clone()));
            }
            self.order.retain(|entry| entry != id);
            tracing::debug!(id = %id, "dropped property type");
        } else {
            let Some(definition) = self.definitions.get_mut(id) else {
                return Err(SchemaEditError::UnknownId(id.clone()));
            };
            Arc::make_mut(definition).is_deleted = true;
            self.tombstones.insert(id.clone());
            tracing::debug!(id = %id, "tombstoned property type");
        }
        self.renumber();
        Ok(())
    }

    /// Move the visible definition at `from` to `to`. Tombstones keep their backing slots.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), SchemaEditError> {
        let mut visible: Vec<DefinitionId> = self
            .order
            .iter()
            .filter(|id| !self.tombstones.contains(*id))
            .cloned()
            .collect();
        let len = visible.len();
        if from >= len || to >= len {
            return Err(SchemaEditError::ReorderOutOfRange { from, to, len });
        }
        if from == to {
            return Ok(());
        }

        let moved = visible.remove(from);
        visible.insert(to, moved);

        let mut reordered = visible.into_iter();
        for slot in self.order.iter_mut() {
            if self.tombstones.contains(&*slot) {
                continue;
            }
            if let Some(id) = reordered.next() {
                *slot = id;
            }
        }

        tracing::debug!(from, to, "reordered property types");
        self.renumber();
        Ok(())
    }

    /// Replace one definition with an edited copy
    pub fn edit(&mut self, id: &DefinitionId, edit: PropertyTypeEdit) -> Result<(), SchemaEditError> {
        if self.tombstones.contains(id) {
            return Err(SchemaEditError::Deleted(id.clone()));
        }
        let Some(current) = self.definitions.get_mut(id) else {
            return Err(SchemaEditError::UnknownId(id.clone()));
        };

        let updated = apply_edit(&self.registry, current, edit)?;
        if let Some(updated) = updated {
            tracing::debug!(id = %id, "edited property type");
            *current = Arc::new(updated);
        }
        Ok(())
    }

    fn renumber(&mut self) {
        let mut index = 0;
        for id in &self.order {
            if self.tombstones.contains(id) {
                continue;
            }
            if let Some(definition) = self.definitions.get_mut(id) {
                if definition.index != index {
                    Arc::make_mut(definition).index = index;
                }
                index += 1;
            }
        }
    }
}

/// The edited copy, or `None` when the edit changes nothing
fn apply_edit(
    registry: &KindRegistry,
    current: &PropertyType,
    edit: PropertyTypeEdit,
) -> Result<Option<PropertyType>, SchemaEditError> {
    let mut next = current.clone();
    match edit {
        PropertyTypeEdit::Name(name) => next.name = name,
        PropertyTypeEdit::Kind(option) => {
            if KindOption::new(current.kind, current.node_type)? == option {
                return Ok(None);
            }
            registry.check(option)?;
            next.kind = option.kind();
            next.node_type = option.node_type();
            next.slots = Default::default();
        }
        PropertyTypeEdit::DefaultValue(value) => {
            if current.kind.is_node() && value.is_some() {
                return Err(SchemaEditError::NodeDefault);
            }
            next.slots = set_value(current.kind, value)?;
        }
        PropertyTypeEdit::Mandatory(mandatory) => {
            if mandatory && !current.is_instance_property {
                return Err(SchemaEditError::MandatoryRequiresInstance);
            }
            next.is_mandatory = mandatory;
        }
        PropertyTypeEdit::InstanceProperty(instance) => {
            next.is_instance_property = instance;
            if !instance {
                next.is_mandatory = false;
            }
        }
        PropertyTypeEdit::Editable(editable) => next.is_editable = editable,
        PropertyTypeEdit::Category(category) => next.category = category,
        PropertyTypeEdit::ExternalId(external_id) => next.external_id = external_id,
    }
    Ok((next != *current).then_some(next))
}
