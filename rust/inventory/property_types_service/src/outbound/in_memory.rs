//! Process local [PropertyTypeGateway], used by the dry run binary and tests.

use crate::domain::ports::PropertyTypeGateway;
use models_property_types::{
    DefinitionId, OwnerKind, PropertyType,
    api::{PersistPayload, PropertyTypeInput, StoredPropertyTypes},
};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};
use thiserror::Error;
use uuid::{NoContext, Timestamp, Uuid};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryGatewayError {
    #[error("Unknown owner {0}")]
    UnknownOwner(String),
    #[error("Unknown property type {0}")]
    UnknownPropertyType(String),
    #[error("Name cannot be empty")]
    EmptyOwnerName,
    #[error("Cannot have duplicate property names")]
    DuplicateName(String),
    #[error("Property type storage is unavailable")]
    Poisoned,
}

#[derive(Debug, Clone)]
struct StoredOwner {
    name: String,
    property_types: Vec<PropertyType>,
}

type OwnerKey = (OwnerKind, String);

/// Keeps owners and their property types in a shared map.
///
/// Rows without an id get a fresh v7 uuid, deleted rows are dropped for good.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    owners: Arc<Mutex<HashMap<OwnerKey, StoredOwner>>>,
}

fn generate_id() -> String {
    Uuid::new_v7(Timestamp::now(NoContext)).to_string()
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an owner as if it had been persisted earlier
    pub fn seed(
        &self,
        owner_kind: OwnerKind,
        stored: StoredPropertyTypes,
    ) -> Result<(), InMemoryGatewayError> {
        let mut owners = self
            .owners
            .lock()
            .map_err(|_| InMemoryGatewayError::Poisoned)?;
        owners.insert(
            (owner_kind, stored.owner_id),
            StoredOwner {
                name: stored.owner_name,
                property_types: stored.property_types,
            },
        );
        Ok(())
    }

    fn fetch_owner(
        &self,
        owner_kind: OwnerKind,
        owner_id: String,
    ) -> Result<Option<StoredPropertyTypes>, InMemoryGatewayError> {
        let owners = self
            .owners
            .lock()
            .map_err(|_| InMemoryGatewayError::Poisoned)?;
        Ok(owners
            .get(&(owner_kind, owner_id.clone()))
            .map(|owner| StoredPropertyTypes {
                owner_id,
                owner_name: owner.name.clone(),
                property_types: owner.property_types.clone(),
            }))
    }

    fn persist_owner(
        &self,
        owner_kind: OwnerKind,
        payload: PersistPayload,
    ) -> Result<StoredPropertyTypes, InMemoryGatewayError> {
        let owner_name = payload.owner_name.trim().to_string();
        if owner_name.is_empty() {
            return Err(InMemoryGatewayError::EmptyOwnerName);
        }

        let mut owners = self
            .owners
            .lock()
            .map_err(|_| InMemoryGatewayError::Poisoned)?;

        let (owner_id, existing) = match payload.owner_id {
            Some(owner_id) => {
                let existing = owners
                    .get(&(owner_kind, owner_id.clone()))
                    .ok_or_else(|| InMemoryGatewayError::UnknownOwner(owner_id.clone()))?
                    .property_types
                    .clone();
                (owner_id, existing)
            }
            None => (generate_id(), Vec::new()),
        };

        let property_types = merge(existing, payload.property_types)?;
        tracing::debug!(%owner_kind, %owner_id, rows = property_types.len(), "stored property types");

        owners.insert(
            (owner_kind, owner_id.clone()),
            StoredOwner {
                name: owner_name.clone(),
                property_types: property_types.clone(),
            },
        );
        Ok(StoredPropertyTypes {
            owner_id,
            owner_name,
            property_types,
        })
    }
}

/// Apply the payload rows to the stored list. Rows the payload does not mention are kept.
fn merge(
    existing: Vec<PropertyType>,
    inputs: Vec<PropertyTypeInput>,
) -> Result<Vec<PropertyType>, InMemoryGatewayError> {
    let mut rows: HashMap<String, PropertyType> = existing
        .into_iter()
        .filter_map(|row| Some((row.id.persisted_id()?.to_string(), row)))
        .collect();

    for input in inputs {
        let id = match &input.id {
            Some(id) if !rows.contains_key(id) => {
                return Err(InMemoryGatewayError::UnknownPropertyType(id.clone()));
            }
            Some(id) => id.clone(),
            None => generate_id(),
        };
        if input.is_deleted {
            rows.remove(&id);
            continue;
        }
        rows.insert(id.clone(), into_stored(DefinitionId::Persisted(id), input));
    }

    let mut stored: Vec<PropertyType> = rows.into_values().collect();
    stored.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.name.cmp(&b.name)));

    let mut names = HashSet::new();
    for (index, row) in stored.iter_mut().enumerate() {
        row.index = index as u32;
        if !names.insert(row.name.trim().to_string()) {
            return Err(InMemoryGatewayError::DuplicateName(row.name.clone()));
        }
    }
    Ok(stored)
}

fn into_stored(id: DefinitionId, input: PropertyTypeInput) -> PropertyType {
    PropertyType {
        id,
        name: input.name,
        kind: input.kind,
        node_type: input.node_type,
        index: input.index,
        category: input.category,
        external_id: input.external_id,
        slots: input.slots,
        is_editable: input.is_editable,
        is_instance_property: input.is_instance_property,
        is_mandatory: input.is_mandatory,
        is_deleted: false,
    }
}

impl PropertyTypeGateway for InMemoryGateway {
    type Err = InMemoryGatewayError;

    async fn fetch(
        &self,
        owner_kind: OwnerKind,
        owner_id: String,
    ) -> Result<Option<StoredPropertyTypes>, Self::Err> {
        self.fetch_owner(owner_kind, owner_id)
    }

    async fn persist(
        &self,
        owner_kind: OwnerKind,
        payload: PersistPayload,
    ) -> Result<StoredPropertyTypes, Self::Err> {
        self.persist_owner(owner_kind, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;
    use models_property_types::{PropertyKind, ValueSlots};

    fn input(id: Option<&str>, name: &str, index: u32) -> PropertyTypeInput {
        PropertyTypeInput {
            id: id.map(str::to_string),
            name: name.into(),
            kind: PropertyKind::String,
            node_type: None,
            index,
            category: None,
            external_id: None,
            slots: ValueSlots::default(),
            is_editable: true,
            is_instance_property: true,
            is_mandatory: false,
            is_deleted: false,
        }
    }

    fn payload(owner_id: Option<&str>, rows: Vec<PropertyTypeInput>) -> PersistPayload {
        PersistPayload {
            owner_id: owner_id.map(str::to_string),
            owner_name: "Router".into(),
            property_types: rows,
        }
    }

    #[tokio::test]
    async fn it_creates_owners_and_assigns_ids() {
        let gateway = InMemoryGateway::new();
        let stored = gateway
            .persist(
                OwnerKind::EquipmentType,
                payload(None, vec![input(None, "Color", 0), input(None, "Serial", 1)]),
            )
            .await
            .unwrap();

        assert!(Uuid::parse_str(&stored.owner_id).is_ok());
        assert_matches!(stored.property_types.as_slice(), [
            PropertyType { id: DefinitionId::Persisted(_), index: 0, .. },
            PropertyType { id: DefinitionId::Persisted(_), index: 1, .. },
        ]);

        let fetched = gateway
            .fetch(OwnerKind::EquipmentType, stored.owner_id.clone())
            .await
            .unwrap();
        assert_eq!(fetched, Some(stored));
    }

    #[tokio::test]
    async fn it_deletes_rows_and_renumbers() {
        let gateway = InMemoryGateway::new();
        let stored = gateway
            .persist(
                OwnerKind::LocationType,
                payload(None, vec![input(None, "A", 0), input(None, "B", 1)]),
            )
            .await
            .unwrap();
        let a = stored.property_types[0].id.to_string();
        let b = stored.property_types[1].id.to_string();

        let mut removed = input(Some(&a), "A", 0);
        removed.is_deleted = true;
        let stored = gateway
            .persist(
                OwnerKind::LocationType,
                payload(
                    Some(&stored.owner_id),
                    vec![removed, input(Some(&b), "B", 0)],
                ),
            )
            .await
            .unwrap();

        assert_matches!(stored.property_types.as_slice(), [PropertyType { name, index: 0, .. }] => {
            assert_eq!(name, "B");
        });
    }

    #[tokio::test]
    async fn it_rejects_bad_requests() {
        let gateway = InMemoryGateway::new();
        assert_matches!(
            gateway
                .persist(OwnerKind::LocationType, payload(Some("missing"), vec![]))
                .await,
            Err(InMemoryGatewayError::UnknownOwner(_))
        );
        assert_matches!(
            gateway
                .persist(
                    OwnerKind::LocationType,
                    payload(None, vec![input(None, "A", 0), input(None, "A", 1)])
                )
                .await,
            Err(InMemoryGatewayError::DuplicateName(_))
        );
        assert_matches!(
            gateway
                .persist(
                    OwnerKind::LocationType,
                    payload(None, vec![input(Some("pt-404"), "A", 0)])
                )
                .await,
            Err(InMemoryGatewayError::UnknownPropertyType(_))
        );
        assert_eq!(
            gateway
                .fetch(OwnerKind::LocationType, "missing".into())
                .await
                .unwrap(),
            None
        );
    }
}
