//! This module defines the services that are exposed by this crate

use super::{
    error::CommitError,
    models::{EditSession, KindRegistry, OwnerPolicy, SchemaListEditor},
    ports::{PropertyTypeCommitService, PropertyTypeGateway},
};
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// concrete struct which implements [PropertyTypeCommitService]
#[derive(Clone)]
pub struct PropertyTypeCommitServiceImpl<G> {
    gateway: G,
}

impl<G> PropertyTypeCommitServiceImpl<G>
where
    G: PropertyTypeGateway,
{
    /// create a new instance of this service
    pub fn new(gateway: G) -> Self {
        PropertyTypeCommitServiceImpl { gateway }
    }
}

impl<G> PropertyTypeCommitService for PropertyTypeCommitServiceImpl<G>
where
    G: PropertyTypeGateway,
{
    #[tracing::instrument(err, skip(self, policy, registry))]
    async fn open<P: OwnerPolicy>(
        &self,
        policy: P,
        registry: Arc<KindRegistry>,
        owner_id: String,
    ) -> Result<EditSession<P>, CommitError> {
        let stored = self
            .gateway
            .fetch(policy.owner_kind(), owner_id.clone())
            .await
            .map_err(|err| CommitError::Persistence(err.to_string()))?
            .ok_or(CommitError::UnknownOwner(owner_id))?;

        let editor = SchemaListEditor::from_definitions(policy, registry, stored.property_types)?;
        Ok(EditSession::new(
            Some(stored.owner_id),
            stored.owner_name,
            editor,
        ))
    }

    #[tracing::instrument(err, skip(self, session), fields(owner_id = ?session.owner_id()))]
    async fn commit<P: OwnerPolicy>(&self, session: &mut EditSession<P>) -> Result<(), CommitError> {
        let errors = session.validate();
        if !errors.is_empty() {
            return Err(CommitError::Validation(errors));
        }

        let owner_kind = session.editor().policy().owner_kind();
        let payload = session.payload();
        tracing::debug!(%owner_kind, rows = payload.property_types.len(), "persisting property types");

        let stored = self
            .gateway
            .persist(owner_kind, payload)
            .await
            .map_err(|err| CommitError::Persistence(err.to_string()))?;

        session.apply_response(stored)?;
        Ok(())
    }
}
