//! Interfaces between the schema engine and the outside world

use super::{
    error::CommitError,
    models::{EditSession, FeatureFlag, KindRegistry, OwnerPolicy},
};
use models_property_types::{
    OwnerKind,
    api::{PersistPayload, StoredPropertyTypes},
};
use std::{fmt::Display, sync::Arc};

/// Answers whether a feature flag is on
pub trait FeatureFlagProvider: Send + Sync + 'static {
    fn is_enabled(&self, flag: FeatureFlag) -> bool;
}

impl<F> FeatureFlagProvider for F
where
    F: Fn(FeatureFlag) -> bool + Send + Sync + 'static,
{
    fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self(flag)
    }
}

/// Storage for owners and their property types
#[cfg_attr(any(test, feature = "mock"), mockall::automock(type Err = anyhow::Error;))]
pub trait PropertyTypeGateway: Send + Sync + 'static {
    /// Displayed to the user when a request fails
    type Err: Display + Send + Sync;

    /// Load an owner with its property types, `None` if the owner does not exist
    fn fetch(
        &self,
        owner_kind: OwnerKind,
        owner_id: String,
    ) -> impl Future<Output = Result<Option<StoredPropertyTypes>, Self::Err>> + Send;

    /// Create or update the owner and apply the property type rows of `payload`
    fn persist(
        &self,
        owner_kind: OwnerKind,
        payload: PersistPayload,
    ) -> impl Future<Output = Result<StoredPropertyTypes, Self::Err>> + Send;
}

/// Opens and commits property type edit sessions
pub trait PropertyTypeCommitService: Send + Sync + 'static {
    /// Start a session over the stored state of an existing owner
    fn open<P: OwnerPolicy>(
        &self,
        policy: P,
        registry: Arc<KindRegistry>,
        owner_id: String,
    ) -> impl Future<Output = Result<EditSession<P>, CommitError>> + Send;

    /// Validate and persist the session, replacing its list with the stored one.
    /// On error the session is left as it was.
    fn commit<P: OwnerPolicy>(
        &self,
        session: &mut EditSession<P>,
    ) -> impl Future<Output = Result<(), CommitError>> + Send;
}
