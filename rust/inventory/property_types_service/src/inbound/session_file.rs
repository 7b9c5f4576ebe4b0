//! Edit sessions described as JSON files, replayed by the dry run binary.

use crate::{
    domain::{
        error::CommitError,
        models::{
            EditSession, EquipmentTypePolicy, KindOption, KindRegistry,
            LocationTypePolicy, LogicalValue, OwnerPolicy, PortPropertyRole, PortTypePolicy,
            PropertyTypeEdit, SchemaEditError, SchemaListEditor, default_value, get_value,
        },
        ports::PropertyTypeCommitService,
        services::PropertyTypeCommitServiceImpl,
    },
    outbound::in_memory::{InMemoryGateway, InMemoryGatewayError},
};
use models_property_types::{
    DefinitionId, OwnerKind, PropertyType,
    api::{PersistPayload, StoredPropertyTypes},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;


/// The owner a session file edits, with owner specific data
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "ownerKind", rename_all = "snake_case")]
pub enum SessionOwner {
    EquipmentType {
        #[serde(default)]
        positions: Vec<String>,
        #[serde(default)]
        ports: Vec<String>,
    },
    EquipmentPortType {
        #[serde(default)]
        role: PortPropertyRole,
    },
    LocationType,
}

/// Contents of a session file.
///
/// Rows with a persisted id are the stored state of the owner. Rows with a `tmp-<n>` id are
/// drafts, added to the session in index order after the stored rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFile {
    #[serde(flatten)]
    pub owner: SessionOwner,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub owner_name: String,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
}

/// What the dry run found
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunReport {
    pub owner_kind: OwnerKind,
    pub can_save: bool,
    pub errors: Vec<String>,
    /// Visible rows after replay, in order
    pub rows: Vec<ReportRow>,
    pub payload: PersistPayload,
    /// Result of committing against an in-memory gateway, only when the session can be saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<StoredPropertyTypes>,
}

/// A visible row of the replayed list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub id: DefinitionId,
    pub name: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<LogicalValue>,
}

impl ReportRow {
    fn new(registry: &KindRegistry, definition: &PropertyType) -> Self {
        let kind = KindOption::new(definition.kind, definition.node_type)
            .map(|option| registry.label(option))
            .unwrap_or("Unknown");
        ReportRow {
            id: definition.id.clone(),
            name: definition.name.clone(),
            kind,
            default_value: default_value(definition),
        }
    }
}

#[derive(Debug, Error)]
pub enum DryRunError {
    #[error("Stored owner needs an ownerId")]
    MissingOwnerId,
    #[error("Invalid property type {id}: {source}")]
    Draft {
        id: DefinitionId,
        #[source]
        source: SchemaEditError,
    },
    #[error(transparent)]
    Edit(#[from] SchemaEditError),
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    Gateway(#[from] InMemoryGatewayError),
}

impl SessionFile {
    /// Rebuild the session, validate it and commit it against an in-memory gateway
    #[tracing::instrument(err, skip(self, registry), fields(owner_name = %self.owner_name))]
    pub async fn dry_run(self, registry: Arc<KindRegistry>) -> Result<DryRunReport, DryRunError> {
        let SessionFile {
            owner,
            owner_id,
            owner_name,
            property_types,
        } = self;
        let rows = Rows {
            owner_id,
            owner_name,
            property_types,
        };

        match owner {
            SessionOwner::EquipmentType { positions, ports } => {
                rows.replay(EquipmentTypePolicy { positions, ports }, registry)
                    .await
            }
            SessionOwner::EquipmentPortType { role } => {
                rows.replay(PortTypePolicy { role }, registry).await
            }
            SessionOwner::LocationType => rows.replay(LocationTypePolicy, registry).await,
        }
    }
}

struct Rows {
    owner_id: Option<String>,
    owner_name: String,
    property_types: Vec<PropertyType>,
}

impl Rows {
    async fn replay<P: OwnerPolicy>(
        self,
        policy: P,
        registry: Arc<KindRegistry>,
    ) -> Result<DryRunReport, DryRunError> {
        let owner_kind = policy.owner_kind();
        let (mut drafts, stored): (Vec<_>, Vec<_>) = self
            .property_types
            .into_iter()
            .partition(|row| row.id.is_temp());
        drafts.sort_by_key(|row| row.index);

        let gateway = InMemoryGateway::new();
        match (&self.owner_id, stored.is_empty()) {
            (Some(owner_id), _) => gateway.seed(
                owner_kind,
                StoredPropertyTypes {
                    owner_id: owner_id.clone(),
                    owner_name: self.owner_name.clone(),
                    property_types: stored.clone(),
                },
            )?,
            (None, false) => return Err(DryRunError::MissingOwnerId),
            (None, true) => {}
        }

        let editor = SchemaListEditor::from_definitions(policy, Arc::clone(&registry), stored)?;
        let mut session = EditSession::new(self.owner_id, self.owner_name, editor);
        for draft in drafts {
            let id = draft.id.clone();
            add_draft(session.editor_mut(), draft)
                .map_err(|source| DryRunError::Draft { id, source })?;
        }

        let errors: Vec<String> = session
            .validate()
            .iter()
            .map(ToString::to_string)
            .collect();
        let rows = session
            .editor()
            .visible()
            .map(|definition| ReportRow::new(&registry, definition))
            .collect();
        let payload = session.payload();
        let can_save = errors.is_empty();

        let stored = if can_save {
            let service = PropertyTypeCommitServiceImpl::new(gateway);
            service.commit(&mut session).await?;
            Some(StoredPropertyTypes {
                owner_id: session.owner_id().unwrap_or_default().to_string(),
                owner_name: session.owner_name().to_string(),
                property_types: session.editor().backing().cloned().collect(),
            })
        } else {
            None
        };

        Ok(DryRunReport {
            owner_kind,
            can_save,
            errors,
            rows,
            payload,
            stored,
        })
    }
}

/// Replay an unsaved row through the editor operations a user would perform
fn add_draft<P: OwnerPolicy>(
    editor: &mut SchemaListEditor<P>,
    draft: PropertyType,
) -> Result<DefinitionId, SchemaEditError> {
    let id = editor.add(KindOption::new(draft.kind, draft.node_type)?)?;

    let mut edits = vec![
        PropertyTypeEdit::Name(draft.name),
        PropertyTypeEdit::Category(draft.category),
        PropertyTypeEdit::ExternalId(draft.external_id),
        PropertyTypeEdit::Editable(draft.is_editable),
        PropertyTypeEdit::InstanceProperty(draft.is_instance_property),
        PropertyTypeEdit::Mandatory(draft.is_mandatory),
    ];
    if !draft.slots.is_empty()
        && let Some(value) = get_value(draft.kind, &draft.slots)
    {
        edits.push(PropertyTypeEdit::DefaultValue(Some(value)));
    }
    for edit in edits {
        editor.edit(&id, edit)?;
    }
    Ok(id)
}
