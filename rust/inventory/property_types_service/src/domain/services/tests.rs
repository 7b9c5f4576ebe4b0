use super::*;
use crate::{
    domain::{
        models::{
            EquipmentTypePolicy, KindOption, LocationTypePolicy, LogicalValue, PropertyTypeEdit,
            ValidationError,
        },
        ports::MockPropertyTypeGateway,
    },
    outbound::in_memory::InMemoryGateway,
};
use cool_asserts::assert_matches;
use models_property_types::{
    DefinitionId, NodeType, OwnerKind, PropertyKind, PropertyType,
    api::{PersistPayload, StoredPropertyTypes},
};

fn registry() -> Arc<KindRegistry> {
    Arc::new(KindRegistry::default())
}

fn router_session() -> EditSession<EquipmentTypePolicy> {
    let mut editor = SchemaListEditor::new(EquipmentTypePolicy::default(), registry());
    let color = editor.add_default().unwrap();
    editor
        .edit(&color, PropertyTypeEdit::Name("Color".into()))
        .unwrap();
    editor
        .edit(
            &color,
            PropertyTypeEdit::DefaultValue(Some(LogicalValue::Text("Red".into()))),
        )
        .unwrap();
    EditSession::new(None, "Router", editor)
}

#[tokio::test]
async fn it_commits_and_replaces_temp_ids() {
    let service = PropertyTypeCommitServiceImpl::new(InMemoryGateway::new());
    let mut session = router_session();
    assert!(session.can_save());

    service.commit(&mut session).await.unwrap();

    assert!(session.owner_id().is_some());
    assert_matches!(session.editor().visible().collect::<Vec<_>>().as_slice(), [PropertyType {
        id: DefinitionId::Persisted(_),
        index: 0,
        name,
        ..
    }] => {
        assert_eq!(name, "Color");
    });

    let added = session.editor_mut().add_default().unwrap();
    assert_eq!(added, DefinitionId::Temp(1));
}

#[tokio::test]
async fn it_reopens_committed_sessions() {
    let service = PropertyTypeCommitServiceImpl::new(InMemoryGateway::new());
    let mut session = router_session();
    service.commit(&mut session).await.unwrap();
    let owner_id = session.owner_id().unwrap().to_string();

    let color = session.editor().visible().next().unwrap().id.clone();
    session.editor_mut().remove(&color).unwrap();
    service.commit(&mut session).await.unwrap();
    assert_eq!(session.editor().backing().count(), 0);

    let reopened = service
        .open(EquipmentTypePolicy::default(), registry(), owner_id)
        .await
        .unwrap();
    assert_eq!(reopened.owner_name(), "Router");
    assert_eq!(reopened.editor().backing().count(), 0);
}

#[tokio::test]
async fn it_never_calls_the_gateway_for_invalid_sessions() {
    let mut gateway = MockPropertyTypeGateway::new();
    gateway.expect_persist().never();

    let mut session = router_session();
    session.set_owner_name("");
    let location = session
        .editor_mut()
        .add(KindOption::node(NodeType::Location))
        .unwrap();
    session
        .editor_mut()
        .edit(&location, PropertyTypeEdit::InstanceProperty(false))
        .unwrap();

    let err = PropertyTypeCommitServiceImpl::new(gateway)
        .commit(&mut session)
        .await
        .unwrap_err();

    assert_matches!(err, CommitError::Validation(errors) => {
        assert_matches!(errors.as_slice(), [
            ValidationError::EmptyOwnerName,
            ValidationError::MissingDefault { .. },
        ]);
    });
}

#[tokio::test]
async fn it_leaves_the_session_untouched_on_failure() {
    let mut gateway = MockPropertyTypeGateway::new();
    gateway
        .expect_persist()
        .times(1)
        .withf(|owner_kind, payload| {
            assert_eq!(*owner_kind, OwnerKind::EquipmentType);
            assert_matches!(payload, PersistPayload { owner_id: None, property_types, .. } => {
                assert_eq!(property_types.len(), 1);
                assert_eq!(property_types[0].id, None);
            });
            true
        })
        .returning(|_, _| Box::pin(async move { Err(anyhow::anyhow!("Network unavailable")) }));

    let mut session = router_session();
    let before: Vec<PropertyType> = session.editor().backing().cloned().collect();

    let err = PropertyTypeCommitServiceImpl::new(gateway)
        .commit(&mut session)
        .await
        .unwrap_err();

    assert_matches!(&err, CommitError::Persistence(message) => {
        assert_eq!(message, "Network unavailable");
    });
    assert_eq!(session.owner_id(), None);
    assert_eq!(
        session.editor().backing().cloned().collect::<Vec<_>>(),
        before
    );
}

#[tokio::test]
async fn it_reports_unusable_gateway_responses() {
    let mut gateway = MockPropertyTypeGateway::new();
    gateway.expect_persist().times(1).returning(|_, payload| {
        Box::pin(async move {
            Ok(StoredPropertyTypes {
                owner_id: "eq-type-1".into(),
                owner_name: payload.owner_name,
                property_types: vec![PropertyType::new(
                    DefinitionId::Temp(0),
                    PropertyKind::String,
                    None,
                )],
            })
        })
    });

    let mut session = router_session();
    let err = PropertyTypeCommitServiceImpl::new(gateway)
        .commit(&mut session)
        .await
        .unwrap_err();

    assert_matches!(err, CommitError::InvalidResponse(_));
    assert_eq!(session.owner_id(), None);
}

#[tokio::test]
async fn it_fails_to_open_unknown_owners() {
    let mut gateway = MockPropertyTypeGateway::new();
    gateway
        .expect_fetch()
        .times(1)
        .withf(|owner_kind, owner_id| {
            *owner_kind == OwnerKind::LocationType && owner_id == "loc-type-9"
        })
        .returning(|_, _| Box::pin(async move { Ok(None) }));

    let err = PropertyTypeCommitServiceImpl::new(gateway)
        .open(LocationTypePolicy, registry(), "loc-type-9".into())
        .await
        .unwrap_err();

    assert_matches!(err, CommitError::UnknownOwner(id) => assert_eq!(id, "loc-type-9"));
}

#[tokio::test]
async fn it_opens_sessions_with_tombstones_from_storage() {
    let mut gateway = MockPropertyTypeGateway::new();
    gateway.expect_fetch().returning(|_, owner_id| {
        Box::pin(async move {
            Ok(Some(StoredPropertyTypes {
                owner_id,
                owner_name: "Building".into(),
                property_types: vec![
                    PropertyType {
                        name: "Floors".into(),
                        ..PropertyType::new(
                            DefinitionId::Persisted("pt-1".into()),
                            PropertyKind::Int,
                            None,
                        )
                    },
                    PropertyType {
                        name: "Legacy".into(),
                        index: 1,
                        is_deleted: true,
                        ..PropertyType::new(
                            DefinitionId::Persisted("pt-2".into()),
                            PropertyKind::String,
                            None,
                        )
                    },
                ],
            }))
        })
    });

    let session = PropertyTypeCommitServiceImpl::new(gateway)
        .open(LocationTypePolicy, registry(), "loc-type-1".into())
        .await
        .unwrap();

    assert_eq!(session.owner_id(), Some("loc-type-1"));
    assert_eq!(session.editor().visible().count(), 1);
    assert!(
        session
            .editor()
            .is_tombstoned(&DefinitionId::Persisted("pt-2".into()))
    );
}
