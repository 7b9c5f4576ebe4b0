//! Projection of an edited list into the persistence payload.

use super::{owner_policy::OwnerPolicy, schema_list::SchemaListEditor};
use models_property_types::api::{PersistPayload, PropertyTypeInput};

/// Build the payload for the current list.
///
/// Unnamed rows are dropped, temp ids are left out so the gateway creates those rows and
/// tombstones are sent with `isDeleted` set.
pub fn build_payload<P: OwnerPolicy>(
    editor: &SchemaListEditor<P>,
    owner_id: Option<&str>,
    owner_name: &str,
) -> PersistPayload {
    PersistPayload {
        owner_id: owner_id.map(str::to_string),
        owner_name: owner_name.to_string(),
        property_types: editor
            .backing()
            .filter(|definition| !definition.name.trim().is_empty())
            .map(PropertyTypeInput::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        kind_registry::KindRegistry, owner_policy::LocationTypePolicy,
        schema_list::PropertyTypeEdit, value_codec::LogicalValue,
    };
    use cool_asserts::assert_matches;
    use models_property_types::{DefinitionId, PropertyKind, PropertyType};
    use std::sync::Arc;

    fn stored() -> SchemaListEditor<LocationTypePolicy> {
        SchemaListEditor::from_definitions(
            LocationTypePolicy,
            Arc::new(KindRegistry::default()),
            [
                PropertyType {
                    name: "Serial".into(),
                    ..PropertyType::new(DefinitionId::Persisted("pt-1".into()), PropertyKind::String, None)
                },
                PropertyType {
                    name: "Ports".into(),
                    index: 1,
                    ..PropertyType::new(DefinitionId::Persisted("pt-2".into()), PropertyKind::Int, None)
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn it_never_emits_temp_ids() {
        let mut editor = stored();
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

        let payload = build_payload(&editor, Some("loc-type-1"), "Building");

        assert_eq!(payload.owner_id.as_deref(), Some("loc-type-1"));
        assert_eq!(payload.property_types.len(), 3);
        assert!(
            payload
                .property_types
                .iter()
                .filter_map(|input| input.id.as_deref())
                .all(|id| !DefinitionId::is_temp_str(id))
        );
        assert_matches!(payload.property_types.last(), Some(PropertyTypeInput { id: None, index: 2, name, .. }) => {
            assert_eq!(name, "Color");
        });
    }

    #[test]
    fn it_never_emits_overflowing_temp_ids() {
        let row = serde_json::json!({ "id": "tmp-4294967296", "name": "Serial", "type": "string" });
        assert!(serde_json::from_value::<PropertyType>(row).is_err());
        assert!("tmp-4294967296".parse::<DefinitionId>().is_err());

        let mut editor = stored();
        editor.add_default().unwrap();
        let payload = build_payload(&editor, None, "Building");
        assert!(
            payload
                .property_types
                .iter()
                .filter_map(|input| input.id.as_deref())
                .all(|id| !DefinitionId::is_temp_str(id))
        );
    }

    #[test]
    fn it_sends_tombstones_as_deleted() {
        let mut editor = stored();
        editor
            .remove(&DefinitionId::Persisted("pt-1".into()))
            .unwrap();

        let payload = build_payload(&editor, None, "Building");
        assert_matches!(payload.property_types.as_slice(), [
            PropertyTypeInput { is_deleted: true, .. },
            PropertyTypeInput { is_deleted: false, index: 0, .. },
        ]);
    }

    #[test]
    fn it_drops_unnamed_rows() {
        let mut editor = stored();
        let blank = editor.add_default().unwrap();
        editor
            .edit(&blank, PropertyTypeEdit::Name("   ".into()))
            .unwrap();
        editor.add_default().unwrap();

        let payload = build_payload(&editor, None, "Building");
        assert_eq!(payload.property_types.len(), 2);
    }
}
