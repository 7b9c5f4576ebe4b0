//! One open edit of an owner and its property types.

use super::{
    mutation::build_payload,
    owner_policy::OwnerPolicy,
    save_gate::{ValidationError, validate},
    schema_list::{SchemaEditError, SchemaListEditor},
};
use models_property_types::api::{PersistPayload, StoredPropertyTypes};

/// Owner identity plus the property type editor.
///
/// Cancelling a session is dropping it; nothing outside of it is touched until commit.
#[derive(Debug, Clone)]
pub struct EditSession<P> {
    owner_id: Option<String>,
    owner_name: String,
    editor: SchemaListEditor<P>,
}

impl<P: OwnerPolicy> EditSession<P> {
    pub fn new(
        owner_id: Option<String>,
        owner_name: impl Into<String>,
        editor: SchemaListEditor<P>,
    ) -> Self {
        EditSession {
            owner_id,
            owner_name: owner_name.into(),
            editor,
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn set_owner_name(&mut self, name: impl Into<String>) {
        self.owner_name = name.into();
    }

    pub fn editor(&self) -> &SchemaListEditor<P> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut SchemaListEditor<P> {
        &mut self.editor
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validate(&self.owner_name, &self.editor)
    }

    pub fn can_save(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn payload(&self) -> PersistPayload {
        build_payload(&self.editor, self.owner_id.as_deref(), &self.owner_name)
    }

    /// Adopt the stored state returned by the gateway
    pub(crate) fn apply_response(
        &mut self,
        response: StoredPropertyTypes,
    ) -> Result<(), SchemaEditError> {
        self.editor.replace_all(response.property_types)?;
        self.owner_id = Some(response.owner_id);
        self.owner_name = response.owner_name;
        Ok(())
    }
}
