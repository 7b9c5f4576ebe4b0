pub mod definition_id;
pub mod owner_kind;
pub mod property_kind;
pub mod property_type;
pub mod value_slots;


pub use definition_id::{DefinitionId, DefinitionIdError, TEMP_ID_PREFIX};
pub use owner_kind::OwnerKind;
pub use property_kind::{NodeType, PropertyKind, SlotGroup};
pub use property_type::PropertyType;
pub use value_slots::{NodeValue, ValueSlots};
