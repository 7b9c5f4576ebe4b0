pub mod default_value;
pub mod instance_value;
pub mod kind_registry;
pub mod mutation;
pub mod owner_policy;
pub mod save_gate;
pub mod schema_list;
pub mod session;
pub mod value_codec;

pub use default_value::{default_value, has_default, slots_have_default};
pub use instance_value::{InstanceValueError, initial_instance_value, instance_value};
pub use kind_registry::{
    FeatureFlag, KindDescriptor, KindError, KindOption, KindRegistry, parse_option_key,
    resolve_option_key,
};
pub use mutation::build_payload;
pub use owner_policy::{
    EquipmentTypePolicy, LocationTypePolicy, OwnerPolicy, PortPropertyRole, PortTypePolicy,
};
pub use save_gate::{ValidationError, can_save, validate};
pub use schema_list::{PropertyTypeEdit, SchemaEditError, SchemaListEditor};
pub use session::EditSession;
pub use value_codec::{LogicalValue, ValueCodecError, get_value, set_value};
