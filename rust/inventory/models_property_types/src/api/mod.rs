//! API layer types - payloads exchanged with the persistence gateway.
//!
//! These structs represent the wire contract and use camelCase serialization.

pub mod requests;
pub mod responses;

pub use requests::*;
pub use responses::*;
