//! Property type schema engine.
//!
//! Edits the ordered list of property types owned by one catalog entity, validates the
//! result and hands a minimal payload to a persistence gateway.

pub mod config;
pub mod domain;
pub mod entrypoint;
pub mod inbound;
pub mod outbound;
