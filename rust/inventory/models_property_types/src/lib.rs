//! Property Type Models
//!
//! This crate defines the data models for catalog property types using a two-layer layout:
//!
//! - **shared**: Shared types (PropertyKind, ValueSlots, PropertyType) used by every layer
//! - **api**: Mutation payloads and gateway responses exchanged with persistence

pub mod api;
pub mod shared;

// Re-export commonly used shared types for convenience
pub use shared::{
    DefinitionId, NodeType, NodeValue, OwnerKind, PropertyKind, PropertyType, SlotGroup,
    ValueSlots,
};
