//! Concrete implementations of the domain ports

pub mod feature_flags;
pub mod in_memory;
