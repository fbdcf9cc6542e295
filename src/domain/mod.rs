//! Domain Layer - The protocol's entities, value objects, and ordering rules
//!
//! This module contains the data contract exchanged between the requester and
//! the analyzers, its validation rules, and the deterministic merge semantics.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use services::*;
pub use value_objects::*;
