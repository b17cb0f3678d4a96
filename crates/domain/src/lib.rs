//! Domain layer for Pagehook
//!
//! Contains the entities and value objects a Messenger Platform webhook
//! carries once it has been decoded and classified.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
