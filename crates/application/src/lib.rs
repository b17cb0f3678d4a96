//! Application layer - Ports and the per-event reply handle
//!
//! Defines the interfaces the webhook core calls out through (credential
//! resolution, outbound replies, profile lookup) and the callbacks a bot
//! registers to receive events.

pub mod error;
pub mod ports;
pub mod response;

pub use error::ApplicationError;
pub use ports::*;
pub use response::Response;
