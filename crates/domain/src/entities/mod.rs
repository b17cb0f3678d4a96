//! Domain entities

mod delivery;
mod message;
mod profile;

pub use delivery::Delivery;
pub use message::{Attachment, Message, time_from_unix_seconds};
pub use profile::Profile;
