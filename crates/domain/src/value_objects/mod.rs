//! Value objects - Immutable types defined by their attributes

mod page_id;
mod participant;

pub use page_id::PageId;
pub use participant::Participant;
