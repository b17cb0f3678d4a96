//! Port definitions for application layer
//!
//! Ports are interfaces that define how the webhook core interacts with
//! external systems and with the bot that registered for events. Adapters in
//! the infrastructure layer implement the outbound ports.

mod event_handler_port;
mod page_token_port;
mod profile_port;
mod reply_port;

pub use event_handler_port::{DeliveryHandler, MessageHandler};
#[cfg(test)]
pub use page_token_port::MockPageTokenPort;
pub use page_token_port::PageTokenPort;
#[cfg(test)]
pub use profile_port::MockProfilePort;
pub use profile_port::ProfilePort;
#[cfg(test)]
pub use reply_port::MockReplyPort;
pub use reply_port::{OutgoingText, OutgoingTextMessage, ReplyPort};
