//! Event handler ports
//!
//! Callbacks a bot registers with the webhook dispatcher. Each receives the
//! materialized event and a [`Response`] bound to the event's sender.
//! Handlers return nothing: failures of outbound calls made inside a handler
//! are the handler's to log.

use async_trait::async_trait;
use domain::{Delivery, Message};

use crate::response::Response;

/// Invoked for every incoming text message
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle a message received by the page
    async fn on_message(&self, message: Message, response: Response);
}

/// Invoked for every delivery receipt
#[async_trait]
pub trait DeliveryHandler: Send + Sync {
    /// Handle a delivery receipt for messages the page sent
    async fn on_delivery(&self, delivery: Delivery, response: Response);
}
