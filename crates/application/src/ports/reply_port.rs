//! Reply port - sends text replies through the platform's Send API

use async_trait::async_trait;
use domain::Participant;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Text body of an outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingText {
    /// Text content
    pub text: String,
}

/// An outgoing text message
///
/// Serializes to the Send API body `{"recipient":{"id":..},"message":{"text":..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Who receives the message
    pub recipient: Participant,
    /// Message body
    pub message: OutgoingText,
}

impl OutgoingTextMessage {
    /// Create a new outgoing text message
    #[must_use]
    pub fn new(recipient: Participant, text: impl Into<String>) -> Self {
        Self {
            recipient,
            message: OutgoingText { text: text.into() },
        }
    }
}

/// Sends messages on behalf of a page
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReplyPort: Send + Sync {
    /// Send a text message authenticated with `page_token`
    ///
    /// Returns the platform's message ID for the sent message.
    async fn send_text(
        &self,
        page_token: &str,
        message: OutgoingTextMessage,
    ) -> Result<String, ApplicationError>;
}
