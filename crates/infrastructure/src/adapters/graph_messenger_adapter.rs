//! Messenger Graph API adapter
//!
//! Implements `ReplyPort` and `ProfilePort` using the Messenger integration crate.

use application::error::ApplicationError;
use application::ports::{OutgoingTextMessage, ProfilePort, ReplyPort};
use async_trait::async_trait;
use domain::{Participant, Profile};
use integration_messenger::{MessengerClient, MessengerClientConfig, MessengerError};
use tracing::{debug, instrument};

/// Graph API error code for an invalid or expired access token
const OAUTH_EXCEPTION: i32 = 190;

/// Adapter that implements the outbound ports using `MessengerClient`
#[derive(Debug, Clone)]
pub struct GraphMessengerAdapter {
    client: MessengerClient,
}

impl GraphMessengerAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: MessengerClientConfig) -> Result<Self, MessengerError> {
        Ok(Self {
            client: MessengerClient::new(config)?,
        })
    }

    /// Get a reference to the underlying client
    #[must_use]
    pub const fn client(&self) -> &MessengerClient {
        &self.client
    }
}

fn map_error(context: &str, error: MessengerError) -> ApplicationError {
    match error {
        MessengerError::Api {
            code: OAUTH_EXCEPTION,
            message,
        } => {
            ApplicationError::NotAuthorized(format!("{context}: {message}"))
        },
        MessengerError::Api { code: 404, message } => {
            ApplicationError::NotFound(format!("{context}: {message}"))
        },
        MessengerError::Configuration(message) => {
            ApplicationError::Configuration(format!("{context}: {message}"))
        },
        e => ApplicationError::ExternalService(format!("{context}: {e}")),
    }
}

#[async_trait]
impl ReplyPort for GraphMessengerAdapter {
    #[instrument(skip(self, page_token, message), fields(recipient = %message.recipient))]
    async fn send_text(
        &self,
        page_token: &str,
        message: OutgoingTextMessage,
    ) -> Result<String, ApplicationError> {
        let response = self
            .client
            .send_text(page_token, message.recipient.id, &message.message.text)
            .await
            .map_err(|e| map_error("Messenger send failed", e))?;

        debug!(message_id = %response.message_id, "Messenger text message sent");
        Ok(response.message_id)
    }
}

#[async_trait]
impl ProfilePort for GraphMessengerAdapter {
    #[instrument(skip(self, page_token), fields(user = %user))]
    async fn profile(&self, page_token: &str, user: Participant) -> Result<Profile, ApplicationError> {
        self.client
            .profile_by_id(page_token, user.id)
            .await
            .map_err(|e| map_error("Messenger profile lookup failed", e))
    }
}
