//! Per-event reply handle
//!
//! A [`Response`] is created by the dispatcher for every dispatched event and
//! bound to the event's sender and the page token resolved for it. It is
//! independent of the inbound HTTP response: sending through it is a new
//! outbound call, never a write to the webhook acknowledgment.

use std::{fmt, sync::Arc};

use domain::Participant;
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{OutgoingTextMessage, ReplyPort},
};

/// Reply handle bound to one recipient and one page token
///
/// Calling [`Response::text`] more than once sends more than one message.
#[derive(Clone)]
pub struct Response {
    to: Participant,
    token: String,
    reply: Arc<dyn ReplyPort>,
}

impl Response {
    /// Bind a reply handle to `to`, authenticated with `token`
    pub fn new(to: Participant, token: impl Into<String>, reply: Arc<dyn ReplyPort>) -> Self {
        Self {
            to,
            token: token.into(),
            reply,
        }
    }

    /// The participant replies are sent to
    pub const fn recipient(&self) -> Participant {
        self.to
    }

    /// The page token replies are authenticated with
    pub fn page_token(&self) -> &str {
        &self.token
    }

    /// Send a text reply
    ///
    /// Returns the platform's message ID.
    #[instrument(skip(self, text), fields(recipient = %self.to))]
    pub async fn text(&self, text: impl Into<String> + Send) -> Result<String, ApplicationError> {
        let message = OutgoingTextMessage::new(self.to, text);
        debug!(text_len = message.message.text.len(), "Sending reply");
        self.reply.send_text(&self.token, message).await
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("to", &self.to)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockReplyPort;

    #[tokio::test]
    async fn text_sends_to_bound_recipient_with_bound_token() {
        let mut mock = MockReplyPort::new();
        mock.expect_send_text()
            .withf(|token, message| {
                token.to_string() == "TOK" && message.recipient.id == 7 && message.message.text == "Hello"
            })
            .times(1)
            .returning(|_, _| Ok("mid.1".to_string()));

        let response = Response::new(Participant::new(7), "TOK", Arc::new(mock));
        let mid = response.text("Hello").await.unwrap();
        assert_eq!(mid, "mid.1");
    }

    #[tokio::test]
    async fn each_call_is_a_separate_send() {
        let mut mock = MockReplyPort::new();
        mock.expect_send_text()
            .times(2)
            .returning(|_, _| Ok("mid".to_string()));

        let response = Response::new(Participant::new(7), "TOK", Arc::new(mock));
        response.text("one").await.unwrap();
        response.text("two").await.unwrap();
    }

    #[tokio::test]
    async fn send_failure_is_reported() {
        let mut mock = MockReplyPort::new();
        mock.expect_send_text()
            .returning(|_, _| Err(ApplicationError::ExternalService("boom".to_string())));

        let response = Response::new(Participant::new(7), "TOK", Arc::new(mock));
        let result = response.text("Hello").await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }

    #[test]
    fn accessors() {
        let response = Response::new(Participant::new(42), "TOK", Arc::new(MockReplyPort::new()));
        assert_eq!(response.recipient().id, 42);
        assert_eq!(response.page_token(), "TOK");
    }

    #[test]
    fn debug_redacts_token() {
        let response = Response::new(Participant::new(1), "secret", Arc::new(MockReplyPort::new()));
        let debug = format!("{response:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
