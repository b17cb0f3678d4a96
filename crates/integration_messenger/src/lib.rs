//! Messenger Platform integration
//!
//! Handles Messenger webhook verification, event classification and dispatch,
//! and the Graph API calls used to reply and look up profiles.

pub mod client;
pub mod dispatcher;
pub mod handshake;
pub mod webhook;

pub use client::{MessengerClient, MessengerClientConfig, MessengerError, SendMessageResponse};
pub use dispatcher::{Acknowledgment, DispatchOutcome, WebhookDispatcher};
pub use handshake::{HandshakeOutcome, HandshakeVerifier, INCORRECT_VERIFY_TOKEN};
pub use webhook::{
    ClassifiedEvent, EventKind, MessagingEvent, PAGE_OBJECT, WebhookEntry, WebhookPayload, classify,
};
