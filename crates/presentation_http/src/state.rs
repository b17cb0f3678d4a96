//! Application state shared across handlers

use std::sync::Arc;

use integration_messenger::{HandshakeVerifier, WebhookDispatcher};

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Dispatcher with all handlers registered
    pub dispatcher: Arc<WebhookDispatcher>,
    /// Verifier for the subscription handshake
    pub verifier: Arc<HandshakeVerifier>,
}

impl AppState {
    pub fn new(dispatcher: WebhookDispatcher, verifier: HandshakeVerifier) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            verifier: Arc::new(verifier),
        }
    }
}
