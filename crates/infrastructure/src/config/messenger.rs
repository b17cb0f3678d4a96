//! Messenger Platform configuration.

use std::time::Duration;

use integration_messenger::{HandshakeVerifier, MessengerClientConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Messenger Platform configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Token the platform must present during the webhook handshake (sensitive)
    #[serde(default = "default_verify_token", skip_serializing)]
    pub verify_token: SecretString,

    /// Page access token used for every page (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub page_token: Option<SecretString>,

    /// Graph API base URL including the version
    #[serde(default = "default_graph_api_url")]
    pub graph_api_url: String,

    /// Timeout for outbound Graph API calls in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl MessengerConfig {
    /// Whether a non-empty verify token is configured
    pub fn has_verify_token(&self) -> bool {
        !self.verify_token.expose_secret().is_empty()
    }

    /// Verifier for the subscription handshake
    pub fn handshake_verifier(&self) -> HandshakeVerifier {
        HandshakeVerifier::new(self.verify_token.expose_secret())
    }

    /// Settings for the Graph API client
    pub fn client_config(&self) -> MessengerClientConfig {
        MessengerClientConfig {
            graph_api_url: self.graph_api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl std::fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessengerConfig")
            .field(
                "verify_token",
                &if self.has_verify_token() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field(
                "page_token",
                &if self.page_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("graph_api_url", &self.graph_api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_verify_token() -> SecretString {
    SecretString::from(String::new())
}

fn default_graph_api_url() -> String {
    "https://graph.facebook.com/v2.6".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            verify_token: default_verify_token(),
            page_token: None,
            graph_api_url: default_graph_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
