//! Webhook verification handshake
//!
//! Before delivering events the platform sends a GET request carrying
//! `hub.verify_token` and `hub.challenge`. Echoing the challenge proves the
//! endpoint belongs to whoever configured the verify token.

use std::fmt;

use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Body returned when the verify token does not match
pub const INCORRECT_VERIFY_TOKEN: &str = "Incorrect verify token.";

/// Result of a handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// Token matched; the challenge must be echoed
    Verified { challenge: String },
    /// Token missing or wrong
    Rejected,
}

impl HandshakeOutcome {
    /// Response body for this outcome
    pub fn body(&self) -> &str {
        match self {
            Self::Verified { challenge } => challenge,
            Self::Rejected => INCORRECT_VERIFY_TOKEN,
        }
    }

    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

/// Checks handshake requests against the configured verify token
#[derive(Clone)]
pub struct HandshakeVerifier {
    verify_token: String,
}

impl HandshakeVerifier {
    pub fn new(verify_token: impl Into<String>) -> Self {
        Self {
            verify_token: verify_token.into(),
        }
    }

    /// Verify a handshake
    ///
    /// The token must match exactly; a missing token compares as the empty
    /// string. A missing challenge with a matching token echoes an empty body.
    pub fn verify(&self, verify_token: Option<&str>, challenge: Option<&str>) -> HandshakeOutcome {
        let token = verify_token.unwrap_or_default();

        if !bool::from(token.as_bytes().ct_eq(self.verify_token.as_bytes())) {
            warn!("Webhook verification failed: token mismatch");
            return HandshakeOutcome::Rejected;
        }

        info!("Webhook verified successfully");
        HandshakeOutcome::Verified {
            challenge: challenge.unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Debug for HandshakeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandshakeVerifier")
            .field("verify_token", &"[REDACTED]")
            .finish()
    }
}
