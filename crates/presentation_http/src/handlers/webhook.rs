//! Messenger webhook handlers
//!
//! Both endpoints always answer 200: the platform reads the outcome from the
//! body, and a non-2xx answer only makes it retry the same batch.

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::state::AppState;

/// Query parameters for webhook verification
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WebhookVerifyQuery {
    /// Subscription mode, accepted and ignored
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    /// The verify token to validate
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    /// Value to echo back on success
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

/// Subscription handshake (GET /webhook)
#[instrument(skip(state, query), fields(mode = ?query.hub_mode))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> (StatusCode, String) {
    let outcome = state.verifier.verify(
        query.hub_verify_token.as_deref(),
        query.hub_challenge.as_deref(),
    );

    debug!(verified = outcome.is_verified(), "Webhook handshake handled");

    (StatusCode::OK, outcome.body().to_string())
}

/// Event delivery (POST /webhook)
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    let outcome = state.dispatcher.dispatch_body(&body).await;

    debug!(
        status = outcome.acknowledgment.status(),
        dispatched = outcome.dispatched,
        skipped = outcome.skipped,
        "Webhook processed"
    );

    (StatusCode::OK, Json(outcome.acknowledgment.body()))
}
