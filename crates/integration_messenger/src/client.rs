//! Messenger Graph API client
//!
//! Sends text messages through the Send API and looks up user profiles.
//! Every call is authenticated with the page access token of the page it acts
//! for, passed as the `access_token` query parameter.

use std::time::Duration;

use domain::Profile;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Profile fields requested from the Graph API
pub const PROFILE_FIELDS: &str = "first_name,last_name,profile_pic";

/// Messenger API errors
#[derive(Debug, Error)]
pub enum MessengerError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),
}

/// Messenger client configuration
#[derive(Debug, Clone)]
pub struct MessengerClientConfig {
    /// Graph API base URL including the version (default: https://graph.facebook.com/v2.6)
    pub graph_api_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for MessengerClientConfig {
    fn default() -> Self {
        Self {
            graph_api_url: "https://graph.facebook.com/v2.6".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Messenger Platform Graph API
#[derive(Debug, Clone)]
pub struct MessengerClient {
    client: Client,
    base_url: String,
}

/// Send API request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    recipient: RecipientRef,
    message: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct RecipientRef {
    id: i64,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    text: &'a str,
}

/// Send API response
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub recipient_id: String,
    #[serde(default)]
    pub message_id: String,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i32,
    message: String,
}

impl MessengerClient {
    /// Create a new Messenger client
    pub fn new(config: MessengerClientConfig) -> Result<Self, MessengerError> {
        let base_url = config.graph_api_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(MessengerError::Configuration(
                "graph_api_url is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Graph API base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a text message to a page-scoped user
    #[instrument(skip(self, page_token, text), fields(recipient = recipient_id))]
    pub async fn send_text(
        &self,
        page_token: &str,
        recipient_id: i64,
        text: &str,
    ) -> Result<SendMessageResponse, MessengerError> {
        let request = SendMessageRequest {
            recipient: RecipientRef { id: recipient_id },
            message: TextContent { text },
        };

        debug!(text_len = text.len(), "Sending Messenger message");

        let response = self
            .client
            .post(format!("{}/me/messages", self.base_url))
            .query(&[("access_token", page_token)])
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(api_error(response).await)
        }
    }

    /// Retrieve the profile of a page-scoped user
    #[instrument(skip(self, page_token))]
    pub async fn profile_by_id(&self, page_token: &str, id: i64) -> Result<Profile, MessengerError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.base_url))
            .query(&[("fields", PROFILE_FIELDS), ("access_token", page_token)])
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(api_error(response).await)
        }
    }
}

async fn api_error(response: Response) -> MessengerError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return MessengerError::Request(e),
    };

    match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(error) => MessengerError::Api {
            code: error.error.code,
            message: error.error.message,
        },
        Err(_) => MessengerError::Api {
            code: i32::from(status.as_u16()),
            message: body,
        },
    }
}
