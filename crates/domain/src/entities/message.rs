//! Incoming text message entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Participant;

/// Convert a Unix timestamp in seconds into a UTC instant
///
/// Values outside chrono's representable range clamp to the Unix epoch.
pub fn time_from_unix_seconds(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A file or rich-media attachment carried by a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment kind (`image`, `audio`, `video`, `file`, `location`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the attachment content can be fetched, if the platform provided it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A message received from a user
///
/// Materialized by the dispatcher for text events: the wire format only
/// carries `mid`, `seq`, `text` and attachments, the rest is attached at
/// dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Platform message ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Sequence number within the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
    /// Text content (empty for attachment-only messages)
    pub text: String,
    /// Attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    /// Who sent the message
    pub sender: Participant,
    /// Who the message was sent to (the page)
    pub recipient: Participant,
    /// When the message was sent
    pub time: DateTime<Utc>,
    /// Credential for acting on behalf of the receiving page
    #[serde(skip)]
    pub page_token: String,
}

impl Message {
    /// Create a text message with no platform metadata
    pub fn text(
        text: impl Into<String>,
        sender: Participant,
        recipient: Participant,
        timestamp: i64,
    ) -> Self {
        Self {
            mid: None,
            seq: None,
            text: text.into(),
            attachments: Vec::new(),
            sender,
            recipient,
            time: time_from_unix_seconds(timestamp),
            page_token: String::new(),
        }
    }

    /// Attach the resolved page token
    #[must_use]
    pub fn with_page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = page_token.into();
        self
    }
}
