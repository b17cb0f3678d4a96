//! Messenger webhook payload
//!
//! Wire types for the `page` webhook and the classifier that decides which
//! kind of event a messaging record carries.

use domain::{Attachment, Delivery, Message, PageId, Participant, time_from_unix_seconds};
use serde::{Deserialize, Deserializer, de};

/// Expected value of [`WebhookPayload::object`]
pub const PAGE_OBJECT: &str = "page";

/// Top-level webhook body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// Subscription object, `page` for Messenger
    #[serde(default)]
    pub object: String,
    /// One entry per page the batch concerns
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

impl WebhookPayload {
    /// Decode a payload from a raw request body
    ///
    /// The body must be a JSON object; arrays and scalars are rejected even
    /// though every field has a default.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(de::Error::invalid_type(
                de::Unexpected::Other("non-object JSON value"),
                &"a webhook object",
            ));
        }
        serde_json::from_value(value)
    }

    /// Whether the payload was sent for a page subscription
    pub fn is_page(&self) -> bool {
        self.object == PAGE_OBJECT
    }
}

/// Events for a single page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEntry {
    /// Page ID
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: i64,
    /// Time of the update (epoch milliseconds)
    #[serde(default)]
    pub time: Option<i64>,
    /// Messaging events in the order the platform sent them
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
}

impl WebhookEntry {
    /// The page this entry is scoped to
    pub const fn page_id(&self) -> PageId {
        PageId::new(self.id)
    }
}

/// One messaging event
///
/// At most one of `message` or `delivery` is expected to be set. Use
/// [`classify`] to decide which one applies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagingEvent {
    #[serde(default, deserialize_with = "participant")]
    pub sender: Participant,
    #[serde(default, deserialize_with = "participant")]
    pub recipient: Participant,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
}

/// Message content as sent on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub mid: Option<String>,
    #[serde(default)]
    pub seq: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<IncomingAttachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingAttachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Option<AttachmentPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachmentPayload {
    #[serde(default)]
    pub url: Option<String>,
}

impl IncomingMessage {
    /// Build the domain message for `event`, attaching the resolved page token
    pub fn to_message(&self, event: &MessagingEvent, page_token: &str) -> Message {
        Message {
            mid: self.mid.clone(),
            seq: self.seq,
            text: self.text.clone(),
            attachments: self
                .attachments
                .iter()
                .map(|a| Attachment {
                    kind: a.kind.clone(),
                    url: a.payload.as_ref().and_then(|p| p.url.clone()),
                })
                .collect(),
            sender: event.sender,
            recipient: event.recipient,
            time: time_from_unix_seconds(event.timestamp),
            page_token: page_token.to_string(),
        }
    }
}

/// Kind of a messaging event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A message sent to the page
    Text,
    /// A delivery receipt for messages the page sent
    Delivery,
    /// Anything else (postbacks, reads, optins, ...)
    Unknown,
}

/// A messaging event tagged with its kind, borrowing the relevant payload
#[derive(Debug, Clone, Copy)]
pub enum ClassifiedEvent<'a> {
    Text(&'a IncomingMessage),
    Delivery(&'a Delivery),
    Unknown,
}

impl ClassifiedEvent<'_> {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Text(_) => EventKind::Text,
            Self::Delivery(_) => EventKind::Delivery,
            Self::Unknown => EventKind::Unknown,
        }
    }
}

/// Classify a messaging event
///
/// A populated `message` wins over a populated `delivery`; an event with
/// neither is [`ClassifiedEvent::Unknown`].
pub fn classify(event: &MessagingEvent) -> ClassifiedEvent<'_> {
    if let Some(message) = &event.message {
        ClassifiedEvent::Text(message)
    } else if let Some(delivery) = &event.delivery {
        ClassifiedEvent::Delivery(delivery)
    } else {
        ClassifiedEvent::Unknown
    }
}

// IDs arrive as JSON strings from the live platform and as numbers from
// older API versions and test tools.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(s) => s
            .parse::<PageId>()
            .map(|id| id.as_i64())
            .map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
struct ParticipantRef {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
}

fn participant<'de, D>(deserializer: D) -> Result<Participant, D::Error>
where
    D: Deserializer<'de>,
{
    ParticipantRef::deserialize(deserializer).map(|p| Participant::new(p.id))
}
