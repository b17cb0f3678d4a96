//! Delivery receipt entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A delivery receipt for previously sent messages
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Delivery {
    /// IDs of the delivered messages (may be absent on older API versions)
    #[serde(default)]
    pub mids: Vec<String>,
    /// All messages sent before this instant (epoch milliseconds) were delivered
    #[serde(rename = "watermark", default)]
    pub raw_watermark: i64,
    /// Sequence number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
}

impl Delivery {
    /// The watermark as a UTC instant
    ///
    /// Values outside chrono's representable range clamp to the Unix epoch.
    pub fn watermark(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.raw_watermark).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
