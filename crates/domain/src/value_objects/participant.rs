//! Participant value object
//!
//! A sender or recipient of a Messenger event, addressed by its page-scoped ID.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A page-scoped user or page reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Participant {
    /// Page-scoped ID
    pub id: i64,
}

impl Participant {
    /// Create a participant reference
    pub const fn new(id: i64) -> Self {
        Self { id }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<i64> for Participant {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_id_object() {
        let json = serde_json::to_value(Participant::new(7)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7}));
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Participant::default().id, 0);
    }
}
