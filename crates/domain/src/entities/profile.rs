//! User profile entity

use serde::{Deserialize, Serialize};

/// Public profile of a page-scoped user as returned by the Graph API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// URL of the profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
}

impl Profile {
    /// Full name, omitting a missing last name
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_graph_response() {
        let json = r#"{"first_name":"Peter","last_name":"Chang","profile_pic":"https://example.com/p.jpg","id":"7"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.first_name, "Peter");
        assert_eq!(profile.full_name(), "Peter Chang");
    }

    #[test]
    fn full_name_without_last_name() {
        let profile = Profile {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(profile.full_name(), "Ada");
    }
}
