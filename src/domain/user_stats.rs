use serde::{Deserialize, Serialize};

const DEFAULT_PROFILE_PICTURE: &str =
    "https://img.daisyui.com/images/stock/photo-1534528741775-53994a69daeb.webp";

// Aggregate usage counters for the signed-in user. Stored as one record, so
// updates always rewrite the whole object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub number_of_notes: u64,
    pub username: String,
    pub profile_picture: Option<String>,
    pub days_logged: u64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            number_of_notes: 0,
            username: "New User".to_string(),
            profile_picture: Some(DEFAULT_PROFILE_PICTURE.to_string()),
            days_logged: 0,
        }
    }
}
