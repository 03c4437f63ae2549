use serde::{Deserialize, Serialize};

/// The subset of a Mastodon account entity this tool reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque, instance-local identifier
    pub id: String,
    /// Handle; local accounts have no `@instance` suffix
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub url: String,
}

impl Account {
    pub fn new(id: &str, acct: &str, display_name: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            acct: acct.to_string(),
            display_name: display_name.to_string(),
            url: url.to_string(),
        }
    }
}

/// The subset of a status entity this tool reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub id: String,
    /// ISO-8601 timestamp, kept raw because instances disagree on the exact shape
    pub created_at: String,
}
