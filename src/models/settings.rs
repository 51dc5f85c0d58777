use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User preferences; a single row in the settings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub username: Option<String>, // Discogs username used when a request names none
    pub sonos_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            username: None,
            sonos_enabled: true,
            updated_at: Utc::now(),
        }
    }
}

impl Settings {
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_sonos_enabled(mut self, enabled: bool) -> Self {
        self.sonos_enabled = enabled;
        self
    }

    /// The stored username, treating an empty string as unset.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}
