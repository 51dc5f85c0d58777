use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::AlbumSuggestion;

/// Spoken when no Discogs username is available.
pub const MISSING_USERNAME_PROMPT: &str = "Please set your Discogs username in the app settings.";

/// Voice assistant that an announcement is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    Siri,
    Sonos,
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assistant::Siri => write!(f, "Siri"),
            Assistant::Sonos => write!(f, "Sonos"),
        }
    }
}

/// Pick the username for a voice request: an explicit non-empty value wins,
/// then the stored preference.
pub fn resolve_username(explicit: Option<&str>, stored: Option<&str>) -> Option<String> {
    explicit
        .filter(|name| !name.is_empty())
        .or_else(|| stored.filter(|name| !name.is_empty()))
        .map(str::to_string)
}

/// Reply for the "suggest an album" intent.
pub fn intent_response(suggestion: &AlbumSuggestion) -> String {
    format!("How about '{}' by {}?", suggestion.title, suggestion.artist)
}

/// Utterance that asks an assistant to start playing the album.
pub fn announcement(assistant: Assistant, title: &str, artist: &str) -> String {
    format!("Hey {}, play the album {} by {}", assistant, title, artist)
}
