use serde::{Deserialize, Serialize};

/// An album picked from a collection, optionally enriched with catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSuggestion {
    pub title: String,
    pub artist: String,
    pub cover_url: Option<String>, // 300x300 artwork from the catalog search
    pub music_url: Option<String>, // Storefront page for the album
}

impl AlbumSuggestion {
    pub fn new(title: String, artist: String) -> Self {
        Self {
            title,
            artist,
            cover_url: None,
            music_url: None,
        }
    }

    pub fn with_cover_url(mut self, cover_url: String) -> Self {
        self.cover_url = Some(cover_url);
        self
    }

    pub fn with_music_url(mut self, music_url: String) -> Self {
        self.music_url = Some(music_url);
        self
    }

    pub fn is_enriched(&self) -> bool {
        self.cover_url.is_some() || self.music_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistCredit {
    pub name: String,
}

/// The parts of a collection release needed to make a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    pub title: String,
    pub artists: Vec<ArtistCredit>,
}

impl ReleaseSummary {
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }
}
