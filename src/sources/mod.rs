mod discogs;
mod itunes;

pub use discogs::{CollectionPage, DiscogsClient, DEFAULT_DISCOGS_URL};
pub use itunes::{CatalogMatch, ItunesClient, DEFAULT_ITUNES_URL};

/// Sent with every upstream request; Discogs rejects requests without one.
pub const USER_AGENT: &str = concat!("DiscoJanice/", env!("CARGO_PKG_VERSION"));
