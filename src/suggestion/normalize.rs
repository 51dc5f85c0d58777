use regex::Regex;
use std::sync::OnceLock;

/// Size token in the thumbnail URLs the catalog search returns.
pub const THUMBNAIL_SIZE: &str = "100x100";
/// Size token requested instead, served from the same CDN path.
pub const DISPLAY_SIZE: &str = "300x300";

// Discogs appends " (2)", " (3)" ... to tell same-named entries apart.
fn disambiguation_suffix() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| Regex::new(r"(?: *\([0-9]*\))+$").expect("suffix pattern is valid"))
}

/// Remove a trailing parenthesized number, e.g. `"Abbey Road (2)"` becomes
/// `"Abbey Road"`. Stacked suffixes are removed together so the result is
/// stable under repeated application.
pub fn strip_disambiguation_suffix(value: &str) -> String {
    disambiguation_suffix().replace(value, "").into_owned()
}

/// Free-text catalog query for an album. Ampersands become "and" so they
/// cannot be read as a query separator.
pub fn search_term(artist: &str, title: &str) -> String {
    format!("{} {}", artist.replace('&', "and"), title.replace('&', "and"))
}

pub fn upgrade_artwork(url: &str) -> String {
    url.replace(THUMBNAIL_SIZE, DISPLAY_SIZE)
}
