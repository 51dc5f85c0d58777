mod settings;
mod suggestion;

pub use settings::Settings;
pub use suggestion::{AlbumSuggestion, ArtistCredit, ReleaseSummary};
