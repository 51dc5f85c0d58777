use thiserror::Error;

/// Ways a suggestion request can fail. Catalog enrichment problems never
/// show up here; they only leave the artwork and store link empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("The provided username is invalid")]
    InvalidUsername,

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Parsing failure: {0}")]
    ParsingFailure(String),

    #[error("No items found in the collection")]
    NoItems,

    #[error("Randomly chosen item index is out of range")]
    OutOfRange,
}

impl From<reqwest::Error> for SuggestionError {
    fn from(error: reqwest::Error) -> Self {
        SuggestionError::NetworkFailure(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SuggestionError>;
