use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid price pair: {pair}")]
    InvalidPair { pair: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl Error {
    #[must_use]
    pub fn invalid_pair(pair: impl Into<String>) -> Self {
        Self::InvalidPair { pair: pair.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
