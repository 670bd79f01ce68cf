use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expense not found: {id}")]
    NotFound { id: String },

    #[error("invalid date: {date}")]
    InvalidDate { date: String },

    #[error(transparent)]
    Store(#[from] emberdash_store::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    #[must_use]
    pub fn invalid_date(date: impl Into<String>) -> Self {
        Self::InvalidDate { date: date.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
