use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid Ethereum address: {address}")]
    InvalidAddress { address: String },

    #[error("wallet already added: {address}")]
    DuplicateAddress { address: String },

    #[error("wallet not found: {id}")]
    NotFound { id: String },

    #[error(transparent)]
    Store(#[from] emberdash_store::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    #[must_use]
    pub fn duplicate_address(address: impl Into<String>) -> Self {
        Self::DuplicateAddress {
            address: address.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
