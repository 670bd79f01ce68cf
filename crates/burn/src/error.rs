use thiserror::Error;

use crate::types::TokenKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no source wallet configured")]
    MissingWallet,

    #[error("wallet not found: {id}")]
    WalletNotFound { id: String },

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("burn not implemented for {kind}")]
    UnsupportedToken { kind: TokenKind },

    #[error("burn invocation failed: {message}")]
    Invocation { message: String },

    #[error("wallet registry error: {message}")]
    Registry { message: String },

    #[error("invalid schedule: {reason}")]
    InvalidSchedule { reason: String },

    #[error("unknown timezone: {timezone}")]
    UnknownTimezone { timezone: String },

    #[error(transparent)]
    Store(#[from] emberdash_store::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    #[must_use]
    pub fn wallet_not_found(id: impl Into<String>) -> Self {
        Self::WalletNotFound { id: id.into() }
    }

    #[must_use]
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unknown_timezone(timezone: impl Into<String>) -> Self {
        Self::UnknownTimezone {
            timezone: timezone.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
