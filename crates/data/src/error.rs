use thiserror::Error;
use yield_safety_domain::DomainError;

/// Failure reported by a bounds or history provider.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no market data for token {token}")]
    NotFound { token: String },

    #[error("invalid market data for token {token}: {reason}")]
    InvalidData { token: String, reason: String },

    #[error("timestamp {0} is before the Unix epoch")]
    InvalidTimestamp(i64),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DataError {
    pub fn not_found(token: impl Into<String>) -> Self {
        Self::NotFound {
            token: token.into(),
        }
    }

    pub fn invalid(token: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidData {
            token: token.into(),
            reason: reason.to_string(),
        }
    }
}
