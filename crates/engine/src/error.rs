use thiserror::Error;
use yield_safety_data::DataError;
use yield_safety_domain::DomainError;

/// Errors surfaced by the safety engine.
///
/// Collaborator failures abort the whole assessment; no component is scored
/// from partial data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to fetch price bounds for {token}")]
    Bounds {
        token: String,
        #[source]
        source: DataError,
    },

    #[error("failed to fetch price history for {token}")]
    History {
        token: String,
        #[source]
        source: DataError,
    },

    #[error("invalid price bounds for {token}: {source}")]
    InvalidBounds {
        token: String,
        #[source]
        source: DomainError,
    },

    #[error("token {0} is not supported")]
    UnsupportedToken(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
