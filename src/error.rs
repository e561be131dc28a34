//! Error types for build labelling

use thiserror::Error;

use crate::version::Version;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Value cannot be absent: {0}")]
    ArgumentNull(&'static str),

    #[error("The 'BuildNumberFormat' value did not contain '{{0}}' as required (this will be replaced by the version number).")]
    InvalidFormat,

    #[error("The Label from the previous result was not a valid assembly version number.")]
    InvalidPreviousLabel(String),

    #[error("Revision counter exhausted for version {0}")]
    RevisionExhausted(Version),

    #[error("Invalid version '{0}': expected four dot-separated integers")]
    InvalidVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the caller broke the contract (bad template, bad previous label, missing input)
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::ArgumentNull(_) | Error::InvalidFormat | Error::InvalidPreviousLabel(_)
        )
    }
}
