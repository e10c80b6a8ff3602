use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while configuring or running a scoring pass.
///
/// Configuration errors abort the whole request. Document errors are
/// attached to the entry of the document that caused them.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
    #[error("document `{id}` has no terms left after stop-word removal")]
    EmptyDocument { id: String },
    #[error("could not decode `{id}`: {reason}")]
    DecodeFailure { id: String, reason: String },
}

impl MatchError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        MatchError::InvalidConfiguration { message: message.into() }
    }

    pub fn decode_failure(id: impl Into<String>, reason: impl Into<String>) -> Self {
        MatchError::DecodeFailure { id: id.into(), reason: reason.into() }
    }
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
