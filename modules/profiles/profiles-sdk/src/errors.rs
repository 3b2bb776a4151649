//! Error types for the profiles SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfilesError {
    /// Any failure between issuing and completing a remote call.
    ///
    /// `message` is the single user-facing text; callers show it as-is.
    #[error("{message}")]
    Transport { message: String },

    /// The client could not be constructed from its configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ProfilesError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
