//! Error types shared by the listener, the authorization flow, the playback
//! client and the coordinator.

use std::time::Duration;

use thiserror::Error;

/// Failures of a single authorization attempt.
///
/// `Clone` because one outcome is handed to every caller coalesced onto the
/// same attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization rejected by provider: {error}")]
    Denied {
        error: String,
        state: Option<String>,
    },

    #[error("no authorization callback within {0:?}")]
    Timeout(Duration),

    #[error("authorization callback carried an unexpected state")]
    StateMismatch,

    #[error("callback listener failed: {0}")]
    Listener(String),

    #[error("invalid redirect uri: {0}")]
    InvalidRedirect(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("unexpected provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
