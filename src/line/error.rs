//! LINE adapter errors.

use reqwest::StatusCode;

/// Failures talking to or hearing from the LINE platform.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LINE API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}
