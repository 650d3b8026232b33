//! IPMA-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpmaError {
    #[error("Location id must not be empty")]
    EmptyLocationId,

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON decode error: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
