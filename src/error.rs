//! Error types for the protocol endpoint.

use thiserror::Error;

/// Result alias for protocol and server operations.
pub type Result<T> = std::result::Result<T, ShoalError>;

/// Errors that can occur while serving the wire protocol.
///
/// Unsupported versions and unknown topics are not errors here: they travel
/// back to the client as response error codes. Anything in this enum tears
/// down the one connection it happened on.
#[derive(Error, Debug)]
pub enum ShoalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated frame: {0}")]
    Truncated(&'static str),

    #[error("protocol error: {0}")]
    Protocol(String),
}
