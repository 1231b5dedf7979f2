//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The query never produced a usable HTTP response.
    #[display("gallery query transport failure")]
    Transport,
    /// The gallery answered with a non-success HTTP status.
    #[display("gallery returned HTTP status {_0}")]
    Status(#[error(not(source))] u16),
    /// The response body could not be decoded as a gallery query result.
    #[display("malformed gallery response")]
    Decode,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport => true,
            Self::Status(status) => *status >= 500,
            Self::Decode => false,
        }
    }
}
