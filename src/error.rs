//! Top-Level Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Per-identifier failures never reach
//! these types; they are contained inside a pass as
//! [`Resolution::Unresolved`](crate::resolve::Resolution) outcomes.

use derive_more::{Display, Error};

/// A pass-level error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pass-level operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Settings could not be loaded or merged.
    #[display("issue with configuration")]
    Config,
    /// The pass's template failed to compile; affects every fragment, so it
    /// surfaces once for the whole pass.
    #[display("issue with the fragment template")]
    Template,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Config | Self::Template => false,
        }
    }
}
