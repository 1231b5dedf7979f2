//! Query transport trait and implementations.
//!
//! The gallery is only ever spoken to through [`QueryTransport`], so the
//! resolution pipeline can be exercised against a canned in-memory transport
//! in tests while production uses plain JSON-over-HTTPS.

mod http;
#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::http::HttpTransport;
#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockTransport;
use crate::error::Result;
use crate::query::{QueryRequest, QueryResponse};
// TODO: When `dyn async trait` stabilizes, migrate to native 2024 Edition async traits.
use async_trait::async_trait;

/// A single round trip to the gallery query endpoint.
///
/// Implementations perform no retries and no caching; one call to
/// [`query`](Self::query) is one outbound request.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// POST the query body and decode the response.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}
