//! In-memory query transport for testing.

use super::QueryTransport;
use crate::error::{ErrorKind, Result};
use crate::models::Extension;
use crate::query::{QueryRequest, QueryResponse, ResultSet};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// In-memory transport serving canned responses keyed by queried name.
///
/// Names without a registered response resolve to an empty result set (a
/// resolution miss), names registered via [`failing`](Self::failing) produce
/// a transport error, and per-name latency can be injected to exercise
/// completion-order behaviour. All knobs are builder-style so test setup
/// reads as a single expression.
///
/// # Examples
///
/// ```
/// use extdown_catalog::{MockTransport, QueryTransport};
/// use extdown_catalog::query::QueryRequest;
/// use extdown_catalog::consts::{TARGET_VSCODE, flags};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = MockTransport::default()
///     .with_extension("pub.known", MockTransport::extension("pub.known", "Known", "1.0.0"))
///     .failing("pub.broken");
///
/// let request = QueryRequest::by_name("pub.missing", TARGET_VSCODE, flags::DEFAULT);
/// assert!(transport.query(&request).await.unwrap().into_first_extension().is_none());
/// # }
/// ```
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, QueryResponse>,
    failures: HashMap<String, ErrorKind>,
    delays: HashMap<String, Duration>,
}

impl MockTransport {
    /// Register a canned single-extension response for a queried name.
    pub fn with_extension(mut self, name: impl Into<String>, extension: Extension) -> Self {
        self.responses.insert(
            name.into(),
            QueryResponse { results: vec![ResultSet { extensions: vec![extension] }] },
        );
        self
    }

    /// Register a full canned response for a queried name.
    pub fn with_response(mut self, name: impl Into<String>, response: QueryResponse) -> Self {
        self.responses.insert(name.into(), response);
        self
    }

    /// Make queries for `name` fail with a transport error.
    pub fn failing(mut self, name: impl Into<String>) -> Self {
        self.failures.insert(name.into(), ErrorKind::Transport);
        self
    }

    /// Make queries for `name` fail with a specific error kind.
    pub fn failing_with(mut self, name: impl Into<String>, kind: ErrorKind) -> Self {
        self.failures.insert(name.into(), kind);
        self
    }

    /// Delay responses for `name`, simulating network latency.
    pub fn with_delay(mut self, name: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(name.into(), delay);
        self
    }

    /// Minimal extension fixture with a single version and no files.
    ///
    /// Tests needing statistics or assets should build [`Extension`]
    /// directly.
    pub fn extension(name: &str, display_name: &str, version: &str) -> Extension {
        use crate::models::{ExtensionVersion, Publisher};
        let (publisher_name, extension_name) = name.split_once('.').unwrap_or(("", name));
        Extension {
            extension_name: extension_name.to_string(),
            display_name: display_name.to_string(),
            publisher: Publisher {
                publisher_name: publisher_name.to_string(),
                display_name: publisher_name.to_string(),
            },
            short_description: String::new(),
            statistics: Vec::new(),
            versions: vec![ExtensionVersion { version: version.to_string(), files: Vec::new() }],
        }
    }
}

#[async_trait]
impl QueryTransport for MockTransport {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let name = request.queried_name().unwrap_or("").to_string();
        if let Some(delay) = self.delays.get(&name) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(kind) = self.failures.get(&name) {
            exn::bail!(kind.clone());
        }
        Ok(self.responses.get(&name).cloned().unwrap_or_default())
    }
}
