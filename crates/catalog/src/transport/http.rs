use super::QueryTransport;
use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::query::{QueryRequest, QueryResponse};
use async_trait::async_trait;
use exn::ResultExt;
use tracing::instrument;

/// JSON-over-HTTPS transport against the public gallery endpoint.
///
/// [`reqwest::Client`] holds a connection pool internally and is cheap to
/// clone; one `HttpTransport` is intended to serve every concurrent
/// resolution in a pass. No timeout is configured: a hung call stalls only
/// the identifier that issued it.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into() }
    }
}
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(consts::QUERY_ENDPOINT)
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    #[instrument(skip_all, fields(name = request.queried_name().unwrap_or("")))]
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", consts::ACCEPT_HEADER)
            .json(request)
            .send()
            .await
            .or_raise(|| ErrorKind::Transport)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        response.json().await.or_raise(|| ErrorKind::Decode)
    }
}
