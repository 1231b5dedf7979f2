//! Pass management and stale-result suppression.

use crate::aggregate::{Document, render_pass};
use crate::config::Settings;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use extdown_catalog::{CatalogClient, HttpTransport, QueryTransport};
use extdown_render::{DEFAULT_TEMPLATE, FragmentRenderer};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Runs resolution passes and guarantees that a superseded pass can never
/// overwrite a newer pass's output.
///
/// Every call to [`run`](Self::run) takes a fresh, monotonically increasing
/// pass token. When the pass settles, its token is compared against the
/// latest issued one: if a newer pass has started in the meantime the result
/// is discarded and `Ok(None)` is returned. In-flight network calls of a
/// stale pass are not cancelled — their results are simply never published.
///
/// Interior state sits behind an [`RwLock`], so all methods take `&self` and
/// a `Session` can be shared across tasks in an `Arc`.
pub struct Session {
    client: CatalogClient,
    settings: Settings,
    pass: AtomicU64,
    latest: RwLock<Option<Document>>,
}

impl Session {
    /// Session speaking JSON-over-HTTPS to the configured endpoint.
    pub fn new(settings: Settings) -> Self {
        let transport = HttpTransport::new(&settings.endpoint);
        Self::with_transport(settings, Arc::new(transport))
    }

    /// Session over a caller-supplied transport (used by tests).
    pub fn with_transport(settings: Settings, transport: Arc<dyn QueryTransport>) -> Self {
        let client = CatalogClient::new(transport)
            .with_target(settings.target.clone())
            .with_flags(settings.flags);
        Self { client, settings, pass: AtomicU64::new(0), latest: RwLock::new(None) }
    }

    /// The template a defaulted pass renders with: the configured override,
    /// or the built-in default.
    pub fn template(&self) -> &str {
        self.settings.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Runs one pass with the session's default template.
    pub async fn run(&self, input: &str) -> Result<Option<Document>> {
        self.run_with_template(input, self.template()).await
    }

    /// Runs one pass over `input` with the given template.
    ///
    /// Returns `Ok(Some(document))` when this pass completed and is still
    /// the newest; `Ok(None)` when a newer pass superseded it while it was
    /// in flight. A template that fails to compile surfaces once here as
    /// [`ErrorKind::Template`] — the per-identifier pipelines never start.
    #[instrument(skip_all)]
    pub async fn run_with_template(&self, input: &str, template: &str) -> Result<Option<Document>> {
        let token = self.pass.fetch_add(1, Ordering::SeqCst) + 1;
        let renderer = FragmentRenderer::with_locale(template, self.settings.locale)
            .or_raise(|| ErrorKind::Template)?;

        let document =
            render_pass(&self.client, &renderer, input, self.settings.concurrency).await;

        // Token check and publish form one critical section: checking before
        // taking the lock would let a stale pass overwrite a newer document
        // published while it awaited the lock.
        let mut latest = self.latest.write().await;
        if self.pass.load(Ordering::SeqCst) != token {
            debug!(token, "pass superseded, discarding result");
            return Ok(None);
        }
        *latest = Some(document.clone());
        Ok(Some(document))
    }

    /// The document of the most recent completed, non-superseded pass.
    pub async fn latest(&self) -> Option<Document> {
        self.latest.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extdown_catalog::MockTransport;
    use std::time::Duration;

    fn session(transport: MockTransport) -> Arc<Session> {
        let settings = Settings {
            template: Some("{{ extension.display_name }}".to_string()),
            ..Settings::default()
        };
        Arc::new(Session::with_transport(settings, Arc::new(transport)))
    }

    #[tokio::test]
    async fn test_completed_pass_is_published() {
        let transport = MockTransport::default()
            .with_extension("pub.a", MockTransport::extension("pub.a", "Alpha", "1.0.0"));
        let session = session(transport);

        let document = session.run("pub.a").await.unwrap().unwrap();
        assert_eq!(document.markdown, "Alpha");
        assert_eq!(session.latest().await, Some(document));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_pass_never_overwrites_newer_output() {
        let transport = MockTransport::default()
            .with_extension("pub.slow", MockTransport::extension("pub.slow", "Slow", "1.0.0"))
            .with_delay("pub.slow", Duration::from_secs(60))
            .with_extension("pub.fast", MockTransport::extension("pub.fast", "Fast", "1.0.0"));
        let session = session(transport);

        // First pass stalls on the network; a second pass starts meanwhile.
        let stale = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.run("pub.slow").await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let fresh = session.run("pub.fast").await.unwrap().unwrap();
        assert_eq!(fresh.markdown, "Fast");

        // The slow pass eventually settles but is discarded.
        assert!(stale.await.unwrap().unwrap().is_none());
        assert_eq!(session.latest().await.unwrap().markdown, "Fast");
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_the_newest_pass_publishes_among_many() {
        // Three passes started in quick succession, settling in reverse
        // order: the newest settles first and publishes; every older pass
        // settles afterwards and must be discarded at the publish lock.
        let transport = MockTransport::default()
            .with_extension("pub.one", MockTransport::extension("pub.one", "One", "1.0.0"))
            .with_delay("pub.one", Duration::from_secs(50))
            .with_extension("pub.two", MockTransport::extension("pub.two", "Two", "1.0.0"))
            .with_delay("pub.two", Duration::from_secs(30))
            .with_extension("pub.three", MockTransport::extension("pub.three", "Three", "1.0.0"))
            .with_delay("pub.three", Duration::from_secs(10));
        let session = session(transport);

        let mut passes = Vec::new();
        for input in ["pub.one", "pub.two", "pub.three"] {
            let session = Arc::clone(&session);
            passes.push(tokio::spawn(async move { session.run(input).await }));
            // Keep token order identical to spawn order.
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert!(passes.remove(0).await.unwrap().unwrap().is_none());
        assert!(passes.remove(0).await.unwrap().unwrap().is_none());
        assert_eq!(passes.remove(0).await.unwrap().unwrap().unwrap().markdown, "Three");
        assert_eq!(session.latest().await.unwrap().markdown, "Three");
    }

    #[tokio::test]
    async fn test_malformed_template_surfaces_once_per_pass() {
        let session = Session::with_transport(Settings::default(), Arc::new(MockTransport::default()));
        assert!(session.run_with_template("pub.a", "{% if broken %}").await.is_err());
        assert_eq!(session.latest().await, None);
    }
}
