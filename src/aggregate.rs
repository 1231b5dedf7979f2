//! Concurrent fan-out and deterministic assembly of a pass's document.
//!
//! All identifiers of a pass are resolved concurrently (up to
//! [`MAX_RESOLVE_CONCURRENCY`] in flight at once) and the settled fragments
//! are sorted by their pre-lowercased sort key before joining, so the final
//! document depends only on what resolved — never on submission order or on
//! which network call happened to finish first.

use crate::resolve::{Omission, Resolution, resolve_one};
use extdown_catalog::{CatalogClient, parse_list};
use extdown_render::FragmentRenderer;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::instrument;

/// Cap on concurrently outstanding gallery queries within one pass.
pub const MAX_RESOLVE_CONCURRENCY: usize = 16;

/// The assembled output of one completed pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Sorted fragment bodies joined with a single newline. Empty input
    /// yields an empty string.
    pub markdown: String,
    /// Identifiers that produced no fragment, with their reasons. These do
    /// not occupy placeholder slots in `markdown`.
    pub omissions: Vec<Omission>,
}

/// Resolves every identifier in `input` and assembles the document.
///
/// Pipelines settle independently: a failed or unmatched identifier becomes
/// an omission without blocking or failing the rest. The gather never
/// short-circuits — this function always waits for all pipelines and always
/// returns a document.
#[instrument(skip(client, renderer, input))]
pub async fn render_pass(
    client: &CatalogClient,
    renderer: &FragmentRenderer,
    input: &str,
    concurrency: usize,
) -> Document {
    let identifiers = parse_list(input);

    let mut pending: Vec<_> =
        identifiers.into_iter().map(|identifier| resolve_one(client, renderer, identifier)).collect();
    let mut in_flight = FuturesUnordered::new();
    in_flight.extend(pending.drain(..concurrency.max(1).min(pending.len())));

    let mut fragments = Vec::new();
    let mut omissions = Vec::new();
    while let Some(resolution) = in_flight.next().await {
        match resolution {
            Resolution::Resolved(fragment) => fragments.push(fragment),
            Resolution::Unresolved { identifier, reason } => {
                omissions.push(Omission { identifier, reason })
            },
        }
        // Pop-n-push, but FIFO instead of LIFO.
        if !pending.is_empty() {
            in_flight.push(pending.remove(0));
        }
    }

    // Keys are pre-lowercased, so plain lexicographic comparison is already
    // case-insensitive.
    fragments.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    let markdown =
        fragments.iter().map(|fragment| fragment.markdown.as_str()).collect::<Vec<_>>().join("\n");
    Document { markdown, omissions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extdown_catalog::MockTransport;
    use std::sync::Arc;
    use std::time::Duration;

    fn client(transport: MockTransport) -> CatalogClient {
        CatalogClient::new(Arc::new(transport))
    }

    fn renderer() -> FragmentRenderer {
        "{{ extension.display_name }}".parse().unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_yields_empty_document() {
        let document = render_pass(&client(MockTransport::default()), &renderer(), "", 8).await;
        assert_eq!(document.markdown, "");
        assert!(document.omissions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_follows_display_name_not_completion() {
        // Submitted in reverse alphabetical order of display name, and the
        // alphabetically-first one completes last by a wide margin.
        let transport = MockTransport::default()
            .with_extension("pub.c", MockTransport::extension("pub.c", "Charlie", "1.0.0"))
            .with_extension("pub.b", MockTransport::extension("pub.b", "Bravo", "1.0.0"))
            .with_extension("pub.a", MockTransport::extension("pub.a", "Alpha", "1.0.0"))
            .with_delay("pub.a", Duration::from_secs(5))
            .with_delay("pub.b", Duration::from_secs(2));

        let document = render_pass(&client(transport), &renderer(), "pub.c\npub.b\npub.a\n", 8).await;
        assert_eq!(document.markdown, "Alpha\nBravo\nCharlie");
    }

    #[tokio::test]
    async fn test_sort_is_case_insensitive_by_construction() {
        let transport = MockTransport::default()
            .with_extension("pub.a", MockTransport::extension("pub.a", "alpha", "1.0.0"))
            .with_extension("pub.b", MockTransport::extension("pub.b", "Bravo", "1.0.0"));

        let document = render_pass(&client(transport), &renderer(), "pub.b\npub.a", 8).await;
        assert_eq!(document.markdown, "alpha\nBravo");
    }

    #[tokio::test]
    async fn test_failing_identifier_does_not_block_the_rest() {
        let transport = MockTransport::default()
            .with_extension("pub.a", MockTransport::extension("pub.a", "Alpha", "1.0.0"))
            .failing("pub.broken")
            .with_extension("pub.c", MockTransport::extension("pub.c", "Charlie", "1.0.0"));

        let document =
            render_pass(&client(transport), &renderer(), "pub.a\npub.broken\npub.c", 8).await;
        assert_eq!(document.markdown, "Alpha\nCharlie");
        assert_eq!(document.omissions.len(), 1);
        assert_eq!(document.omissions[0].identifier.name, "pub.broken");
    }

    #[tokio::test]
    async fn test_unmatched_identifier_is_reported_not_rendered() {
        let transport = MockTransport::default()
            .with_extension("pub.a", MockTransport::extension("pub.a", "Alpha", "1.0.0"));

        let document = render_pass(&client(transport), &renderer(), "pub.a\npub.nope", 8).await;
        assert_eq!(document.markdown, "Alpha");
        assert_eq!(document.omissions.len(), 1);
        assert_eq!(document.omissions[0].reason, "no matching extension");
    }

    #[tokio::test(start_paused = true)]
    async fn test_more_identifiers_than_concurrency_all_settle() {
        let mut transport = MockTransport::default();
        let mut input = String::new();
        for i in 0..10 {
            let name = format!("pub.e{i}");
            transport = transport
                .with_extension(&name, MockTransport::extension(&name, &format!("Ext{i}"), "1.0.0"))
                .with_delay(&name, Duration::from_millis(50 * (10 - i as u64)));
            input.push_str(&name);
            input.push('\n');
        }

        let document = render_pass(&client(transport), &renderer(), &input, 3).await;
        assert_eq!(document.markdown.lines().count(), 10);
        assert!(document.omissions.is_empty());
    }
}
