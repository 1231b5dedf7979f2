//! The per-identifier resolution pipeline.

use extdown_catalog::{CatalogClient, Identifier};
use extdown_render::{Fragment, FragmentRenderer};
use tracing::{instrument, warn};

/// The outcome of resolving a single identifier.
///
/// Every pipeline settles to one of these; failures are data, not errors, so
/// one identifier's bad day can never abort its siblings. Unresolved entries
/// are excluded from the rendered document but reported on
/// [`Document::omissions`](crate::aggregate::Document::omissions).
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The identifier resolved and rendered to a Markdown fragment.
    Resolved(Fragment),
    /// The identifier produced no fragment, with the reason why.
    Unresolved { identifier: Identifier, reason: String },
}

/// An identifier that contributed nothing to a pass's document.
#[derive(Debug, Clone, PartialEq)]
pub struct Omission {
    pub identifier: Identifier,
    pub reason: String,
}

/// Runs the full pipeline for one identifier: gallery query → version
/// selection → asset extraction → template render.
///
/// Transport, decode and render failures are all converted into
/// [`Resolution::Unresolved`] here — this boundary is what keeps concurrent
/// siblings isolated from each other.
#[instrument(skip(client, renderer), fields(name = %identifier.name))]
pub async fn resolve_one(
    client: &CatalogClient,
    renderer: &FragmentRenderer,
    identifier: Identifier,
) -> Resolution {
    match client.resolve(&identifier).await {
        Ok(Some(resolved)) => match renderer.render(&resolved) {
            Ok(fragment) => Resolution::Resolved(fragment),
            Err(error) => {
                warn!(%error, "fragment render failed");
                Resolution::Unresolved { identifier, reason: error.to_string() }
            },
        },
        Ok(None) => {
            Resolution::Unresolved { identifier, reason: "no matching extension".to_string() }
        },
        Err(error) => {
            warn!(%error, "gallery query failed");
            Resolution::Unresolved { identifier, reason: error.to_string() }
        },
    }
}
