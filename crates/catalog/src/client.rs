//! Resolution of identifiers against the gallery.

use crate::assets::AssetMap;
use crate::consts::{TARGET_VSCODE, flags};
use crate::error::Result;
use crate::identifier::{Identifier, VersionSelector};
use crate::models::{Extension, ExtensionVersion};
use crate::query::QueryRequest;
use crate::transport::{HttpTransport, QueryTransport};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Everything the renderer needs about one successfully resolved identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExtension {
    /// The identifier as the user requested it.
    pub requested: Identifier,
    /// The matched extension record (version list included).
    pub extension: Extension,
    /// The selected version, per the selector fallback rule.
    pub version: ExtensionVersion,
    /// The selected version's files, flattened for template lookup.
    pub assets: AssetMap,
}

/// Resolves identifiers to `(extension, version, assets)` via one gallery
/// query per identifier.
///
/// The client is stateless between calls and shares its transport across
/// concurrent resolutions; no results are cached.
pub struct CatalogClient {
    transport: Arc<dyn QueryTransport>,
    target: String,
    flags: u32,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn QueryTransport>) -> Self {
        Self { transport, target: TARGET_VSCODE.to_string(), flags: flags::DEFAULT }
    }

    /// Scope queries to a different installation target.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Override the facet flag bitmask. Callers must keep at least the
    /// versions, files and statistics facets enabled for resolution to
    /// produce renderable data.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Resolve one identifier.
    ///
    /// Returns `Ok(None)` when the gallery has no match for the name, or the
    /// match carries no versions — a resolution miss, not an error. `Err` is
    /// reserved for transport and decode failures; containing those at the
    /// per-identifier boundary is the caller's job.
    #[instrument(skip(self), fields(name = %identifier.name, selector = %identifier.version))]
    pub async fn resolve(&self, identifier: &Identifier) -> Result<Option<ResolvedExtension>> {
        let request = QueryRequest::by_name(&identifier.name, &self.target, self.flags);
        let response = self.transport.query(&request).await?;
        let Some(extension) = response.into_first_extension() else {
            debug!("no matching extension");
            return Ok(None);
        };
        let Some(version) = select_version(&extension.versions, &identifier.version).cloned() else {
            debug!("matched extension has no versions");
            return Ok(None);
        };
        let assets = AssetMap::from_files(&version.files);
        Ok(Some(ResolvedExtension { requested: identifier.clone(), extension, version, assets }))
    }
}
impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(Arc::new(HttpTransport::default()))
    }
}

/// Selection rule: the first version whose string exactly equals the
/// requested selector; when nothing matches (including `latest`, which is
/// never a version string), the first listed version.
fn select_version<'a>(
    versions: &'a [ExtensionVersion],
    selector: &VersionSelector,
) -> Option<&'a ExtensionVersion> {
    match selector {
        VersionSelector::Exact(wanted) => {
            versions.iter().find(|v| &v.version == wanted).or_else(|| versions.first())
        },
        VersionSelector::Latest => versions.first(),
    }
}
