//! Configuration loading and validation.

use crate::aggregate::MAX_RESOLVE_CONCURRENCY;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use extdown_catalog::consts::{QUERY_ENDPOINT, TARGET_VSCODE, flags};
use extdown_render::NumberLocale;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Runtime settings, merged from defaults, an optional `extdown.toml` file
/// and `EXTDOWN_*` environment variables (highest precedence last).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Gallery query endpoint URL.
    pub endpoint: String,
    /// Installation target the query is scoped to.
    pub target: String,
    /// Facet flag bitmask sent with every query.
    pub flags: u32,
    /// Maximum number of in-flight gallery queries per pass.
    pub concurrency: usize,
    /// Separators used by the `grouped` template helper.
    pub locale: NumberLocale,
    /// Template used when a pass does not supply its own.
    pub template: Option<String>,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: QUERY_ENDPOINT.to_string(),
            target: TARGET_VSCODE.to_string(),
            flags: flags::DEFAULT,
            concurrency: MAX_RESOLVE_CONCURRENCY,
            locale: NumberLocale::default(),
            template: None,
        }
    }
}
impl Settings {
    /// Loads settings from the standard provider stack.
    pub fn load() -> Result<Self> {
        Self::figment().extract().or_raise(|| ErrorKind::Config)
    }

    /// The provider stack used by [`load`](Self::load), exposed so tests and
    /// embedders can merge their own providers on top.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("extdown.toml"))
            .merge(Env::prefixed("EXTDOWN_"))
    }
}
