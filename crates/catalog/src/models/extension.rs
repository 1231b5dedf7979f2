use super::{ExtensionVersion, Statistic};
use serde::Deserialize;

/// A matched extension record as returned by the gallery.
///
/// Which of the optional facets (`versions`, `statistics`, …) are populated
/// depends on the facet flags sent with the query; anything the gallery
/// omitted deserializes to its empty default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Extension name without the publisher prefix.
    #[serde(default)]
    pub extension_name: String,
    /// Human-readable name shown in the marketplace listing.
    pub display_name: String,
    pub publisher: Publisher,
    #[serde(default)]
    pub short_description: String,
    /// Ordered list of numeric metrics (installs, ratings, …). The order is
    /// an observation about gallery responses, not a contract; prefer looking
    /// entries up by [`statistic_name`](Statistic::statistic_name).
    #[serde(default)]
    pub statistics: Vec<Statistic>,
    /// Available versions, most recent first.
    #[serde(default)]
    pub versions: Vec<ExtensionVersion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    #[serde(default)]
    pub publisher_name: String,
    pub display_name: String,
}
