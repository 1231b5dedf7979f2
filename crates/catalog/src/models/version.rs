use serde::Deserialize;

/// One of an extension's available versions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionVersion {
    pub version: String,
    /// Downloadable assets attached to this version (icons, manifests, the
    /// VSIX package itself, …).
    #[serde(default)]
    pub files: Vec<AssetFile>,
}

/// A single downloadable artifact attached to a version.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    /// Dotted asset type identifier, e.g.
    /// `Microsoft.VisualStudio.Services.Icons.Small`.
    pub asset_type: String,
    pub source: String,
}
