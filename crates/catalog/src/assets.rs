//! Flattening of a version's file list into a template-addressable map.

use crate::models::AssetFile;
use std::collections::BTreeMap;

/// Converts a dotted asset type into a key a template path can address:
/// every `.` becomes `_`, e.g. `Microsoft.VisualStudio.Services.Icons.Small`
/// → `Microsoft_VisualStudio_Services_Icons_Small`.
pub fn normalize_asset_type(asset_type: &str) -> String {
    asset_type.replace('.', "_")
}

/// Mapping from normalized asset type to its source URL.
///
/// Built once per resolved version and never mutated afterwards. A
/// [`BTreeMap`] keeps iteration order deterministic so that anything derived
/// from the map (logs, rendered output) is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap(BTreeMap<String, String>);

impl AssetMap {
    /// Flattens a version's file list. An empty file list yields an empty
    /// map. When the gallery lists the same asset type twice the last entry
    /// wins.
    pub fn from_files(files: &[AssetFile]) -> Self {
        Self(
            files
                .iter()
                .map(|file| (normalize_asset_type(&file.asset_type), file.source.clone()))
                .collect(),
        )
    }

    /// Look up a source URL by *normalized* asset type key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn file(asset_type: &str, source: &str) -> AssetFile {
        AssetFile { asset_type: asset_type.to_string(), source: source.to_string() }
    }

    #[rstest]
    #[case("A.B.C", "A_B_C")]
    #[case("Microsoft.VisualStudio.Services.Icons.Small", "Microsoft_VisualStudio_Services_Icons_Small")]
    #[case("NoDots", "NoDots")]
    #[case("", "")]
    fn test_normalizes_every_dot(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_asset_type(input), expected);
    }

    #[test]
    fn test_builds_map_from_files() {
        let map = AssetMap::from_files(&[
            file("Microsoft.VisualStudio.Services.Icons.Small", "https://example.test/icon.png"),
            file("Microsoft.VisualStudio.Code.Manifest", "https://example.test/manifest.json"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("Microsoft_VisualStudio_Services_Icons_Small"),
            Some("https://example.test/icon.png")
        );
        assert_eq!(map.get("Microsoft.VisualStudio.Services.Icons.Small"), None);
    }

    #[test]
    fn test_empty_file_list_yields_empty_map() {
        assert!(AssetMap::from_files(&[]).is_empty());
    }
}
