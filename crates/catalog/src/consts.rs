//! Fixed values of the gallery wire protocol.

/// Public extension query endpoint of the Visual Studio Marketplace.
pub const QUERY_ENDPOINT: &str = "https://marketplace.visualstudio.com/_apis/public/gallery/extensionquery";

/// The gallery selects its response schema from this accept header.
pub const ACCEPT_HEADER: &str = "application/json;api-version=3.0-preview.1";

/// Installation target identifying the VS Code flavour of the marketplace.
pub const TARGET_VSCODE: &str = "Microsoft.VisualStudio.Code";

/// Criterion filter types understood by the gallery query endpoint.
pub mod filter {
    /// Match against the extension identifier (`publisher.name`).
    pub const EXTENSION_NAME: u32 = 7;
    /// Scope results to a product installation target.
    pub const INSTALLATION_TARGET: u32 = 8;
}

/// Facet flags selecting which optional data the gallery includes in its
/// response. Combined as a bitmask in the query body.
pub mod flags {
    pub const INCLUDE_VERSIONS: u32 = 0x01;
    pub const INCLUDE_FILES: u32 = 0x02;
    pub const INCLUDE_CATEGORY_AND_TAGS: u32 = 0x04;
    pub const INCLUDE_SHARED_ACCOUNTS: u32 = 0x08;
    pub const INCLUDE_VERSION_PROPERTIES: u32 = 0x10;
    pub const EXCLUDE_NON_VALIDATED: u32 = 0x20;
    pub const INCLUDE_INSTALLATION_TARGETS: u32 = 0x40;
    pub const INCLUDE_ASSET_URI: u32 = 0x80;
    pub const INCLUDE_STATISTICS: u32 = 0x100;

    /// Everything the resolution pipeline needs: versions, files and
    /// statistics must be present, the rest is included for template authors.
    pub const DEFAULT: u32 = INCLUDE_VERSIONS
        | INCLUDE_FILES
        | INCLUDE_CATEGORY_AND_TAGS
        | INCLUDE_SHARED_ACCOUNTS
        | INCLUDE_VERSION_PROPERTIES
        | EXCLUDE_NON_VALIDATED
        | INCLUDE_INSTALLATION_TARGETS
        | INCLUDE_ASSET_URI
        | INCLUDE_STATISTICS;
}

/// Well-known gallery asset types, in their dotted wire form.
pub mod asset {
    pub const ICON_SMALL: &str = "Microsoft.VisualStudio.Services.Icons.Small";
    pub const ICON_DEFAULT: &str = "Microsoft.VisualStudio.Services.Icons.Default";
    pub const DETAILS: &str = "Microsoft.VisualStudio.Services.Content.Details";
    pub const CHANGELOG: &str = "Microsoft.VisualStudio.Services.Content.Changelog";
    pub const LICENSE: &str = "Microsoft.VisualStudio.Services.Content.License";
    pub const MANIFEST: &str = "Microsoft.VisualStudio.Code.Manifest";
    pub const VSIX_PACKAGE: &str = "Microsoft.VisualStudio.Services.VSIXPackage";

    /// Asset types a template can rely on being addressable, whether or not
    /// the catalog returned a file for them.
    pub const WELL_KNOWN: [&str; 7] =
        [ICON_SMALL, ICON_DEFAULT, DETAILS, CHANGELOG, LICENSE, MANIFEST, VSIX_PACKAGE];
}
