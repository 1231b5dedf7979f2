pub mod assets;
pub mod client;
pub mod consts;
pub mod error;
mod identifier;
pub mod models;
pub mod query;
pub mod transport;

pub use crate::assets::{AssetMap, normalize_asset_type};
pub use crate::client::{CatalogClient, ResolvedExtension};
pub use crate::identifier::{Identifier, VersionSelector, parse_list};
#[cfg(any(test, feature = "mock"))]
pub use crate::transport::MockTransport;
pub use crate::transport::{HttpTransport, QueryTransport};
