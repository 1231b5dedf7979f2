mod extension;
mod statistic;
mod version;

pub use self::extension::{Extension, Publisher};
pub use self::statistic::Statistic;
pub use self::version::{AssetFile, ExtensionVersion};
