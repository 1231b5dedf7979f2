pub mod error;
mod fragment;
mod numbers;
mod template;

pub use crate::fragment::Fragment;
pub use crate::numbers::NumberLocale;
pub use crate::template::{DEFAULT_ICON_URL, DEFAULT_TEMPLATE, FragmentRenderer};
