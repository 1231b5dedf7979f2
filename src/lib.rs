//! Turn a pasted `name[@version]` extension list into a Markdown document.
//!
//! Each identifier is resolved against the marketplace gallery, its selected
//! version's assets are flattened, and the result is merged into a
//! user-editable template; fragments are assembled in a deterministic order
//! regardless of network completion order. See [`Session`] for the main
//! entry point.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod resolve;
mod session;

pub use crate::aggregate::{Document, MAX_RESOLVE_CONCURRENCY, render_pass};
pub use crate::config::Settings;
pub use crate::resolve::{Omission, Resolution};
pub use crate::session::Session;

pub use extdown_catalog as catalog;
pub use extdown_render as render;
