//! Bundled web UI assets
//!
//! The registry decides which paths exist; the store supplies their bytes.

pub mod registry;
pub mod store;

pub use registry::{AssetRegistry, RouteEntry};
pub use store::AssetStore;
