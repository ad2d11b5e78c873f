//! Request handler module
//!
//! Matches requests against the asset registry and serves the bundled UI.

pub mod router;

// Re-export main entry point
pub use router::{handle_request, route, RouteOutcome};
