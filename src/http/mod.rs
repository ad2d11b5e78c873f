//! HTTP protocol layer module
//!
//! Content types and the response builder shared by the router.

pub mod mime;
pub mod response;

pub use response::{build_404_response, respond, CORS_HEADERS, NOT_FOUND_BODY};
