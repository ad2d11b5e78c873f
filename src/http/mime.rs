//! Content types used by the asset registry

pub const HTML: &str = "text/html";
pub const CSS: &str = "text/css";
pub const JAVASCRIPT: &str = "application/javascript";
pub const JSON: &str = "application/json";
pub const XML: &str = "application/xml";
pub const PNG: &str = "image/png";
pub const ICO: &str = "image/vnd.microsoft.icon";
pub const PLAIN_TEXT: &str = "text/plain";
