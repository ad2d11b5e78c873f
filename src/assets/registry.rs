//! Asset registry: the fixed (method, path) dispatch table
//!
//! Paths match exactly and case-sensitively. There is no prefix, wildcard or
//! trailing-slash handling; `/index.html/` and `/Index.html` are unknown.

use hyper::Method;
use std::collections::HashMap;

use crate::http::mime;

/// One servable route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: Method,
    pub path: &'static str,
    /// Identifier of the backing asset in the asset store
    pub asset: &'static str,
    pub content_type: &'static str,
    /// Run the payload through the template engine before sending
    pub templated: bool,
}

impl RouteEntry {
    const fn get(
        path: &'static str,
        asset: &'static str,
        content_type: &'static str,
        templated: bool,
    ) -> Self {
        Self {
            method: Method::GET,
            path,
            asset,
            content_type,
            templated,
        }
    }

    /// Plain GET route whose asset id equals its path
    const fn file(path: &'static str, content_type: &'static str) -> Self {
        Self::get(path, path, content_type, false)
    }
}

/// PNG icons shipped with the UI bundle
const ICONS: [&str; 25] = [
    "/logo.png",
    "/android-icon-36x36.png",
    "/android-icon-48x48.png",
    "/android-icon-72x72.png",
    "/android-icon-96x96.png",
    "/android-icon-144x144.png",
    "/android-icon-192x192.png",
    "/apple-icon-57x57.png",
    "/apple-icon-60x60.png",
    "/apple-icon-72x72.png",
    "/apple-icon-76x76.png",
    "/apple-icon-114x114.png",
    "/apple-icon-120x120.png",
    "/apple-icon-144x144.png",
    "/apple-icon-152x152.png",
    "/apple-icon-180x180.png",
    "/apple-icon-precomposed.png",
    "/apple-icon.png",
    "/favicon-16x16.png",
    "/favicon-32x32.png",
    "/favicon-96x96.png",
    "/ms-icon-70x70.png",
    "/ms-icon-144x144.png",
    "/ms-icon-150x150.png",
    "/ms-icon-310x310.png",
];

/// Routes other than the icon set
fn page_routes() -> [RouteEntry; 8] {
    [
        RouteEntry::get("/", "/index.html", mime::HTML, true),
        RouteEntry::get("/index.html", "/index.html", mime::HTML, true),
        RouteEntry::file("/static/css/main.ddcf899a.css", mime::CSS),
        RouteEntry::file("/static/js/main.a4cfdbdd.js", mime::JAVASCRIPT),
        RouteEntry::file("/browserconfig.xml", mime::XML),
        RouteEntry::file("/favicon.ico", mime::ICO),
        RouteEntry::get("/manifest.json", "/manifest.json", mime::JSON, true),
        RouteEntry::get("/current-status", "/current-status.json", mime::JSON, true),
    ]
}

/// Immutable lookup table built once at startup
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    table: HashMap<Method, HashMap<&'static str, RouteEntry>>,
}

impl AssetRegistry {
    /// Registry holding the bundled web UI routes
    pub fn bundled() -> Self {
        let mut entries: Vec<RouteEntry> = page_routes().into_iter().collect();
        entries.extend(ICONS.into_iter().map(|icon| RouteEntry::file(icon, mime::PNG)));
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        let mut table: HashMap<Method, HashMap<&'static str, RouteEntry>> = HashMap::new();
        for entry in entries {
            table
                .entry(entry.method.clone())
                .or_default()
                .insert(entry.path, entry);
        }
        Self { table }
    }

    /// Exact (method, path) lookup
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        self.table.get(method)?.get(path)
    }

    /// GET lookup
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.lookup(&Method::GET, path)
    }

    pub fn len(&self) -> usize {
        self.table.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_routes() {
        let registry = AssetRegistry::bundled();
        assert_eq!(registry.len(), 33);

        let root = registry.resolve("/").unwrap();
        assert_eq!(root.asset, "/index.html");
        assert_eq!(root.content_type, "text/html");
        assert!(root.templated);

        let status = registry.resolve("/current-status").unwrap();
        assert_eq!(status.asset, "/current-status.json");
        assert_eq!(status.content_type, "application/json");
        assert!(status.templated);

        let icon = registry.resolve("/ms-icon-310x310.png").unwrap();
        assert_eq!(icon.content_type, "image/png");
        assert!(!icon.templated);
    }

    #[test]
    fn test_exact_match_only() {
        let registry = AssetRegistry::bundled();
        assert!(registry.resolve("/index.html").is_some());
        assert!(registry.resolve("/index.html/").is_none());
        assert!(registry.resolve("/Index.html").is_none());
        assert!(registry.resolve("/static/css").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_only_get_is_wired() {
        let registry = AssetRegistry::bundled();
        assert!(registry.lookup(&Method::GET, "/current-status").is_some());
        for method in [Method::PUT, Method::POST, Method::DELETE, Method::HEAD] {
            assert!(registry.lookup(&method, "/current-status").is_none());
        }
    }

    #[test]
    fn test_binary_assets_not_templated() {
        let registry = AssetRegistry::bundled();
        for path in ICONS.into_iter().chain(["/favicon.ico"]) {
            let entry = registry.resolve(path).unwrap();
            assert!(!entry.templated, "{path} should bypass templating");
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = AssetRegistry::from_entries(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.resolve("/").is_none());
        assert!(!AssetRegistry::bundled().is_empty());
    }
}
