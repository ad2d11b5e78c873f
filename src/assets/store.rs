//! Asset store: where the bytes behind a route live
//!
//! The registry and the store may disagree (e.g. a partially flashed UI
//! bundle); a missing asset is reported as `None` and never as an error.

use hyper::body::Bytes;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;

use crate::logger;

#[derive(Debug, Clone)]
pub enum AssetStore {
    /// Files under a root directory; asset `/a/b.css` maps to `<root>/a/b.css`
    Directory(PathBuf),
    /// In-memory bundle keyed by asset identifier
    Memory(HashMap<String, Bytes>),
}

impl AssetStore {
    pub fn directory(root: impl Into<PathBuf>) -> Self {
        Self::Directory(root.into())
    }

    pub fn memory() -> Self {
        Self::Memory(HashMap::new())
    }

    /// Add or replace an asset in an in-memory store. No effect on a directory store.
    pub fn insert(&mut self, asset: &str, content: impl Into<Bytes>) {
        if let Self::Memory(assets) = self {
            assets.insert(asset.to_string(), content.into());
        }
    }

    /// Drop an asset from an in-memory store. No effect on a directory store.
    pub fn remove(&mut self, asset: &str) -> Option<Bytes> {
        match self {
            Self::Memory(assets) => assets.remove(asset),
            Self::Directory(_) => None,
        }
    }

    /// Fetch the asset content, `None` when absent or unreadable
    pub async fn fetch(&self, asset: &str) -> Option<Bytes> {
        match self {
            Self::Memory(assets) => assets.get(asset).cloned(),
            Self::Directory(root) => {
                let file_path = root.join(asset.trim_start_matches('/'));
                match fs::read(&file_path).await {
                    Ok(content) => Some(Bytes::from(content)),
                    // Missing file is an expected 404, no need to log
                    Err(e) if e.kind() == ErrorKind::NotFound => None,
                    Err(e) => {
                        logger::log_error(&format!(
                            "Failed to read asset '{}': {e}",
                            file_path.display()
                        ));
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let mut store = AssetStore::memory();
        store.insert("/index.html", "<html></html>");
        assert_eq!(store.fetch("/index.html").await.unwrap(), "<html></html>");

        assert!(store.remove("/index.html").is_some());
        assert!(store.fetch("/index.html").await.is_none());
    }

    #[tokio::test]
    async fn test_directory_store() {
        let root = std::env::temp_dir().join(format!("benchpsu-assets-{}", std::process::id()));
        std::fs::create_dir_all(root.join("static/css")).unwrap();
        std::fs::write(root.join("static/css/main.css"), "body{}").unwrap();

        let store = AssetStore::directory(&root);
        assert_eq!(store.fetch("/static/css/main.css").await.unwrap(), "body{}");
        assert!(store.fetch("/static/css/missing.css").await.is_none());

        std::fs::remove_dir_all(&root).unwrap();
    }
}
