//! Fallback cache of previously-favorited target IDs.
//!
//! When a list fetch fails, the store can still show a best-effort view of
//! which targets were favorited the last time a fetch succeeded. Only
//! successful list fetches rewrite the file; mutations never touch it, so
//! it is a read-only fallback, not a write-through cache.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

/// Returns the default fallback cache path.
///
/// - Linux: `~/.cache/cfomatch/interests.json`
/// - macOS: `~/Library/Caches/cfomatch/interests.json`
/// - Windows: `%LOCALAPPDATA%\cfomatch\interests.json`
pub fn default_fallback_path() -> PathBuf {
    dirs::cache_dir()
        .map(|c| c.join("cfomatch"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("interests.json")
}

/// JSON-file cache of favorited target IDs.
#[derive(Debug, Clone)]
pub struct FallbackCache {
    path: PathBuf,
}

impl FallbackCache {
    /// Creates a cache at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a cache at the default location.
    pub fn default_location() -> Self {
        Self::new(default_fallback_path())
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached ID list. A missing file is an IO error; callers
    /// treat any failure as "no fallback available".
    pub async fn load(&self) -> Result<Vec<String>, StoreError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let ids = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "Fallback cache loaded");
        Ok(ids)
    }

    /// Replaces the cached ID list, writing atomically via temp file plus
    /// rename.
    pub async fn store(&self, ids: &[String]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string(ids)?;
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), count = ids.len(), "Fallback cache written");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
