//! On-disk cache for the sign-in token triple.
//!
//! `{data_dir}/session.json` holds the tokens issued at sign-in so a later
//! invocation can fetch the current credential session. A missing or
//! unreadable file simply means nobody is signed in. Cleared on sign-out.

use std::path::{Path, PathBuf};

use parley_types::auth::AuthTokens;

/// File-backed token cache.
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.json"),
        }
    }

    /// Load the cached tokens, if a readable cache exists.
    ///
    /// A corrupt cache is treated as absent; sign-in rewrites it.
    pub async fn load(&self) -> Option<AuthTokens> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::debug!("Failed to read {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                tracing::warn!("Discarding corrupt token cache: {err}");
                None
            }
        }
    }

    /// Persist the token triple issued at sign-in.
    pub async fn save(&self, tokens: &AuthTokens) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        tokio::fs::write(&self.path, content).await
    }

    /// Remove the cache. Missing file is fine.
    pub async fn clear(&self) -> std::io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access".to_string(),
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let cache = TokenCache::new(tmp.path());

        cache.save(&tokens()).await.unwrap();
        let loaded = cache.load().await.unwrap();
        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.username, "alice");
    }

    #[tokio::test]
    async fn load_missing_cache_returns_none() {
        let tmp = TempDir::new().unwrap();
        let cache = TokenCache::new(tmp.path());
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn load_corrupt_cache_returns_none() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("session.json"), "not json")
            .await
            .unwrap();
        let cache = TokenCache::new(tmp.path());
        assert!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_cache_and_tolerates_absence() {
        let tmp = TempDir::new().unwrap();
        let cache = TokenCache::new(tmp.path());

        cache.save(&tokens()).await.unwrap();
        cache.clear().await.unwrap();
        assert!(cache.load().await.is_none());

        // Clearing again is not an error.
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn save_creates_missing_data_dir() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("deeper");
        let cache = TokenCache::new(&nested);
        cache.save(&tokens()).await.unwrap();
        assert!(cache.load().await.is_some());
    }
}
