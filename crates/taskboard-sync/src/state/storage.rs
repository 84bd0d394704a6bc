/*
[INPUT]:  Session token strings
[OUTPUT]: Token persisted across restarts under a fixed key
[POS]:    Persistence layer - session token storage
[UPDATE]: When the on-disk session format changes
*/

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "jwt_token";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    NoDataDir,
}

type Result<T> = std::result::Result<T, StorageError>;

/// Client-local persistent storage for the session token
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, token: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for Box<T> {
    async fn load(&self) -> Result<Option<String>> {
        (**self).load().await
    }

    async fn save(&self, token: &str) -> Result<()> {
        (**self).save(token).await
    }

    async fn clear(&self) -> Result<()> {
        (**self).clear().await
    }
}

/// JSON object on disk, e.g. `{"jwt_token": "..."}`.
///
/// Other keys in the file are preserved on save and clear.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/taskboard/session.json`
    pub fn in_data_dir() -> Result<Self> {
        let dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(dir.join("taskboard").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Entries to rewrite on save or clear. An unreadable file is replaced.
    async fn entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_entries().await {
            Err(StorageError::Json(err)) => {
                warn!(path = %self.path.display(), error = %err, "discarding malformed session file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(entries)?;

        // Atomic write: write to a per-write temp file then rename
        let temp_path = self.path.with_extension(format!("{}.tmp", Uuid::new_v4()));
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let entries = self.read_entries().await?;
        Ok(entries.get(TOKEN_KEY).filter(|t| !t.is_empty()).cloned())
    }

    async fn save(&self, token: &str) -> Result<()> {
        let mut entries = self.entries_for_write().await?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries_for_write().await?;
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await?;
        debug!(path = %self.path.display(), "session token cleared");
        Ok(())
    }
}

/// In-process store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Current contents, without going through the async trait
    pub fn peek(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, value: Option<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = value;
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.peek())
    }

    async fn save(&self, token: &str) -> Result<()> {
        self.set(Some(token.to_string()));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.set(None);
        Ok(())
    }
}
