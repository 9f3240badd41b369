use super::LocalStore;
use crate::{
    config::StorageConfig,
    error::StoreError,
    models::{
        history::{HistoryEntry, HistoryLog},
        preferences::Preferences,
    },
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const HISTORY_FILE: &str = "history.json";
const PREFERENCES_FILE: &str = "preferences.json";

/// Stores each key as a JSON document under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
    history_capacity: usize,
    // Serializes read-modify-write cycles on the history file
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, history_capacity: usize) -> Self {
        Self {
            dir: dir.into(),
            history_capacity,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.data_dir.clone(), config.history_capacity)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(value),
                Err(e) => {
                    // A corrupt document is treated like a missing one
                    warn!(path = %path.display(), "Discarding unreadable store file: {}", e);
                    Ok(T::default())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));

        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "Store file written");
        Ok(())
    }
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn append_history(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let stored: Vec<HistoryEntry> = self.read_json(HISTORY_FILE).await?;
        let mut log = HistoryLog::from_entries(stored, self.history_capacity);
        log.push(entry);

        self.write_json(HISTORY_FILE, &log.to_vec()).await
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let stored: Vec<HistoryEntry> = self.read_json(HISTORY_FILE).await?;
        Ok(HistoryLog::from_entries(stored, self.history_capacity).to_vec())
    }

    async fn load_preferences(&self) -> Result<Preferences, StoreError> {
        self.read_json(PREFERENCES_FILE).await
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_json(PREFERENCES_FILE, preferences).await
    }
}
