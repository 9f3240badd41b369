use super::LocalStore;
use crate::{
    error::StoreError,
    models::{
        history::{HistoryEntry, HistoryLog},
        preferences::Preferences,
    },
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: Mutex<HistoryLog>,
    preferences: Mutex<Preferences>,
}

impl MemoryStore {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: Mutex::new(HistoryLog::new(history_capacity)),
            preferences: Mutex::new(Preferences::default()),
        }
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn append_history(&self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.history.lock().await.push(entry);
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.history.lock().await.to_vec())
    }

    async fn load_preferences(&self) -> Result<Preferences, StoreError> {
        Ok(self.preferences.lock().await.clone())
    }

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        *self.preferences.lock().await = preferences.clone();
        Ok(())
    }
}
