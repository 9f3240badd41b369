//! Local key-value persistence for history and preferences.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::{
    error::StoreError,
    models::{history::HistoryEntry, preferences::Preferences},
};
use async_trait::async_trait;

#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Insert at the most-recent position, evicting the oldest entry when full.
    async fn append_history(&self, entry: HistoryEntry) -> Result<(), StoreError>;

    /// Most-recent-first.
    async fn load_history(&self) -> Result<Vec<HistoryEntry>, StoreError>;

    async fn load_preferences(&self) -> Result<Preferences, StoreError>;

    async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError>;
}
