use super::generation::VideoStyle;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use time::OffsetDateTime;
use uuid::Uuid;

// History never grows past this, whatever the configured capacity
pub const MAX_HISTORY_CAPACITY: usize = 50;
pub const DEFAULT_HISTORY_CAPACITY: usize = MAX_HISTORY_CAPACITY;

/// One submission attempt, successful or not
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub prompt: String,
    pub style: VideoStyle,
    pub length_seconds: u32,
    pub job_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(default)]
    pub viewed: bool,
}

impl HistoryEntry {
    pub fn new(
        prompt: impl Into<String>,
        style: VideoStyle,
        length_seconds: u32,
        job_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            style,
            length_seconds,
            job_id,
            timestamp: OffsetDateTime::now_utc(),
            viewed: false,
        }
    }
}

/// Bounded, most-recent-first log. Oldest entries are evicted once full.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_HISTORY_CAPACITY);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from a stored list that is already most-recent-first.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        log.entries.extend(entries.into_iter().take(log.capacity));
        log
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
