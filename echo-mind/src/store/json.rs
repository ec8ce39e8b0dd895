//! `JsonFileStore` - File-Per-Collection Persistence
//!
//! A small document store: one pretty-printed JSON file per collection
//! under a data directory (`echo.json`, `memories.json`,
//! `life_logs.json`). Good for a single local companion; anything
//! multi-writer belongs behind a real database adapter.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::adapter::{LifeLogStore, MemoryStore, StateStore};
use super::error::{StoreError, StoreResult};
use crate::memory::MemoryRecord;
use crate::state::{EchoState, LifeLog};

/// JSON file store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    state_path: PathBuf,
    memories_path: PathBuf,
    logs_path: PathBuf,
}

impl JsonFileStore {
    /// Open (and lazily initialize) a store under `data_dir`.
    ///
    /// # Errors
    /// Fails if the directory cannot be created.
    pub async fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = data_dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| StoreError::write(format!("create {}: {e}", dir.display())))?;

        Ok(Self {
            state_path: dir.join("echo.json"),
            memories_path: dir.join("memories.json"),
            logs_path: dir.join("life_logs.json"),
        })
    }

    async fn read_or<T: DeserializeOwned>(path: &Path, default: T) -> StoreResult<T> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::serialization(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(default),
            Err(e) => Err(StoreError::read(format!("{}: {e}", path.display()))),
        }
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        tokio::fs::write(path, raw)
            .await
            .map_err(|e| StoreError::write(format!("{}: {e}", path.display())))
    }
}

#[async_trait]
impl MemoryStore for JsonFileStore {
    async fn list(&self) -> StoreResult<Vec<MemoryRecord>> {
        Self::read_or(&self.memories_path, Vec::new()).await
    }

    async fn append(&self, record: &MemoryRecord) -> StoreResult<()> {
        let mut records: Vec<MemoryRecord> =
            Self::read_or(&self.memories_path, Vec::new()).await?;
        records.push(record.clone());
        Self::write_json(&self.memories_path, &records).await
    }

    async fn overwrite(&self, records: &[MemoryRecord]) -> StoreResult<()> {
        Self::write_json(&self.memories_path, &records).await
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Option<EchoState>> {
        Self::read_or(&self.state_path, None).await
    }

    async fn save(&self, state: &EchoState) -> StoreResult<()> {
        Self::write_json(&self.state_path, state).await
    }
}

#[async_trait]
impl LifeLogStore for JsonFileStore {
    async fn append_log(&self, log: &LifeLog) -> StoreResult<()> {
        let mut logs: Vec<LifeLog> = Self::read_or(&self.logs_path, Vec::new()).await?;
        logs.push(log.clone());
        Self::write_json(&self.logs_path, &logs).await
    }

    async fn recent_logs(&self, limit: usize) -> StoreResult<Vec<LifeLog>> {
        let logs: Vec<LifeLog> = Self::read_or(&self.logs_path, Vec::new()).await?;
        let start = logs.len().saturating_sub(limit);
        Ok(logs[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryKind, MemoryLayer, MemorySource, Valence};
    use chrono::{TimeZone, Utc};

    fn record(content: &str) -> MemoryRecord {
        MemoryRecord {
            id: format!("mem_{content}"),
            content: content.to_string(),
            kind: MemoryKind::Knowledge,
            layer: MemoryLayer::LongTerm,
            importance: 0.8,
            strength: 1.0,
            recall_count: 0,
            last_recall_time: None,
            create_time: Utc.timestamp_opt(0, 0).unwrap(),
            tags: vec!["tag".to_string()],
            source: MemorySource::System,
            valence: Valence::Neutral,
        }
    }

    #[tokio::test]
    async fn test_empty_store_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        assert!(store.load().await.unwrap().is_none());
        assert!(store.recent_logs(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memories_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            store.append(&record("persisted")).await.unwrap();
        }
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "persisted");
        assert_eq!(all[0].layer, MemoryLayer::LongTerm);
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let born = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        {
            let store = JsonFileStore::open(dir.path()).await.unwrap();
            let mut state = EchoState::new("Echo", born);
            state.intimacy = 123.0;
            store.save(&state).await.unwrap();
        }
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let state = store.load().await.unwrap().unwrap();
        assert_eq!(state.intimacy, 123.0);
        assert_eq!(state.create_time, born);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("memories.json"), "not json")
            .await
            .unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }
}
