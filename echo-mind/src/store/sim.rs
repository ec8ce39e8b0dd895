//! `SimStore` - In-Memory Store for Testing
//!
//! `TigerStyle`: Deterministic testing with fault injection.
//!
//! Implements all three store traits over `Arc<RwLock<..>>` collections.
//! A shared `FaultInjector` lets tests fail any read or write with a
//! chosen probability while staying fully reproducible.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use echo_core::dst::{DeterministicRng, FaultInjector, FaultType};

use super::adapter::{LifeLogStore, MemoryStore, StateStore};
use super::error::{StoreError, StoreResult};
use crate::memory::MemoryRecord;
use crate::state::{EchoState, LifeLog};

/// In-memory store backend for tests and examples.
///
/// Clones share state, like the engines expect of a real backend.
#[derive(Debug, Clone)]
pub struct SimStore {
    records: Arc<RwLock<Vec<MemoryRecord>>>,
    state: Arc<RwLock<Option<EchoState>>>,
    logs: Arc<RwLock<Vec<LifeLog>>>,
    faults: Arc<FaultInjector>,
}

impl SimStore {
    /// Create a store with no registered faults.
    #[must_use]
    pub fn new() -> Self {
        Self::with_faults(Arc::new(FaultInjector::new(DeterministicRng::new(0))))
    }

    /// Create a store sharing the given fault injector.
    #[must_use]
    pub fn with_faults(faults: Arc<FaultInjector>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            state: Arc::new(RwLock::new(None)),
            logs: Arc::new(RwLock::new(Vec::new())),
            faults,
        }
    }

    /// Number of stored memory records (for tests).
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Number of stored life logs (for tests).
    #[must_use]
    pub fn log_count(&self) -> usize {
        self.logs.read().unwrap().len()
    }

    fn check_fault(&self, operation: &str) -> StoreResult<()> {
        if let Some(fault) = self.faults.should_inject(operation) {
            tracing::debug!(operation, fault = fault.as_str(), "injecting store fault");
            return Err(match fault {
                FaultType::StoreReadFail | FaultType::StoreWriteFail => {
                    StoreError::simulated_fault(fault.as_str())
                }
            });
        }
        Ok(())
    }
}

impl Default for SimStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemoryStore for SimStore {
    async fn list(&self) -> StoreResult<Vec<MemoryRecord>> {
        self.check_fault("memory.list")?;
        Ok(self.records.read().unwrap().clone())
    }

    async fn append(&self, record: &MemoryRecord) -> StoreResult<()> {
        self.check_fault("memory.append")?;
        self.records.write().unwrap().push(record.clone());
        Ok(())
    }

    async fn overwrite(&self, records: &[MemoryRecord]) -> StoreResult<()> {
        self.check_fault("memory.overwrite")?;
        *self.records.write().unwrap() = records.to_vec();
        Ok(())
    }
}

#[async_trait]
impl StateStore for SimStore {
    async fn load(&self) -> StoreResult<Option<EchoState>> {
        self.check_fault("state.load")?;
        Ok(self.state.read().unwrap().clone())
    }

    async fn save(&self, state: &EchoState) -> StoreResult<()> {
        self.check_fault("state.save")?;
        *self.state.write().unwrap() = Some(state.clone());
        Ok(())
    }
}

#[async_trait]
impl LifeLogStore for SimStore {
    async fn append_log(&self, log: &LifeLog) -> StoreResult<()> {
        self.check_fault("log.append")?;
        self.logs.write().unwrap().push(log.clone());
        Ok(())
    }

    async fn recent_logs(&self, limit: usize) -> StoreResult<Vec<LifeLog>> {
        self.check_fault("log.recent")?;
        let logs = self.logs.read().unwrap();
        let start = logs.len().saturating_sub(limit);
        Ok(logs[start..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryKind, MemoryLayer, MemorySource, Valence};
    use chrono::{TimeZone, Utc};
    use echo_core::dst::FaultConfig;

    fn record(content: &str) -> MemoryRecord {
        MemoryRecord {
            id: format!("mem_{content}"),
            content: content.to_string(),
            kind: MemoryKind::Conversation,
            layer: MemoryLayer::ShortTerm,
            importance: 0.5,
            strength: 1.0,
            recall_count: 0,
            last_recall_time: None,
            create_time: Utc.timestamp_opt(0, 0).unwrap(),
            tags: vec![],
            source: MemorySource::User,
            valence: Valence::Neutral,
        }
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let store = SimStore::new();
        store.append(&record("one")).await.unwrap();
        store.append(&record("two")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].content, "one");
    }

    #[tokio::test]
    async fn test_overwrite_replaces() {
        let store = SimStore::new();
        store.append(&record("one")).await.unwrap();
        store.overwrite(&[record("two")]).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "two");
    }

    #[tokio::test]
    async fn test_state_round_trip() {
        let store = SimStore::new();
        assert!(store.load().await.unwrap().is_none());

        let state = EchoState::new("Echo", Utc.timestamp_opt(0, 0).unwrap());
        store.save(&state).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().name, "Echo");
    }

    #[tokio::test]
    async fn test_recent_logs_tail() {
        let store = SimStore::new();
        for i in 0..5 {
            let log = LifeLog::new(format!("day {i}"), "autonomous", Utc::now());
            store.append_log(&log).await.unwrap();
        }
        let recent = store.recent_logs(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "day 3");
    }

    #[tokio::test]
    async fn test_write_fault_propagates() {
        let mut injector = FaultInjector::new(DeterministicRng::new(42));
        injector.register(FaultConfig::new(FaultType::StoreWriteFail, 1.0));
        let store = SimStore::with_faults(Arc::new(injector));

        let err = store.append(&record("doomed")).await.unwrap_err();
        assert!(err.is_transient());
        // Reads are unaffected by the write fault
        assert!(store.list().await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SimStore::new();
        let other = store.clone();
        store.append(&record("shared")).await.unwrap();
        assert_eq!(other.record_count(), 1);
    }
}
