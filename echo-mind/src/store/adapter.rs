//! Store Adapter Traits
//!
//! `TigerStyle`: Abstract interfaces for persistence; the engines never
//! know what is behind them.
//!
//! The memory engine's sweep operations rewrite the whole record set.
//! Implementations only need to be atomic enough for a single writer;
//! concurrent mutation requires external mutual exclusion.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::memory::MemoryRecord;
use crate::state::{EchoState, LifeLog};

/// Backing store for the memory-record collection.
///
/// `TigerStyle`: All operations are async and return explicit errors.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Load every record.
    async fn list(&self) -> StoreResult<Vec<MemoryRecord>>;

    /// Append one record.
    async fn append(&self, record: &MemoryRecord) -> StoreResult<()>;

    /// Replace the whole collection.
    async fn overwrite(&self, records: &[MemoryRecord]) -> StoreResult<()>;
}

/// Backing store for the companion-state document.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the state, `None` if never saved.
    async fn load(&self) -> StoreResult<Option<EchoState>>;

    /// Save the state.
    async fn save(&self, state: &EchoState) -> StoreResult<()>;
}

/// Backing store for the companion's life log.
#[async_trait]
pub trait LifeLogStore: Send + Sync {
    /// Append one log entry.
    async fn append_log(&self, log: &LifeLog) -> StoreResult<()>;

    /// The most recent `limit` entries, oldest first.
    async fn recent_logs(&self, limit: usize) -> StoreResult<Vec<LifeLog>>;
}
