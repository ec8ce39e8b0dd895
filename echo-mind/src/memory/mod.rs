//! Layered memory with forgetting and consolidation dynamics.
//!
//! Records are created with heuristic importance scoring, retrieved by
//! keyword relevance (which reinforces them), eroded by a per-layer
//! forgetting curve, and promoted through short-term -> long-term ->
//! core as recall and importance accumulate.

mod engine;
mod record;
pub mod scoring;

pub use engine::{
    ConsolidationReport, ForgettingReport, LayerConfig, MemoryEngine, MemoryEngineConfig,
    MemoryError, MemoryResult, MemoryStats,
};
pub use record::{MemoryKind, MemoryLayer, MemoryRecord, MemorySource, Valence};
pub use scoring::ScoringConfig;
