//! Memory Engine - layered retention with forgetting dynamics
//!
//! `TigerStyle`: Explicit thresholds, injected configuration,
//! deterministic decisions.
//!
//! Records live in three layers with distinct decay rates and
//! capacities. Recall reinforces; time erodes; consolidation promotes.
//! Sweep operations rewrite the whole record set (single-writer
//! contract, see the store module).

use std::collections::HashSet;

use thiserror::Error;

use echo_core::dst::SimClock;

use crate::constants::{
    CORE_CAPACITY_COUNT_MAX, LONG_TERM_CAPACITY_COUNT_MAX, LONG_TERM_DECAY_PER_HOUR,
    LONG_TERM_STRENGTH_FLOOR, MEMORY_IMPORTANCE_MAX, MEMORY_IMPORTANCE_TRUSTED_MIN,
    MEMORY_LONG_TERM_IMPORTANCE_MIN, PROMOTE_CORE_IMPORTANCE_MIN, PROMOTE_CORE_RECALL_COUNT_MIN,
    PROMOTE_CORE_STRENGTH_MIN, PROMOTE_LONG_IMPORTANCE_MIN, PROMOTE_LONG_RECALL_COUNT_MIN,
    RECALL_RESISTANCE_FACTOR, RECALL_STRENGTH_BONUS, RELEVANCE_AGE_HALFLIFE_HOURS,
    RELEVANCE_LAYER_BONUS_CORE, RELEVANCE_LAYER_BONUS_LONG, RELEVANCE_LAYER_BONUS_SHORT,
    SHORT_TERM_CAPACITY_COUNT_MAX, SHORT_TERM_DECAY_PER_HOUR, SHORT_TERM_PRUNE_STRENGTH_MIN,
    SUMMARY_CONTENT_CHARS_MAX,
};
use crate::memory::scoring::{detect_valence, extract_tags, score_importance, ScoringConfig};
use crate::memory::{MemoryKind, MemoryLayer, MemoryRecord, MemorySource};
use crate::store::{MemoryStore, StoreError};

// =============================================================================
// Error Types
// =============================================================================

/// Errors from memory-engine operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Content was empty or whitespace
    #[error("content is empty")]
    EmptyContent,

    /// Query was empty or whitespace
    #[error("query is empty")]
    EmptyQuery,

    /// The backing store failed; propagated, never retried here
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for memory-engine operations.
pub type MemoryResult<T> = Result<T, MemoryError>;

// =============================================================================
// Configuration
// =============================================================================

/// Per-layer retention settings.
#[derive(Debug, Clone, Copy)]
pub struct LayerConfig {
    /// Strength lost per hour (before recall resistance)
    pub decay_per_hour: f64,
    /// Maximum records kept in this layer
    pub capacity: usize,
    /// Relevance multiplier for this layer
    pub relevance_bonus: f64,
}

/// All tunables of the memory engine, injected at construction.
#[derive(Debug, Clone)]
pub struct MemoryEngineConfig {
    /// Short-term layer settings
    pub short_term: LayerConfig,
    /// Long-term layer settings
    pub long_term: LayerConfig,
    /// Core layer settings (decay rate is ignored: core never decays)
    pub core: LayerConfig,
    /// Short-term records below this strength are forgotten
    pub prune_strength_min: f64,
    /// Long-term strength never drops below this
    pub long_term_strength_floor: f64,
    /// Strength restored per recall
    pub recall_strength_bonus: f64,
    /// Per-recall factor in the decay-resistance divisor
    pub recall_resistance_factor: f64,
    /// Recalls for short-term -> long-term promotion
    pub promote_long_recall_count_min: u32,
    /// Importance for short-term -> long-term promotion
    pub promote_long_importance_min: f64,
    /// Recalls for long-term -> core promotion
    pub promote_core_recall_count_min: u32,
    /// Importance for long-term -> core promotion
    pub promote_core_importance_min: f64,
    /// Strength for long-term -> core promotion
    pub promote_core_strength_min: f64,
    /// New records at or above this importance start long-term
    pub long_term_importance_min: f64,
    /// Caller importance below this is recomputed from content
    pub importance_trusted_min: f64,
    /// Age half-life in the relevance score
    pub age_halflife_hours: f64,
    /// Content-scoring keyword tables
    pub scoring: ScoringConfig,
}

impl Default for MemoryEngineConfig {
    fn default() -> Self {
        Self {
            short_term: LayerConfig {
                decay_per_hour: SHORT_TERM_DECAY_PER_HOUR,
                capacity: SHORT_TERM_CAPACITY_COUNT_MAX,
                relevance_bonus: RELEVANCE_LAYER_BONUS_SHORT,
            },
            long_term: LayerConfig {
                decay_per_hour: LONG_TERM_DECAY_PER_HOUR,
                capacity: LONG_TERM_CAPACITY_COUNT_MAX,
                relevance_bonus: RELEVANCE_LAYER_BONUS_LONG,
            },
            core: LayerConfig {
                decay_per_hour: 0.0,
                capacity: CORE_CAPACITY_COUNT_MAX,
                relevance_bonus: RELEVANCE_LAYER_BONUS_CORE,
            },
            prune_strength_min: SHORT_TERM_PRUNE_STRENGTH_MIN,
            long_term_strength_floor: LONG_TERM_STRENGTH_FLOOR,
            recall_strength_bonus: RECALL_STRENGTH_BONUS,
            recall_resistance_factor: RECALL_RESISTANCE_FACTOR,
            promote_long_recall_count_min: PROMOTE_LONG_RECALL_COUNT_MIN,
            promote_long_importance_min: PROMOTE_LONG_IMPORTANCE_MIN,
            promote_core_recall_count_min: PROMOTE_CORE_RECALL_COUNT_MIN,
            promote_core_importance_min: PROMOTE_CORE_IMPORTANCE_MIN,
            promote_core_strength_min: PROMOTE_CORE_STRENGTH_MIN,
            long_term_importance_min: MEMORY_LONG_TERM_IMPORTANCE_MIN,
            importance_trusted_min: MEMORY_IMPORTANCE_TRUSTED_MIN,
            age_halflife_hours: RELEVANCE_AGE_HALFLIFE_HOURS,
            scoring: ScoringConfig::default(),
        }
    }
}

impl MemoryEngineConfig {
    fn layer(&self, layer: MemoryLayer) -> &LayerConfig {
        match layer {
            MemoryLayer::ShortTerm => &self.short_term,
            MemoryLayer::LongTerm => &self.long_term,
            MemoryLayer::Core => &self.core,
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Aggregate result of one forgetting sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForgettingReport {
    /// Short-term records deleted below the strength floor
    pub forgotten: usize,
    /// Surviving records whose strength decreased
    pub weakened: usize,
    /// Records examined (including core)
    pub total: usize,
}

/// Aggregate result of one consolidation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Records promoted short-term -> long-term
    pub promoted_to_long: usize,
    /// Records promoted long-term -> core
    pub promoted_to_core: usize,
    /// Records deleted by capacity enforcement
    pub pruned: usize,
}

/// Per-layer record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// All records
    pub total: usize,
    /// Short-term records
    pub short_term: usize,
    /// Long-term records
    pub long_term: usize,
    /// Core records
    pub core: usize,
}

// =============================================================================
// Memory Engine
// =============================================================================

/// The memory lifecycle engine.
///
/// Owns creation, relevance retrieval with reinforcement, the
/// forgetting curve, consolidation, and capacity pruning. Storage and
/// time are injected.
#[derive(Debug)]
pub struct MemoryEngine<S> {
    store: S,
    config: MemoryEngineConfig,
    clock: SimClock,
}

impl<S: MemoryStore> MemoryEngine<S> {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new(store: S, clock: SimClock) -> Self {
        Self::with_config(store, clock, MemoryEngineConfig::default())
    }

    /// Create an engine with custom configuration.
    #[must_use]
    pub fn with_config(store: S, clock: SimClock, config: MemoryEngineConfig) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// The injected clock.
    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Remember something.
    ///
    /// A caller-supplied importance below the trust threshold is
    /// recomputed from the content heuristics. Records important enough
    /// skip the short-term layer entirely.
    ///
    /// # Errors
    /// `EmptyContent`, or a propagated store failure.
    pub async fn add_memory(
        &self,
        content: &str,
        importance: f64,
        kind: MemoryKind,
        source: MemorySource,
    ) -> MemoryResult<MemoryRecord> {
        if content.trim().is_empty() {
            return Err(MemoryError::EmptyContent);
        }

        let importance = if importance < self.config.importance_trusted_min {
            score_importance(content, &self.config.scoring)
        } else {
            importance.min(MEMORY_IMPORTANCE_MAX)
        };

        let tags = extract_tags(content, &self.config.scoring);
        let valence = detect_valence(content, &self.config.scoring);
        let layer = if importance >= self.config.long_term_importance_min {
            MemoryLayer::LongTerm
        } else {
            MemoryLayer::ShortTerm
        };

        let record = MemoryRecord::new(
            content.to_string(),
            kind,
            layer,
            importance,
            tags,
            source,
            valence,
            self.clock.now(),
        );

        self.store.append(&record).await?;
        tracing::debug!(
            id = %record.id,
            layer = %record.layer,
            importance = record.importance,
            "memory added"
        );
        Ok(record)
    }

    /// Retrieve the records most relevant to a query, reinforcing them.
    ///
    /// Recall is never read-only: every returned record gets its recall
    /// count bumped, its recall time stamped, and a strength bonus, all
    /// persisted before this returns.
    ///
    /// # Errors
    /// `EmptyQuery`, or a propagated store failure.
    pub async fn get_related(
        &self,
        query: &str,
        top_n: usize,
    ) -> MemoryResult<Vec<MemoryRecord>> {
        if query.trim().is_empty() {
            return Err(MemoryError::EmptyQuery);
        }

        let now = self.clock.now();
        let mut records = self.store.list().await?;

        // Query tokens: whitespace words plus the query's own tag
        // extraction (catches punctuation-separated phrases).
        let lowered_query = query.to_lowercase();
        let mut tokens: Vec<String> = lowered_query
            .split_whitespace()
            .map(str::to_string)
            .collect();
        for tag in extract_tags(query, &self.config.scoring) {
            if !tokens.contains(&tag) {
                tokens.push(tag);
            }
        }

        let mut scored: Vec<(f64, usize)> = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let overlap = overlap(record, &tokens);
            if overlap == 0 {
                continue;
            }

            let time_factor = (-record.age_hours(now) / self.config.age_halflife_hours).exp();
            let bonus = self.config.layer(record.layer).relevance_bonus;
            let score =
                overlap as f64 * record.importance * record.strength * time_factor * bonus;
            scored.push((score, index));
        }

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        let selected: Vec<usize> = scored.into_iter().take(top_n).map(|(_, i)| i).collect();
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        for &index in &selected {
            let record = &mut records[index];
            record.recall_count += 1;
            record.last_recall_time = Some(now);
            record.strength = (record.strength + self.config.recall_strength_bonus).min(1.0);
        }
        self.store.overwrite(&records).await?;

        Ok(selected.into_iter().map(|i| records[i].clone()).collect())
    }

    /// Decay every non-core record and forget what faded out.
    ///
    /// Frequently recalled records resist decay; long-term strength is
    /// floored; short-term records below the prune floor are deleted.
    /// The surviving set is rewritten in one store operation.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn apply_forgetting_curve(&self) -> MemoryResult<ForgettingReport> {
        let now = self.clock.now();
        let records = self.store.list().await?;

        let mut report = ForgettingReport {
            total: records.len(),
            ..ForgettingReport::default()
        };
        let mut survivors = Vec::with_capacity(records.len());

        for mut record in records {
            if record.layer == MemoryLayer::Core {
                // Core memories are immortal: no decay, ever.
                survivors.push(record);
                continue;
            }

            let hours = record.hours_since_recall(now);
            let rate = self.config.layer(record.layer).decay_per_hour;
            let resistance =
                1.0 / (1.0 + f64::from(record.recall_count) * self.config.recall_resistance_factor);
            let mut new_strength = record.strength * (-rate * hours * resistance).exp();

            if record.layer == MemoryLayer::LongTerm {
                new_strength = new_strength.max(self.config.long_term_strength_floor);
            }
            if record.layer == MemoryLayer::ShortTerm
                && new_strength < self.config.prune_strength_min
            {
                report.forgotten += 1;
                continue;
            }

            if new_strength < record.strength {
                report.weakened += 1;
            }
            record.strength = new_strength;
            survivors.push(record);
        }

        self.store.overwrite(&survivors).await?;
        tracing::info!(
            forgotten = report.forgotten,
            weakened = report.weakened,
            total = report.total,
            "forgetting sweep complete"
        );
        Ok(report)
    }

    /// Promote qualifying records and enforce layer capacities.
    ///
    /// Each record is evaluated once against its pre-pass layer, so a
    /// promotion this pass cannot chain into a second one. Capacity
    /// overflow prunes the weakest members of the overflowing layer.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn consolidate_memories(&self) -> MemoryResult<ConsolidationReport> {
        let mut records = self.store.list().await?;
        let mut report = ConsolidationReport::default();

        for record in &mut records {
            match record.layer {
                MemoryLayer::ShortTerm
                    if record.recall_count >= self.config.promote_long_recall_count_min
                        || record.importance >= self.config.promote_long_importance_min =>
                {
                    record.layer = MemoryLayer::LongTerm;
                    report.promoted_to_long += 1;
                }
                MemoryLayer::LongTerm
                    if record.recall_count >= self.config.promote_core_recall_count_min
                        && record.importance >= self.config.promote_core_importance_min
                        && record.strength >= self.config.promote_core_strength_min =>
                {
                    record.layer = MemoryLayer::Core;
                    report.promoted_to_core += 1;
                }
                _ => {}
            }
        }

        // Capacity enforcement: weakest beyond the cutoff are dropped.
        let mut doomed: HashSet<String> = HashSet::new();
        for layer in [MemoryLayer::ShortTerm, MemoryLayer::LongTerm, MemoryLayer::Core] {
            let capacity = self.config.layer(layer).capacity;
            let mut members: Vec<&MemoryRecord> =
                records.iter().filter(|r| r.layer == layer).collect();
            if members.len() <= capacity {
                continue;
            }
            members.sort_by(|a, b| b.strength.total_cmp(&a.strength));
            for record in &members[capacity..] {
                doomed.insert(record.id.clone());
            }
        }
        report.pruned = doomed.len();
        records.retain(|r| !doomed.contains(&r.id));

        self.store.overwrite(&records).await?;
        tracing::info!(
            promoted_to_long = report.promoted_to_long,
            promoted_to_core = report.promoted_to_core,
            pruned = report.pruned,
            "consolidation complete"
        );
        Ok(report)
    }

    /// A short text preview of the most defining memories.
    ///
    /// Pure read: core first, then by importance; content truncated per
    /// entry.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn summarize(&self, limit: usize) -> MemoryResult<String> {
        let mut records = self.store.list().await?;
        if records.is_empty() {
            return Ok("no memories yet".to_string());
        }

        records.sort_by(|a, b| {
            a.layer
                .priority()
                .cmp(&b.layer.priority())
                .then(b.importance.total_cmp(&a.importance))
        });

        let parts: Vec<String> = records
            .iter()
            .take(limit)
            .map(|r| {
                let preview: String = r.content.chars().take(SUMMARY_CONTENT_CHARS_MAX).collect();
                format!("[{}] {}", r.layer, preview)
            })
            .collect();
        Ok(parts.join("; "))
    }

    /// Per-layer record counts.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn get_memory_stats(&self) -> MemoryResult<MemoryStats> {
        let records = self.store.list().await?;
        let mut stats = MemoryStats {
            total: records.len(),
            ..MemoryStats::default()
        };
        for record in &records {
            match record.layer {
                MemoryLayer::ShortTerm => stats.short_term += 1,
                MemoryLayer::LongTerm => stats.long_term += 1,
                MemoryLayer::Core => stats.core += 1,
            }
        }

        // Postcondition
        assert_eq!(
            stats.total,
            stats.short_term + stats.long_term + stats.core,
            "layer counts must sum to total"
        );
        Ok(stats)
    }

    /// The newest records of one kind. Pure read, no reinforcement.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn recall_by_type(
        &self,
        kind: MemoryKind,
        limit: usize,
    ) -> MemoryResult<Vec<MemoryRecord>> {
        let mut records = self.store.list().await?;
        records.retain(|r| r.kind == kind);
        records.sort_by(|a, b| b.create_time.cmp(&a.create_time));
        records.truncate(limit);
        Ok(records)
    }

    /// The newest records regardless of kind. Pure read.
    ///
    /// # Errors
    /// A propagated store failure.
    pub async fn get_recent(&self, limit: usize) -> MemoryResult<Vec<MemoryRecord>> {
        let mut records = self.store.list().await?;
        records.sort_by(|a, b| b.create_time.cmp(&a.create_time));
        records.truncate(limit);
        Ok(records)
    }
}

/// A query token matches a record through an exact tag hit or by
/// containment in the content. Containment is what makes
/// single-character CJK queries usable; content has no word boundaries
/// to intersect on.
fn overlap(record: &MemoryRecord, tokens: &[String]) -> usize {
    let content = record.content.to_lowercase();
    tokens
        .iter()
        .filter(|token| {
            record.tags.iter().any(|tag| tag == *token) || content.contains(token.as_str())
        })
        .count()
}

// =============================================================================
// DST Tests (Deterministic Simulation Testing)
// =============================================================================
