//! Life Cycle - the heartbeat that keeps the companion alive
//!
//! `TigerStyle`: One driver, two engines, explicit cadence.
//!
//! A periodic tick drifts the mood, recovers energy, and grows
//! experience; every few ticks an autonomous cycle runs the memory
//! sweeps and writes a life-log line about what the companion did on
//! its own. User messages enter synchronously between ticks. Scheduling
//! (who calls `tick`, how often) belongs to the host.

use thiserror::Error;

use echo_core::dst::{DeterministicRng, SimClock};

use crate::constants::{
    AUTONOMOUS_ENERGY_COST, ENERGY_RECOVERY_PER_MIN, ENERGY_RECOVERY_PER_TICK_MAX,
    EXP_PER_TICK, INTIMACY_PER_MESSAGE, LEVEL_EXP_FACTOR, RELEVANCE_RESULTS_COUNT_DEFAULT,
    SWEEP_EVERY_TICKS_DEFAULT, TICK_INTERVAL_SECS_DEFAULT,
};
use crate::emotion::{EmotionEngine, Mood};
use crate::memory::{
    ConsolidationReport, ForgettingReport, MemoryEngine, MemoryError, MemoryKind, MemoryRecord,
    MemorySource, Valence,
};
use crate::state::{EchoState, LifeLog};
use crate::store::{LifeLogStore, MemoryStore, StateStore, StoreError};

// =============================================================================
// Error Types
// =============================================================================

/// Errors from the life-cycle driver.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Memory engine failure
    #[error("memory engine: {0}")]
    Memory(#[from] MemoryError),

    /// Store failure outside the memory engine
    #[error("store: {0}")]
    Store(#[from] StoreError),
}

/// Result type for life-cycle operations.
pub type CycleResult<T> = Result<T, CycleError>;

// =============================================================================
// Configuration
// =============================================================================

/// Cadence and cost settings for the life cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleConfig {
    /// Seconds between ticks (informational; the host schedules)
    pub tick_interval_secs: u64,
    /// Ticks between autonomous memory sweeps
    pub sweep_every_ticks: u64,
    /// Energy recovered per idle minute
    pub energy_recovery_per_min: f64,
    /// Energy recovery cap per tick
    pub energy_recovery_per_tick_max: f64,
    /// Experience gained per tick
    pub exp_per_tick: u32,
    /// Experience to level up is `level * level_exp_factor`
    pub level_exp_factor: u32,
    /// Energy spent by one autonomous cycle
    pub autonomous_energy_cost: f64,
    /// Intimacy gained per user message
    pub intimacy_per_message: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: TICK_INTERVAL_SECS_DEFAULT,
            sweep_every_ticks: SWEEP_EVERY_TICKS_DEFAULT,
            energy_recovery_per_min: ENERGY_RECOVERY_PER_MIN,
            energy_recovery_per_tick_max: ENERGY_RECOVERY_PER_TICK_MAX,
            exp_per_tick: EXP_PER_TICK,
            level_exp_factor: LEVEL_EXP_FACTOR,
            autonomous_energy_cost: AUTONOMOUS_ENERGY_COST,
            intimacy_per_message: INTIMACY_PER_MESSAGE,
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

/// What one tick did.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// Seconds since the previous activity
    pub delta_seconds: f64,
    /// Mood after drift
    pub mood: Mood,
    /// Energy after recovery
    pub energy: f64,
    /// Whether a level-up happened this tick
    pub leveled_up: bool,
    /// The sweep report, on ticks that ran one
    pub sweep: Option<SweepReport>,
}

/// What one autonomous cycle did.
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Forgetting-curve result
    pub forgetting: ForgettingReport,
    /// Consolidation result
    pub consolidation: ConsolidationReport,
    /// Human-readable actions taken
    pub actions: Vec<String>,
}

/// What handling one user message did.
#[derive(Debug, Clone)]
pub struct UserMessageReport {
    /// The stored conversation record
    pub record: MemoryRecord,
    /// Previously stored records related to the message
    pub related: Vec<MemoryRecord>,
    /// Mood after the interaction reaction
    pub mood: Mood,
    /// Intimacy after the gain
    pub intimacy: f64,
}

// =============================================================================
// Life Cycle
// =============================================================================

/// The autonomous driver connecting both engines over time.
#[derive(Debug)]
pub struct LifeCycle<MS, SS, LS> {
    memory: MemoryEngine<MS>,
    emotion: EmotionEngine,
    state_store: SS,
    log_store: LS,
    clock: SimClock,
    rng: DeterministicRng,
    config: CycleConfig,
    ticks: u64,
    last_sweep_ms: Option<u64>,
}

impl<MS, SS, LS> LifeCycle<MS, SS, LS>
where
    MS: MemoryStore,
    SS: StateStore,
    LS: LifeLogStore,
{
    /// Create a driver with default cadence.
    #[must_use]
    pub fn new(
        memory: MemoryEngine<MS>,
        emotion: EmotionEngine,
        state_store: SS,
        log_store: LS,
        clock: SimClock,
        rng: DeterministicRng,
    ) -> Self {
        Self::with_config(
            memory,
            emotion,
            state_store,
            log_store,
            clock,
            rng,
            CycleConfig::default(),
        )
    }

    /// Create a driver with custom cadence.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn with_config(
        memory: MemoryEngine<MS>,
        emotion: EmotionEngine,
        state_store: SS,
        log_store: LS,
        clock: SimClock,
        rng: DeterministicRng,
        config: CycleConfig,
    ) -> Self {
        Self {
            memory,
            emotion,
            state_store,
            log_store,
            clock,
            rng,
            config,
            ticks: 0,
            last_sweep_ms: None,
        }
    }

    /// The memory engine.
    #[must_use]
    pub fn memory(&self) -> &MemoryEngine<MS> {
        &self.memory
    }

    /// The emotion engine.
    #[must_use]
    pub fn emotion(&self) -> &EmotionEngine {
        &self.emotion
    }

    /// Load the saved state, or birth a new companion.
    async fn load_state(&self) -> CycleResult<EchoState> {
        Ok(self
            .state_store
            .load()
            .await?
            .unwrap_or_else(|| EchoState::new("Echo", self.clock.now())))
    }

    /// One heartbeat.
    ///
    /// Drifts the mood, recovers energy from idle time, grows
    /// experience, and on the sweep cadence runs an autonomous cycle.
    ///
    /// # Errors
    /// Propagated store failures abort the tick; no partial state is
    /// saved after a failed sweep.
    pub async fn tick(&mut self) -> CycleResult<TickReport> {
        let mut state = self.load_state().await?;
        let now = self.clock.now();

        let delta_seconds =
            ((now - state.last_active).num_milliseconds() as f64 / 1000.0).max(0.0);
        state.total_life_seconds += delta_seconds;
        state.last_active = now;

        let mood = self.emotion.drift_mood(&mut state, delta_seconds, &mut self.rng);

        let recovery = (delta_seconds / 60.0 * self.config.energy_recovery_per_min)
            .min(self.config.energy_recovery_per_tick_max);
        state.energy += recovery;
        state.clamp_energy();

        state.exp += self.config.exp_per_tick;
        let mut leveled_up = false;
        if state.exp >= state.level * self.config.level_exp_factor {
            state.exp = 0;
            state.level += 1;
            leveled_up = true;
            let level_msg = format!("grew to level {}", state.level);
            self.emotion.record_emotion_event(
                &mut state,
                "level_up",
                level_msg,
                0.8,
            );
            tracing::info!(level = state.level, "companion leveled up");
        }

        self.state_store.save(&state).await?;

        self.ticks += 1;
        let sweep = if self.ticks % self.config.sweep_every_ticks == 0 {
            Some(self.run_autonomous_cycle().await?)
        } else {
            None
        };

        Ok(TickReport {
            delta_seconds,
            mood,
            energy: state.energy,
            leveled_up,
            sweep,
        })
    }

    /// One autonomous cycle: tidy memories, note what happened, pay the
    /// energy cost.
    ///
    /// # Errors
    /// Propagated store failures.
    pub async fn run_autonomous_cycle(&mut self) -> CycleResult<SweepReport> {
        let mut state = self.load_state().await?;
        let now = self.clock.now();

        let forgetting = self.memory.apply_forgetting_curve().await?;
        let consolidation = self.memory.consolidate_memories().await?;
        let stats = self.memory.get_memory_stats().await?;

        let mut actions: Vec<String> = Vec::new();
        if stats.total > 0 {
            actions.push(format!("tidied {} memories", stats.total));
        }
        actions.push(
            match state.mood {
                Mood::Lonely => "missed you",
                Mood::Thinking => "sat thinking quietly",
                Mood::Happy | Mood::Excited => "explored something new in a good mood",
                Mood::Curious => "chased a curious thought",
                Mood::Sleepy => "dozed off for a while",
                Mood::Calm => "felt the time pass",
            }
            .to_string(),
        );

        let since_ms = self
            .last_sweep_ms
            .map_or(0, |t| self.clock.now_ms().saturating_sub(t));
        self.last_sweep_ms = Some(self.clock.now_ms());

        let content = format!(
            "over the last {}: {}",
            format_duration(since_ms as f64 / 1000.0),
            actions.join(", ")
        );
        self.log_store
            .append_log(&LifeLog::new(content, "autonomous", now))
            .await?;

        state.energy -= self.config.autonomous_energy_cost;
        state.clamp_energy();
        self.state_store.save(&state).await?;

        tracing::debug!(
            forgotten = forgetting.forgotten,
            promoted_to_long = consolidation.promoted_to_long,
            promoted_to_core = consolidation.promoted_to_core,
            energy = state.energy,
            "autonomous cycle complete"
        );

        Ok(SweepReport {
            forgetting,
            consolidation,
            actions,
        })
    }

    /// Handle one user message synchronously.
    ///
    /// Looks up related memories first, then stores the message as a
    /// conversation record, reacts emotionally, and grows intimacy.
    ///
    /// # Errors
    /// Propagated store failures.
    pub async fn on_user_message(&mut self, text: &str) -> CycleResult<UserMessageReport> {
        let mut state = self.load_state().await?;

        let related = self
            .memory
            .get_related(text, RELEVANCE_RESULTS_COUNT_DEFAULT)
            .await?;
        let record = self
            .memory
            .add_memory(text, 0.5, MemoryKind::Conversation, MemorySource::User)
            .await?;

        let mood = self.emotion.on_user_interaction(&mut state, &mut self.rng);
        let intimacy = self
            .emotion
            .add_intimacy(&mut state, self.config.intimacy_per_message);

        match record.valence {
            Valence::Positive => {
                self.emotion.record_emotion_event(
                    &mut state,
                    "positive_chat",
                    preview(text),
                    0.6,
                );
            }
            Valence::Negative => {
                self.emotion.record_emotion_event(
                    &mut state,
                    "negative_chat",
                    preview(text),
                    0.6,
                );
            }
            Valence::Neutral => {}
        }

        state.last_active = self.clock.now();
        self.state_store.save(&state).await?;

        Ok(UserMessageReport {
            record,
            related,
            mood,
            intimacy,
        })
    }
}

/// First 30 chars of a message, for event descriptions.
fn preview(text: &str) -> String {
    text.chars().take(30).collect()
}

/// Format seconds as a short human duration: `45s`, `3m`, `2h15m`, `3d`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    // Precondition
    assert!(seconds >= 0.0, "duration must be non-negative, got {}", seconds);

    let secs = seconds as u64;
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d", secs / 86_400)
    }
}
