//! `TigerStyle` Constants
//!
//! All limits use big-endian naming with units in the name:
//! `SHORT_TERM_CAPACITY_COUNT_MAX`, not `MAX_SHORT_TERM`.

// =============================================================================
// Memory Record Limits
// =============================================================================

/// Minimum importance value
pub const MEMORY_IMPORTANCE_MIN: f64 = 0.0;

/// Maximum importance value
pub const MEMORY_IMPORTANCE_MAX: f64 = 1.0;

/// Caller-supplied importance below this is recomputed from content
pub const MEMORY_IMPORTANCE_TRUSTED_MIN: f64 = 0.6;

/// Base importance for the content heuristic
pub const MEMORY_IMPORTANCE_BASE: f64 = 0.3;

/// Bonus per content-length step
pub const MEMORY_IMPORTANCE_LENGTH_BONUS: f64 = 0.1;

/// First content-length step (chars)
pub const MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_1: usize = 50;

/// Second content-length step (chars)
pub const MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_2: usize = 100;

/// Bonus per matched emotion keyword
pub const MEMORY_IMPORTANCE_EMOTION_BONUS: f64 = 0.05;

/// One-shot bonus when a personal pattern is present
pub const MEMORY_IMPORTANCE_PERSONAL_BONUS: f64 = 0.1;

/// Records created at or above this importance start in the long-term layer
pub const MEMORY_LONG_TERM_IMPORTANCE_MIN: f64 = 0.8;

/// Maximum number of tags per record
pub const MEMORY_TAGS_COUNT_MAX: usize = 8;

/// Minimum tag token length (chars)
pub const MEMORY_TAG_CHARS_MIN: usize = 2;

// =============================================================================
// Memory Layer Dynamics
// =============================================================================

/// Short-term decay rate per hour
pub const SHORT_TERM_DECAY_PER_HOUR: f64 = 0.15;

/// Long-term decay rate per hour
pub const LONG_TERM_DECAY_PER_HOUR: f64 = 0.005;

/// Short-term layer capacity
pub const SHORT_TERM_CAPACITY_COUNT_MAX: usize = 50;

/// Long-term layer capacity
pub const LONG_TERM_CAPACITY_COUNT_MAX: usize = 200;

/// Core layer capacity
pub const CORE_CAPACITY_COUNT_MAX: usize = 30;

/// Short-term records below this strength are forgotten
pub const SHORT_TERM_PRUNE_STRENGTH_MIN: f64 = 0.1;

/// Long-term strength never decays below this floor
pub const LONG_TERM_STRENGTH_FLOOR: f64 = 0.3;

/// Strength restored to a record on each recall
pub const RECALL_STRENGTH_BONUS: f64 = 0.1;

/// Per-recall factor in the decay-resistance divisor `1 + n * factor`
pub const RECALL_RESISTANCE_FACTOR: f64 = 0.3;

/// Recalls needed for short-term -> long-term promotion
pub const PROMOTE_LONG_RECALL_COUNT_MIN: u32 = 3;

/// Importance needed for short-term -> long-term promotion
pub const PROMOTE_LONG_IMPORTANCE_MIN: f64 = 0.7;

/// Recalls needed for long-term -> core promotion
pub const PROMOTE_CORE_RECALL_COUNT_MIN: u32 = 10;

/// Importance needed for long-term -> core promotion
pub const PROMOTE_CORE_IMPORTANCE_MIN: f64 = 0.85;

/// Strength needed for long-term -> core promotion
pub const PROMOTE_CORE_STRENGTH_MIN: f64 = 0.8;

// =============================================================================
// Relevance Retrieval
// =============================================================================

/// Age half-life in the relevance score (one week)
pub const RELEVANCE_AGE_HALFLIFE_HOURS: f64 = 168.0;

/// Relevance multiplier for core records
pub const RELEVANCE_LAYER_BONUS_CORE: f64 = 2.0;

/// Relevance multiplier for long-term records
pub const RELEVANCE_LAYER_BONUS_LONG: f64 = 1.5;

/// Relevance multiplier for short-term records
pub const RELEVANCE_LAYER_BONUS_SHORT: f64 = 1.0;

/// Default number of related records returned
pub const RELEVANCE_RESULTS_COUNT_DEFAULT: usize = 5;

// =============================================================================
// Summaries
// =============================================================================

/// Content preview length in summaries (chars)
pub const SUMMARY_CONTENT_CHARS_MAX: usize = 50;

/// Default number of records in a summary
pub const SUMMARY_COUNT_DEFAULT: usize = 5;

// =============================================================================
// Energy
// =============================================================================

/// Energy floor
pub const ENERGY_MIN: f64 = 0.0;

/// Energy ceiling
pub const ENERGY_MAX: f64 = 100.0;

/// Energy restored by one user interaction
pub const INTERACTION_ENERGY_BONUS: f64 = 3.0;

/// Below this the companion is exhausted
pub const ENERGY_EXHAUSTED_THRESHOLD: f64 = 20.0;

/// Below this the companion is tired
pub const ENERGY_TIRED_THRESHOLD: f64 = 40.0;

/// Above this the companion is energetic
pub const ENERGY_HIGH_THRESHOLD: f64 = 80.0;

// =============================================================================
// Mood Drift Modulation
// =============================================================================

/// Sleepy bonus when exhausted
pub const DRIFT_EXHAUSTED_SLEEPY_BONUS: f64 = 40.0;

/// Excited penalty when exhausted (floored at 0)
pub const DRIFT_EXHAUSTED_EXCITED_PENALTY: f64 = 10.0;

/// Happy penalty when exhausted (floored at 0)
pub const DRIFT_EXHAUSTED_HAPPY_PENALTY: f64 = 5.0;

/// Sleepy bonus when tired
pub const DRIFT_TIRED_SLEEPY_BONUS: f64 = 15.0;

/// Thinking bonus when tired
pub const DRIFT_TIRED_THINKING_BONUS: f64 = 10.0;

/// Happy bonus when energetic
pub const DRIFT_ENERGETIC_HAPPY_BONUS: f64 = 10.0;

/// Excited bonus when energetic
pub const DRIFT_ENERGETIC_EXCITED_BONUS: f64 = 8.0;

/// Curious bonus when energetic
pub const DRIFT_ENERGETIC_CURIOUS_BONUS: f64 = 8.0;

/// Sleepy penalty when energetic (floored at 0)
pub const DRIFT_ENERGETIC_SLEEPY_PENALTY: f64 = 10.0;

/// Idle seconds after which loneliness rises sharply
pub const IDLE_LONELY_SECS: f64 = 3600.0;

/// Idle seconds after which loneliness starts rising
pub const IDLE_RESTLESS_SECS: f64 = 1800.0;

/// Lonely bonus past the long-idle threshold
pub const DRIFT_IDLE_LONELY_BONUS: f64 = 40.0;

/// Lonely bonus past the short-idle threshold
pub const DRIFT_RESTLESS_LONELY_BONUS: f64 = 20.0;

// =============================================================================
// Intimacy
// =============================================================================

/// Offline hours with no intimacy decay
pub const INTIMACY_DECAY_GRACE_HOURS: f64 = 24.0;

/// Decay rate per day past the grace window
pub const INTIMACY_DECAY_RATE_PER_DAY: f64 = 0.02;

/// Maximum total decay rate
pub const INTIMACY_DECAY_RATE_MAX: f64 = 0.2;

/// Fraction of intimacy always retained through an absence
pub const INTIMACY_RETENTION_FLOOR: f64 = 0.8;

// =============================================================================
// Emotion Events
// =============================================================================

/// Maximum retained emotion events (FIFO)
pub const EMOTION_MEMORY_COUNT_MAX: usize = 50;

/// Events considered in tendency analysis
pub const EMOTION_TENDENCY_WINDOW_COUNT: usize = 20;

/// Recency half-life for tendency weights
pub const EMOTION_TENDENCY_HALFLIFE_HOURS: f64 = 12.0;

/// Age assumed for events with an unusable timestamp
pub const EMOTION_EVENT_FALLBACK_AGE_HOURS: f64 = 24.0;

/// Default intensity for emotion events
pub const EMOTION_EVENT_INTENSITY_DEFAULT: f64 = 0.5;

/// Default count for recent-emotion queries
pub const EMOTION_RECENT_COUNT_DEFAULT: usize = 10;

// =============================================================================
// Life Cycle
// =============================================================================

/// Seconds between ticks
pub const TICK_INTERVAL_SECS_DEFAULT: u64 = 30;

/// Ticks between autonomous memory sweeps
pub const SWEEP_EVERY_TICKS_DEFAULT: u64 = 10;

/// Energy recovered per idle minute
pub const ENERGY_RECOVERY_PER_MIN: f64 = 1.0;

/// Energy recovery cap per tick
pub const ENERGY_RECOVERY_PER_TICK_MAX: f64 = 5.0;

/// Experience gained per tick
pub const EXP_PER_TICK: u32 = 1;

/// Experience needed to level up is `level * LEVEL_EXP_FACTOR`
pub const LEVEL_EXP_FACTOR: u32 = 100;

/// Energy spent by one autonomous cycle
pub const AUTONOMOUS_ENERGY_COST: f64 = 5.0;

/// Intimacy gained by an ordinary chat message
pub const INTIMACY_PER_MESSAGE: f64 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_dynamics_consistent() {
        assert!(SHORT_TERM_DECAY_PER_HOUR > LONG_TERM_DECAY_PER_HOUR);
        assert!(SHORT_TERM_PRUNE_STRENGTH_MIN < LONG_TERM_STRENGTH_FLOOR);
        assert!(LONG_TERM_CAPACITY_COUNT_MAX > SHORT_TERM_CAPACITY_COUNT_MAX);
    }

    #[test]
    fn test_promotion_thresholds_ordered() {
        assert!(PROMOTE_CORE_RECALL_COUNT_MIN > PROMOTE_LONG_RECALL_COUNT_MIN);
        assert!(PROMOTE_CORE_IMPORTANCE_MIN > PROMOTE_LONG_IMPORTANCE_MIN);
    }

    #[test]
    fn test_intimacy_decay_bounded() {
        assert!(INTIMACY_DECAY_RATE_MAX < 1.0 - INTIMACY_RETENTION_FLOOR + f64::EPSILON);
    }
}
