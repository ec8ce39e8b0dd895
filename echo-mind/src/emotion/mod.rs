//! Mood drift, intimacy, and the emotional diary.
//!
//! Mood is a seven-state machine sampled from weighted transition
//! tables; intimacy is a grow-forever scalar with bounded decay during
//! absence; the diary is a bounded FIFO of emotion events feeding a
//! recency-weighted tendency histogram.

mod engine;
pub mod intimacy;
mod mood;

pub use engine::{EmotionConfig, EmotionEngine, TransitionRow, TransitionTable};
pub use intimacy::{default_tiers, resolve_level, IntimacyLevel, IntimacyTier};
pub use mood::{Mood, MoodDisplay};
