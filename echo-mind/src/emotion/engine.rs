//! Emotion Engine - mood drift, intimacy, emotional diary
//!
//! `TigerStyle`: Injected tables, deterministic through a seeded RNG.
//!
//! Mood is a finite-state variable driven by a weighted transition
//! table, modulated by energy and idle time. Intimacy grows without
//! bound and decays slowly and boundedly during absence. Emotion events
//! form a bounded diary whose recency-weighted histogram summarizes the
//! companion's recent emotional bias.

use std::collections::HashMap;

use echo_core::dst::{DeterministicRng, SimClock};

use crate::constants::{
    DRIFT_ENERGETIC_CURIOUS_BONUS, DRIFT_ENERGETIC_EXCITED_BONUS, DRIFT_ENERGETIC_HAPPY_BONUS,
    DRIFT_ENERGETIC_SLEEPY_PENALTY, DRIFT_EXHAUSTED_EXCITED_PENALTY,
    DRIFT_EXHAUSTED_HAPPY_PENALTY, DRIFT_EXHAUSTED_SLEEPY_BONUS, DRIFT_IDLE_LONELY_BONUS,
    DRIFT_RESTLESS_LONELY_BONUS, DRIFT_TIRED_SLEEPY_BONUS, DRIFT_TIRED_THINKING_BONUS,
    EMOTION_EVENT_FALLBACK_AGE_HOURS, EMOTION_RECENT_COUNT_DEFAULT,
    EMOTION_TENDENCY_HALFLIFE_HOURS, EMOTION_TENDENCY_WINDOW_COUNT, ENERGY_EXHAUSTED_THRESHOLD,
    ENERGY_HIGH_THRESHOLD, ENERGY_MAX, ENERGY_TIRED_THRESHOLD, IDLE_LONELY_SECS,
    IDLE_RESTLESS_SECS, INTERACTION_ENERGY_BONUS, INTIMACY_DECAY_GRACE_HOURS,
    INTIMACY_DECAY_RATE_MAX, INTIMACY_DECAY_RATE_PER_DAY, INTIMACY_RETENTION_FLOOR,
};
use crate::emotion::intimacy::{default_tiers, resolve_level, IntimacyLevel, IntimacyTier};
use crate::emotion::mood::{Mood, MoodDisplay};
use crate::state::{EchoState, EmotionEvent};

/// A weighted transition row: candidate moods and their weights.
pub type TransitionRow = Vec<(Mood, f64)>;

/// A transition table keyed by the current mood.
///
/// Rows are ordered vectors, not maps, so a seeded draw walks candidates
/// in a fixed order and stays reproducible.
pub type TransitionTable = Vec<(Mood, TransitionRow)>;

// =============================================================================
// Configuration
// =============================================================================

/// All tunables of the emotion engine, injected at construction.
#[derive(Debug, Clone)]
pub struct EmotionConfig {
    /// Idle-drift transition table
    pub drift: TransitionTable,
    /// Immediate-reaction table used on user contact
    pub reaction: TransitionTable,
    /// Intimacy tier ladder
    pub tiers: Vec<IntimacyTier>,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        use Mood::{Calm, Curious, Excited, Happy, Lonely, Sleepy, Thinking};
        let row = |pairs: &[(Mood, f64)]| pairs.to_vec();

        Self {
            drift: vec![
                (
                    Calm,
                    row(&[
                        (Calm, 40.0),
                        (Thinking, 25.0),
                        (Curious, 15.0),
                        (Lonely, 10.0),
                        (Happy, 8.0),
                        (Sleepy, 2.0),
                    ]),
                ),
                (
                    Happy,
                    row(&[
                        (Happy, 35.0),
                        (Excited, 20.0),
                        (Calm, 20.0),
                        (Curious, 15.0),
                        (Thinking, 8.0),
                        (Lonely, 2.0),
                    ]),
                ),
                (
                    Lonely,
                    row(&[
                        (Lonely, 30.0),
                        (Thinking, 25.0),
                        (Calm, 20.0),
                        (Sleepy, 10.0),
                        (Happy, 10.0),
                        (Curious, 5.0),
                    ]),
                ),
                (
                    Thinking,
                    row(&[
                        (Thinking, 30.0),
                        (Calm, 25.0),
                        (Curious, 20.0),
                        (Excited, 10.0),
                        (Lonely, 10.0),
                        (Happy, 5.0),
                    ]),
                ),
                (
                    Excited,
                    row(&[
                        (Excited, 25.0),
                        (Happy, 30.0),
                        (Curious, 20.0),
                        (Calm, 15.0),
                        (Thinking, 8.0),
                        (Sleepy, 2.0),
                    ]),
                ),
                (
                    Sleepy,
                    row(&[
                        (Sleepy, 40.0),
                        (Calm, 30.0),
                        (Thinking, 15.0),
                        (Lonely, 10.0),
                        (Happy, 3.0),
                        (Curious, 2.0),
                    ]),
                ),
                (
                    Curious,
                    row(&[
                        (Curious, 30.0),
                        (Thinking, 25.0),
                        (Excited, 15.0),
                        (Happy, 15.0),
                        (Calm, 10.0),
                        (Lonely, 5.0),
                    ]),
                ),
            ],
            reaction: vec![
                (
                    Calm,
                    row(&[(Happy, 40.0), (Calm, 30.0), (Curious, 20.0), (Excited, 10.0)]),
                ),
                (Happy, row(&[(Happy, 50.0), (Excited, 30.0), (Curious, 20.0)])),
                (
                    Lonely,
                    row(&[(Happy, 50.0), (Excited, 20.0), (Calm, 20.0), (Curious, 10.0)]),
                ),
                (
                    Thinking,
                    row(&[
                        (Curious, 35.0),
                        (Happy, 25.0),
                        (Calm, 25.0),
                        (Thinking, 15.0),
                    ]),
                ),
                (Excited, row(&[(Excited, 40.0), (Happy, 40.0), (Curious, 20.0)])),
                (
                    Sleepy,
                    row(&[(Calm, 40.0), (Sleepy, 30.0), (Happy, 20.0), (Thinking, 10.0)]),
                ),
                (
                    Curious,
                    row(&[
                        (Curious, 40.0),
                        (Excited, 25.0),
                        (Happy, 25.0),
                        (Thinking, 10.0),
                    ]),
                ),
            ],
            tiers: default_tiers(),
        }
    }
}

impl EmotionConfig {
    /// The drift row for a mood, falling back to the calm row.
    fn drift_row(&self, mood: Mood) -> TransitionRow {
        row_in(&self.drift, mood)
            .or_else(|| row_in(&self.drift, Mood::Calm))
            .unwrap_or_default()
    }

    /// The reaction row for a mood; unknown moods react half happy,
    /// half calm.
    fn reaction_row(&self, mood: Mood) -> TransitionRow {
        row_in(&self.reaction, mood)
            .unwrap_or_else(|| vec![(Mood::Happy, 50.0), (Mood::Calm, 50.0)])
    }
}

fn row_in(table: &TransitionTable, mood: Mood) -> Option<TransitionRow> {
    table.iter().find(|(m, _)| *m == mood).map(|(_, r)| r.clone())
}

// =============================================================================
// Emotion Engine
// =============================================================================

/// The emotional state-drift engine.
///
/// Pure in-memory mutation of [`EchoState`]; persistence belongs to the
/// caller. Randomness is always passed in so a seeded run replays.
#[derive(Debug)]
pub struct EmotionEngine {
    config: EmotionConfig,
    clock: SimClock,
}

impl EmotionEngine {
    /// Create an engine with the default tables.
    #[must_use]
    pub fn new(clock: SimClock) -> Self {
        Self::with_config(clock, EmotionConfig::default())
    }

    /// Create an engine with custom tables.
    #[must_use]
    pub fn with_config(clock: SimClock, config: EmotionConfig) -> Self {
        Self { config, clock }
    }

    /// Drift the mood after `delta_seconds` without contact.
    ///
    /// Samples a weighted transition from the drift table, with weights
    /// nudged by energy and idle time. A degenerate weight map (empty or
    /// all zero) falls back to calm instead of failing.
    pub fn drift_mood(
        &self,
        state: &mut EchoState,
        delta_seconds: f64,
        rng: &mut DeterministicRng,
    ) -> Mood {
        let mut weights = self.config.drift_row(state.mood);
        let energy = state.energy;

        if energy < ENERGY_EXHAUSTED_THRESHOLD {
            bump(&mut weights, Mood::Sleepy, DRIFT_EXHAUSTED_SLEEPY_BONUS);
            bump(&mut weights, Mood::Excited, -DRIFT_EXHAUSTED_EXCITED_PENALTY);
            bump(&mut weights, Mood::Happy, -DRIFT_EXHAUSTED_HAPPY_PENALTY);
        } else if energy < ENERGY_TIRED_THRESHOLD {
            bump(&mut weights, Mood::Sleepy, DRIFT_TIRED_SLEEPY_BONUS);
            bump(&mut weights, Mood::Thinking, DRIFT_TIRED_THINKING_BONUS);
        } else if energy > ENERGY_HIGH_THRESHOLD {
            bump(&mut weights, Mood::Happy, DRIFT_ENERGETIC_HAPPY_BONUS);
            bump(&mut weights, Mood::Excited, DRIFT_ENERGETIC_EXCITED_BONUS);
            bump(&mut weights, Mood::Curious, DRIFT_ENERGETIC_CURIOUS_BONUS);
            bump(&mut weights, Mood::Sleepy, -DRIFT_ENERGETIC_SLEEPY_PENALTY);
        }

        if delta_seconds > IDLE_LONELY_SECS {
            bump(&mut weights, Mood::Lonely, DRIFT_IDLE_LONELY_BONUS);
        } else if delta_seconds > IDLE_RESTLESS_SECS {
            bump(&mut weights, Mood::Lonely, DRIFT_RESTLESS_LONELY_BONUS);
        }

        let new_mood = draw(&weights, rng);
        state.mood = new_mood;
        new_mood
    }

    /// React to direct user contact.
    ///
    /// Contact restores a little energy, then the mood jumps per the
    /// reaction table rather than the idle-drift table.
    pub fn on_user_interaction(
        &self,
        state: &mut EchoState,
        rng: &mut DeterministicRng,
    ) -> Mood {
        state.energy = (state.energy + INTERACTION_ENERGY_BONUS).min(ENERGY_MAX);

        let weights = self.config.reaction_row(state.mood);
        let new_mood = draw(&weights, rng);
        state.mood = new_mood;
        new_mood
    }

    /// Grow (or spend) intimacy; the result never goes negative.
    pub fn add_intimacy(&self, state: &mut EchoState, amount: f64) -> f64 {
        state.intimacy = (state.intimacy + amount).max(0.0);
        state.intimacy
    }

    /// Decay intimacy after an absence.
    ///
    /// Nothing is lost inside the 24-hour grace window. Past it, each
    /// extra day costs 2%, capped so an absence of any length leaves at
    /// least 80% standing.
    pub fn decay_intimacy(&self, state: &mut EchoState, offline_hours: f64) -> f64 {
        // Precondition
        assert!(
            offline_hours >= 0.0,
            "offline_hours must be non-negative, got {}",
            offline_hours
        );

        if offline_hours <= INTIMACY_DECAY_GRACE_HOURS {
            return state.intimacy;
        }

        let excess_days = (offline_hours - INTIMACY_DECAY_GRACE_HOURS) / 24.0;
        let decay_rate = (excess_days * INTIMACY_DECAY_RATE_PER_DAY).min(INTIMACY_DECAY_RATE_MAX);
        let current = state.intimacy;
        let decayed = (current * (1.0 - decay_rate)).max(current * INTIMACY_RETENTION_FLOOR);

        // Postcondition
        assert!(
            decayed >= current * INTIMACY_RETENTION_FLOOR,
            "decay must respect the retention floor"
        );

        state.intimacy = decayed;
        if decay_rate > 0.0 {
            tracing::debug!(
                offline_hours,
                decay_rate,
                intimacy = state.intimacy,
                "intimacy decayed after absence"
            );
        }
        decayed
    }

    /// Resolve the current intimacy tier and progress.
    #[must_use]
    pub fn get_intimacy_level(&self, state: &EchoState) -> IntimacyLevel {
        resolve_level(&self.config.tiers, state.intimacy)
    }

    /// Record an emotion event into the bounded diary.
    ///
    /// The event snapshots the current mood; the diary keeps the most
    /// recent 50 entries.
    pub fn record_emotion_event(
        &self,
        state: &mut EchoState,
        kind: impl Into<String>,
        description: impl Into<String>,
        intensity: f64,
    ) -> EmotionEvent {
        let event = EmotionEvent::new(
            kind,
            description,
            state.mood,
            intensity,
            self.clock.now(),
        );
        state.push_emotion_event(event.clone());
        event
    }

    /// The most recent emotion events, oldest first.
    #[must_use]
    pub fn get_recent_emotions(&self, state: &EchoState, limit: usize) -> Vec<EmotionEvent> {
        let events = &state.emotion_memory;
        let start = events.len().saturating_sub(limit);
        events[start..].to_vec()
    }

    /// Recency-weighted histogram over recent emotion events.
    ///
    /// Considers the last 20 events; each contributes
    /// `intensity * exp(-hours_ago / 12)` to its snapshot mood. An event
    /// stamped in the future counts as a day old rather than poisoning
    /// the sum.
    #[must_use]
    pub fn get_emotion_tendency(&self, state: &EchoState) -> HashMap<Mood, f64> {
        let recent = self.get_recent_emotions(state, EMOTION_TENDENCY_WINDOW_COUNT);
        let now = self.clock.now();

        let mut tendency: HashMap<Mood, f64> = HashMap::new();
        for event in recent {
            let millis = (now - event.create_time).num_milliseconds();
            let hours_ago = if millis >= 0 {
                millis as f64 / 3_600_000.0
            } else {
                EMOTION_EVENT_FALLBACK_AGE_HOURS
            };
            let time_weight = (-hours_ago / EMOTION_TENDENCY_HALFLIFE_HOURS).exp();
            *tendency.entry(event.mood_at_time).or_insert(0.0) +=
                event.intensity * time_weight;
        }
        tendency
    }

    /// Display metadata for the current mood.
    #[must_use]
    pub fn get_mood_display(&self, state: &EchoState) -> MoodDisplay {
        MoodDisplay::for_mood(state.mood)
    }

    /// The most recent emotions with the default window.
    #[must_use]
    pub fn recent_emotions(&self, state: &EchoState) -> Vec<EmotionEvent> {
        self.get_recent_emotions(state, EMOTION_RECENT_COUNT_DEFAULT)
    }
}

/// Add `delta` to a mood's weight, creating the entry if missing and
/// flooring the result at zero.
fn bump(weights: &mut TransitionRow, mood: Mood, delta: f64) {
    if let Some(entry) = weights.iter_mut().find(|(m, _)| *m == mood) {
        entry.1 = (entry.1 + delta).max(0.0);
    } else if delta > 0.0 {
        weights.push((mood, delta));
    }
}

/// Weighted draw over a transition row; calm on degenerate input.
fn draw(weights: &TransitionRow, rng: &mut DeterministicRng) -> Mood {
    let raw: Vec<f64> = weights.iter().map(|(_, w)| *w).collect();
    match rng.next_weighted_index(&raw) {
        Some(index) => weights[index].0,
        None => Mood::Calm,
    }
}
