//! Companion State - the persistent self of the agent
//!
//! `TigerStyle`: Explicit typed fields, no loose maps.
//!
//! The companion's mutable self-state is one document: mood, energy,
//! intimacy, growth counters, and a bounded log of emotion events. The
//! emotion engine is the only writer of `mood` and `intimacy`; energy is
//! shared between the engine (interaction bonus) and the life-cycle
//! driver (recovery and activity cost).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{EMOTION_MEMORY_COUNT_MAX, ENERGY_MAX, ENERGY_MIN};
use crate::emotion::Mood;

// =============================================================================
// Emotion Event
// =============================================================================

/// A single entry in the companion's emotional diary.
///
/// Immutable once created; only removed by FIFO truncation of the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEvent {
    /// Unique id, `emo_` + 8 hex chars
    pub id: String,
    /// Free-form event tag, e.g. "positive_chat", "level_up"
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// Mood snapshot at the moment of the event
    pub mood_at_time: Mood,
    /// Intensity in [0, 1]
    pub intensity: f64,
    /// Creation timestamp
    pub create_time: DateTime<Utc>,
}

impl EmotionEvent {
    /// Create a new event with a fresh id.
    ///
    /// # Panics
    /// Panics if intensity is outside [0, 1].
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        mood_at_time: Mood,
        intensity: f64,
        create_time: DateTime<Utc>,
    ) -> Self {
        // Precondition
        assert!(
            (0.0..=1.0).contains(&intensity),
            "intensity must be in [0, 1], got {}",
            intensity
        );

        Self {
            id: format!("emo_{}", short_hex_id()),
            kind: kind.into(),
            description: description.into(),
            mood_at_time,
            intensity,
            create_time,
        }
    }
}

// =============================================================================
// Personality
// =============================================================================

/// Fixed personality weights read by the prompt layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// How much the companion initiates conversation, [0, 1]
    pub talkativeness: f64,
    /// How warm its tone is, [0, 1]
    pub warmth: f64,
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            talkativeness: 0.6,
            warmth: 0.8,
        }
    }
}

// =============================================================================
// Echo State
// =============================================================================

/// The companion's whole mutable self-state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoState {
    /// Stable identifier of this companion instance
    pub id: String,
    /// Display name
    pub name: String,
    /// When the companion was born
    pub create_time: DateTime<Utc>,
    /// Last time a tick or interaction touched the state
    pub last_active: DateTime<Utc>,
    /// Total lived seconds across all sessions
    pub total_life_seconds: f64,
    /// Current mood
    pub mood: Mood,
    /// Energy in [0, 100]
    pub energy: f64,
    /// Relationship depth, >= 0, no ceiling
    pub intimacy: f64,
    /// Growth level, starts at 1
    pub level: u32,
    /// Experience toward the next level
    pub exp: u32,
    /// Fixed personality weights
    pub personality: Personality,
    /// Bounded emotional diary (FIFO, newest last)
    #[serde(default)]
    pub emotion_memory: Vec<EmotionEvent>,
}

impl EchoState {
    /// Create a newborn companion state.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("echo_{}", short_hex_id()),
            name: name.into(),
            create_time: now,
            last_active: now,
            total_life_seconds: 0.0,
            mood: Mood::Calm,
            energy: 80.0,
            intimacy: 0.0,
            level: 1,
            exp: 0,
            personality: Personality::default(),
            emotion_memory: Vec::new(),
        }
    }

    /// Clamp energy into [0, 100].
    pub fn clamp_energy(&mut self) {
        self.energy = self.energy.clamp(ENERGY_MIN, ENERGY_MAX);
    }

    /// Append an emotion event, dropping the oldest past the cap.
    pub fn push_emotion_event(&mut self, event: EmotionEvent) {
        self.emotion_memory.push(event);
        if self.emotion_memory.len() > EMOTION_MEMORY_COUNT_MAX {
            let excess = self.emotion_memory.len() - EMOTION_MEMORY_COUNT_MAX;
            self.emotion_memory.drain(..excess);
        }

        // Postcondition
        assert!(
            self.emotion_memory.len() <= EMOTION_MEMORY_COUNT_MAX,
            "emotion memory must stay bounded"
        );
    }
}

// =============================================================================
// Life Log
// =============================================================================

/// A diary line the companion writes about its own activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeLog {
    /// Unique id, `log_` + 8 hex chars
    pub id: String,
    /// What happened
    pub content: String,
    /// Log kind, e.g. "autonomous"
    pub kind: String,
    /// Creation timestamp
    pub create_time: DateTime<Utc>,
}

impl LifeLog {
    /// Create a new life-log entry.
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        kind: impl Into<String>,
        create_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("log_{}", short_hex_id()),
            content: content.into(),
            kind: kind.into(),
            create_time,
        }
    }
}

/// First 8 hex chars of a fresh UUIDv4.
pub(crate) fn short_hex_id() -> String {
    let uuid = Uuid::new_v4();
    uuid.simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_newborn_defaults() {
        let state = EchoState::new("Echo", at(1_000));
        assert_eq!(state.mood, Mood::Calm);
        assert_eq!(state.energy, 80.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.exp, 0);
        assert_eq!(state.intimacy, 0.0);
        assert!(state.emotion_memory.is_empty());
        assert!(state.id.starts_with("echo_"));
    }

    #[test]
    fn test_clamp_energy() {
        let mut state = EchoState::new("Echo", at(0));
        state.energy = 130.0;
        state.clamp_energy();
        assert_eq!(state.energy, 100.0);
        state.energy = -4.0;
        state.clamp_energy();
        assert_eq!(state.energy, 0.0);
    }

    #[test]
    fn test_emotion_memory_fifo_bound() {
        let mut state = EchoState::new("Echo", at(0));
        for i in 0..EMOTION_MEMORY_COUNT_MAX + 5 {
            state.push_emotion_event(EmotionEvent::new(
                "chat",
                format!("event {i}"),
                Mood::Calm,
                0.5,
                at(i as i64),
            ));
        }
        assert_eq!(state.emotion_memory.len(), EMOTION_MEMORY_COUNT_MAX);
        // Oldest five were dropped
        assert_eq!(state.emotion_memory[0].description, "event 5");
    }

    #[test]
    #[should_panic(expected = "intensity must be in [0, 1]")]
    fn test_event_intensity_bounds() {
        let _ = EmotionEvent::new("chat", "too strong", Mood::Happy, 1.2, at(0));
    }

    #[test]
    fn test_state_serde_round_trip() {
        let mut state = EchoState::new("Echo", at(42));
        state.push_emotion_event(EmotionEvent::new("chat", "hello", Mood::Happy, 0.7, at(43)));

        let json = serde_json::to_string(&state).unwrap();
        let back: EchoState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Echo");
        assert_eq!(back.emotion_memory.len(), 1);
        assert_eq!(back.emotion_memory[0].mood_at_time, Mood::Happy);
    }
}
