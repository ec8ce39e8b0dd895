//! Memory Record - one remembered thing
//!
//! `TigerStyle`: Explicit types, validated construction.
//!
//! A record lives in one of three retention layers. Its `strength` fades
//! with time and is restored by recall; its `layer` only ever moves up
//! (short-term -> long-term -> core, never back).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::short_hex_id;

// =============================================================================
// Enums
// =============================================================================

/// What kind of thing a memory records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    /// A chat exchange
    Conversation,
    /// A felt emotion
    Emotion,
    /// Something that happened
    Event,
    /// A learned fact
    Knowledge,
    /// A user preference
    Preference,
    /// An autonomous thought
    Thought,
    /// A self-reflection
    SelfReflection,
    /// A self-upgrade note
    SelfUpgrade,
}

impl MemoryKind {
    /// String representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Emotion => "emotion",
            Self::Event => "event",
            Self::Knowledge => "knowledge",
            Self::Preference => "preference",
            Self::Thought => "thought",
            Self::SelfReflection => "self_reflection",
            Self::SelfUpgrade => "self_upgrade",
        }
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Retention layer of a memory.
///
/// Ordering is promotion order: `ShortTerm < LongTerm < Core`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLayer {
    /// Fresh, fast-fading memories
    ShortTerm,
    /// Consolidated memories with a strength floor
    LongTerm,
    /// Defining memories that never decay
    Core,
}

impl MemoryLayer {
    /// String representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortTerm => "short_term",
            Self::LongTerm => "long_term",
            Self::Core => "core",
        }
    }

    /// Display priority: core first, short-term last.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::Core => 0,
            Self::LongTerm => 1,
            Self::ShortTerm => 2,
        }
    }
}

impl std::fmt::Display for MemoryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who produced a memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemorySource {
    /// The user said it
    User,
    /// The companion thought it
    #[serde(rename = "self")]
    Self_,
    /// The system generated it
    System,
}

/// Emotional coloring of a memory's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Valence {
    /// Positive tone
    Positive,
    /// Negative tone
    Negative,
    /// Neither or balanced
    Neutral,
}

// =============================================================================
// Memory Record
// =============================================================================

/// One remembered thing, with its retention bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Unique id, `mem_` + 8 hex chars
    pub id: String,
    /// Text payload
    pub content: String,
    /// What kind of memory this is
    pub kind: MemoryKind,
    /// Current retention layer (only ever promoted)
    pub layer: MemoryLayer,
    /// Importance in [0, 1], fixed at creation
    pub importance: f64,
    /// Current vividness in [0, 1]; decays, restored by recall
    pub strength: f64,
    /// How often a relevance query returned this record
    pub recall_count: u32,
    /// When it was last recalled
    pub last_recall_time: Option<DateTime<Utc>>,
    /// When it was created
    pub create_time: DateTime<Utc>,
    /// Up to 8 keywords from the content, fixed at creation
    pub tags: Vec<String>,
    /// Who produced it
    pub source: MemorySource,
    /// Emotional coloring, fixed at creation
    pub valence: Valence,
}

impl MemoryRecord {
    /// Create a fresh record at full strength.
    ///
    /// # Panics
    /// Panics if importance is outside [0, 1] or content is empty.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content: String,
        kind: MemoryKind,
        layer: MemoryLayer,
        importance: f64,
        tags: Vec<String>,
        source: MemorySource,
        valence: Valence,
        create_time: DateTime<Utc>,
    ) -> Self {
        // Preconditions
        assert!(!content.is_empty(), "content must not be empty");
        assert!(
            (0.0..=1.0).contains(&importance),
            "importance must be in [0, 1], got {}",
            importance
        );

        Self {
            id: format!("mem_{}", short_hex_id()),
            content,
            kind,
            layer,
            importance,
            strength: 1.0,
            recall_count: 0,
            last_recall_time: None,
            create_time,
            tags,
            source,
            valence,
        }
    }

    /// Hours since creation, saturating at zero for clock skew.
    #[must_use]
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        hours_between(self.create_time, now)
    }

    /// Hours since the last recall, falling back to creation time.
    ///
    /// A missing or future timestamp is defaulted rather than raised so
    /// the decay pass stays total over the whole record set.
    #[must_use]
    pub fn hours_since_recall(&self, now: DateTime<Utc>) -> f64 {
        let reference = self.last_recall_time.unwrap_or(self.create_time);
        hours_between(reference, now)
    }
}

/// Non-negative hours from `earlier` to `later`.
fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let secs = (later - earlier).num_milliseconds() as f64 / 1000.0;
    (secs / 3600.0).max(0.0)
}
