//! Mood - the companion's emotional states
//!
//! Seven named moods with display metadata for the chat surface.

use serde::{Deserialize, Serialize};

/// The companion's current emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Quiet baseline
    Calm,
    /// Content and cheerful
    Happy,
    /// Missing the user
    Lonely,
    /// Turned inward
    Thinking,
    /// High-energy delight
    Excited,
    /// Low energy, drifting off
    Sleepy,
    /// Poking at something new
    Curious,
}

impl Mood {
    /// String representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Happy => "happy",
            Self::Lonely => "lonely",
            Self::Thinking => "thinking",
            Self::Excited => "excited",
            Self::Sleepy => "sleepy",
            Self::Curious => "curious",
        }
    }

    /// Parse from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calm" => Some(Self::Calm),
            "happy" => Some(Self::Happy),
            "lonely" => Some(Self::Lonely),
            "thinking" => Some(Self::Thinking),
            "excited" => Some(Self::Excited),
            "sleepy" => Some(Self::Sleepy),
            "curious" => Some(Self::Curious),
            _ => None,
        }
    }

    /// All moods in a fixed order.
    #[must_use]
    pub fn all() -> &'static [Mood] {
        &[
            Self::Calm,
            Self::Happy,
            Self::Lonely,
            Self::Thinking,
            Self::Excited,
            Self::Sleepy,
            Self::Curious,
        ]
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display metadata for one mood, for the chat frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodDisplay {
    /// The mood itself
    pub mood: Mood,
    /// Chinese display name
    pub zh: &'static str,
    /// Emoji shown next to the name
    pub emoji: &'static str,
}

impl MoodDisplay {
    /// Display metadata for the given mood.
    #[must_use]
    pub fn for_mood(mood: Mood) -> Self {
        let (zh, emoji) = match mood {
            Mood::Calm => ("平静", "😌"),
            Mood::Happy => ("愉快", "😊"),
            Mood::Lonely => ("想念", "🥺"),
            Mood::Thinking => ("沉思", "🤔"),
            Mood::Excited => ("兴奋", "🤩"),
            Mood::Sleepy => ("困倦", "😴"),
            Mood::Curious => ("好奇", "🧐"),
        };
        Self { mood, zh, emoji }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_strings() {
        for mood in Mood::all() {
            assert_eq!(Mood::from_str(mood.as_str()), Some(*mood));
        }
        assert_eq!(Mood::from_str("grumpy"), None);
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Mood::Sleepy).unwrap(), "\"sleepy\"");
        let back: Mood = serde_json::from_str("\"curious\"").unwrap();
        assert_eq!(back, Mood::Curious);
    }

    #[test]
    fn test_every_mood_has_display() {
        for mood in Mood::all() {
            let display = MoodDisplay::for_mood(*mood);
            assert!(!display.zh.is_empty());
            assert!(!display.emoji.is_empty());
        }
    }
}
