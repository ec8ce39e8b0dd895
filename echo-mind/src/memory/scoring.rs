//! Content Scoring - importance, tags, valence
//!
//! Deterministic heuristics that stand in for an LLM judgement when one
//! is unavailable: keyword hits, length steps, personal-pattern checks.
//! All tables are injected configuration so tests can override them.

use crate::constants::{
    MEMORY_IMPORTANCE_BASE, MEMORY_IMPORTANCE_EMOTION_BONUS, MEMORY_IMPORTANCE_LENGTH_BONUS,
    MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_1, MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_2,
    MEMORY_IMPORTANCE_MAX, MEMORY_IMPORTANCE_MIN, MEMORY_IMPORTANCE_PERSONAL_BONUS,
    MEMORY_TAGS_COUNT_MAX, MEMORY_TAG_CHARS_MIN,
};
use crate::memory::Valence;

/// Keyword tables and tokenization settings for content scoring.
///
/// Defaults are bilingual (zh/en) to match the companion's chat surface.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Keywords that mark emotionally loaded content
    pub emotion_keywords: Vec<String>,
    /// Keywords counted toward a positive valence
    pub positive_keywords: Vec<String>,
    /// Keywords counted toward a negative valence
    pub negative_keywords: Vec<String>,
    /// Substrings that mark personal content (first match only)
    pub personal_patterns: Vec<String>,
    /// Punctuation replaced by spaces before tag tokenization
    pub punctuation: Vec<char>,
    /// Minimum tag token length in chars
    pub tag_chars_min: usize,
    /// Maximum number of tags
    pub tags_count_max: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let to_vec = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();

        Self {
            emotion_keywords: to_vec(&[
                "喜欢", "爱", "开心", "难过", "伤心", "生气", "害怕", "讨厌", "激动", "想念",
                "happy", "sad", "love", "hate", "angry", "afraid", "excited", "miss",
            ]),
            positive_keywords: to_vec(&[
                "喜欢", "爱", "开心", "高兴", "快乐", "幸福", "棒", "谢谢", "happy", "love",
                "like", "great", "wonderful", "thanks",
            ]),
            negative_keywords: to_vec(&[
                "讨厌", "难过", "伤心", "生气", "害怕", "糟糕", "失望", "sad", "hate", "angry",
                "afraid", "terrible", "disappointed",
            ]),
            personal_patterns: to_vec(&["我", "你", "my", "our"]),
            punctuation: vec![
                '，', '。', ',', '.', '！', '？', '!', '?', '；', '：', ':', '、', '"', '“',
                '”', '(', ')', '（', '）',
            ],
            tag_chars_min: MEMORY_TAG_CHARS_MIN,
            tags_count_max: MEMORY_TAGS_COUNT_MAX,
        }
    }
}

/// Score importance from content.
///
/// Base 0.3; +0.1 per length step (50 and 100 chars); +0.05 per matched
/// emotion keyword; +0.1 once if any personal pattern appears. Clamped
/// to [0, 1] and rounded to 3 decimals.
#[must_use]
pub fn score_importance(content: &str, config: &ScoringConfig) -> f64 {
    let lowered = content.to_lowercase();
    let chars = content.chars().count();

    let mut score = MEMORY_IMPORTANCE_BASE;

    if chars > MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_1 {
        score += MEMORY_IMPORTANCE_LENGTH_BONUS;
    }
    if chars > MEMORY_IMPORTANCE_LENGTH_CHARS_STEP_2 {
        score += MEMORY_IMPORTANCE_LENGTH_BONUS;
    }

    for keyword in &config.emotion_keywords {
        if lowered.contains(keyword.as_str()) {
            score += MEMORY_IMPORTANCE_EMOTION_BONUS;
        }
    }

    if config
        .personal_patterns
        .iter()
        .any(|p| lowered.contains(p.as_str()))
    {
        score += MEMORY_IMPORTANCE_PERSONAL_BONUS;
    }

    let clamped = score.clamp(MEMORY_IMPORTANCE_MIN, MEMORY_IMPORTANCE_MAX);
    let rounded = (clamped * 1000.0).round() / 1000.0;

    // Postcondition
    assert!(
        (MEMORY_IMPORTANCE_MIN..=MEMORY_IMPORTANCE_MAX).contains(&rounded),
        "importance must stay in [0, 1]"
    );
    rounded
}

/// Extract up to 8 tags from content.
///
/// Punctuation becomes spaces, the rest splits on whitespace, and only
/// tokens of at least 2 chars survive. Order of appearance is kept.
#[must_use]
pub fn extract_tags(content: &str, config: &ScoringConfig) -> Vec<String> {
    let cleaned: String = content
        .to_lowercase()
        .chars()
        .map(|c| if config.punctuation.contains(&c) { ' ' } else { c })
        .collect();

    let mut tags: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < config.tag_chars_min {
            continue;
        }
        if tags.iter().any(|t| t == token) {
            continue;
        }
        tags.push(token.to_string());
        if tags.len() == config.tags_count_max {
            break;
        }
    }

    // Postcondition
    assert!(
        tags.len() <= config.tags_count_max,
        "tag count must stay bounded"
    );
    tags
}

/// Classify the emotional coloring of content.
///
/// Strictly more positive than negative keyword hits wins (and the
/// reverse); ties are neutral.
#[must_use]
pub fn detect_valence(content: &str, config: &ScoringConfig) -> Valence {
    let lowered = content.to_lowercase();
    let hits = |keywords: &[String]| {
        keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .count()
    };

    let positive = hits(&config.positive_keywords);
    let negative = hits(&config.negative_keywords);

    if positive > negative {
        Valence::Positive
    } else if negative > positive {
        Valence::Negative
    } else {
        Valence::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importance_base_for_plain_text() {
        let config = ScoringConfig::default();
        assert_eq!(score_importance("weather report", &config), 0.3);
    }

    #[test]
    fn test_importance_personal_and_emotion() {
        let config = ScoringConfig::default();
        // 我 (personal +0.1) + 喜欢 (emotion +0.05)
        assert_eq!(score_importance("我喜欢猫", &config), 0.45);
    }

    #[test]
    fn test_importance_personal_bonus_not_cumulative() {
        let config = ScoringConfig::default();
        // Both 我 and 你 match personal patterns; the bonus still fires once.
        // 爱 adds a single emotion-keyword bonus on top of the base.
        assert_eq!(score_importance("我爱你", &config), 0.45);
    }

    #[test]
    fn test_importance_length_steps() {
        let config = ScoringConfig::default();
        let medium = "x".repeat(60);
        let long = "x".repeat(120);
        assert_eq!(score_importance(&medium, &config), 0.4);
        assert_eq!(score_importance(&long, &config), 0.5);
    }

    #[test]
    fn test_importance_clamped_to_one() {
        let config = ScoringConfig::default();
        let loaded = "我 love happy sad hate angry afraid excited miss 喜欢 爱 开心 难过 伤心 生气 害怕 讨厌 激动 想念 "
            .repeat(3);
        assert_eq!(score_importance(&loaded, &config), 1.0);
    }

    #[test]
    fn test_tags_split_on_punctuation() {
        let config = ScoringConfig::default();
        let tags = extract_tags("hello, world! rust is nice.", &config);
        assert_eq!(tags, vec!["hello", "world", "rust", "is", "nice"]);
    }

    #[test]
    fn test_tags_drop_short_tokens_and_cap() {
        let config = ScoringConfig::default();
        let tags = extract_tags("a bb cc dd ee ff gg hh ii jj kk", &config);
        assert_eq!(tags.len(), MEMORY_TAGS_COUNT_MAX);
        assert!(!tags.contains(&"a".to_string()));
    }

    #[test]
    fn test_tags_keep_cjk_runs() {
        let config = ScoringConfig::default();
        let tags = extract_tags("我喜欢猫，也喜欢狗。", &config);
        assert_eq!(tags, vec!["我喜欢猫", "也喜欢狗"]);
    }

    #[test]
    fn test_tags_deduplicate() {
        let config = ScoringConfig::default();
        let tags = extract_tags("rust rust rust forever", &config);
        assert_eq!(tags, vec!["rust", "forever"]);
    }

    #[test]
    fn test_valence_strict_majority() {
        let config = ScoringConfig::default();
        assert_eq!(detect_valence("我喜欢猫", &config), Valence::Positive);
        assert_eq!(detect_valence("今天很难过", &config), Valence::Negative);
        assert_eq!(detect_valence("天气不错", &config), Valence::Neutral);
        // One positive and one negative hit tie out to neutral
        assert_eq!(detect_valence("love and hate", &config), Valence::Neutral);
    }
}
