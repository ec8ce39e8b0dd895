//! Intimacy Tiers - named stages of the relationship
//!
//! Intimacy is a monotonically-growing scalar with slow bounded decay
//! during absence. Tiers widen as they rise; crossing into a new tier is
//! meant to feel rarer the deeper the relationship gets.

use serde::Serialize;

/// One named tier in the intimacy ladder.
#[derive(Debug, Clone)]
pub struct IntimacyTier {
    /// Inclusive lower bound
    pub min: f64,
    /// Exclusive upper bound
    pub max: f64,
    /// Tier title (zh)
    pub title: &'static str,
    /// Tier description (zh)
    pub description: &'static str,
}

/// The default eight-tier ladder.
#[must_use]
pub fn default_tiers() -> Vec<IntimacyTier> {
    let tier = |min: f64, max: f64, title, description| IntimacyTier {
        min,
        max,
        title,
        description,
    };

    vec![
        tier(0.0, 50.0, "初识", "刚刚认识的陌生人"),
        tier(50.0, 150.0, "认识", "有过几次交流"),
        tier(150.0, 400.0, "熟悉", "聊天变得自然了"),
        tier(400.0, 800.0, "朋友", "可以分享心事了"),
        tier(800.0, 1500.0, "好友", "互相信赖的存在"),
        tier(1500.0, 3000.0, "知己", "心灵相通的伙伴"),
        tier(3000.0, 6000.0, "挚友", "无话不谈的灵魂伴侣"),
        tier(6000.0, 99999.0, "命运之人", "超越一切定义的羁绊"),
    ]
}

/// A resolved intimacy level: tier plus progress toward the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntimacyLevel {
    /// Tier title
    pub title: String,
    /// Tier description
    pub description: String,
    /// Current intimacy value
    pub value: f64,
    /// Linear progress through the tier, [0, 1], 3 decimals
    pub progress: f64,
    /// Value at which the next tier starts; `None` at the top
    pub next_level_at: Option<f64>,
}

/// Locate `value` in the tier ladder.
///
/// Values past the final bracket resolve to the top tier with progress
/// pinned at 1.0.
#[must_use]
pub fn resolve_level(tiers: &[IntimacyTier], value: f64) -> IntimacyLevel {
    // Preconditions
    assert!(!tiers.is_empty(), "tier ladder must not be empty");
    assert!(value >= 0.0, "intimacy must be non-negative, got {}", value);

    for tier in tiers {
        if value >= tier.min && value < tier.max {
            let progress = (value - tier.min) / (tier.max - tier.min);
            return IntimacyLevel {
                title: tier.title.to_string(),
                description: tier.description.to_string(),
                value,
                progress: (progress * 1000.0).round() / 1000.0,
                next_level_at: Some(tier.max),
            };
        }
    }

    let top = tiers.last().unwrap();
    IntimacyLevel {
        title: top.title.to_string(),
        description: top.description.to_string(),
        value,
        progress: 1.0,
        next_level_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_is_contiguous_and_rising() {
        let tiers = default_tiers();
        assert_eq!(tiers.len(), 8);
        assert_eq!(tiers[0].min, 0.0);
        for pair in tiers.windows(2) {
            assert_eq!(pair[0].max, pair[1].min, "tiers must be contiguous");
            assert!(pair[0].max - pair[0].min <= pair[1].max - pair[1].min);
        }
    }

    #[test]
    fn test_resolve_first_tier() {
        let tiers = default_tiers();
        let level = resolve_level(&tiers, 25.0);
        assert_eq!(level.title, "初识");
        assert_eq!(level.progress, 0.5);
        assert_eq!(level.next_level_at, Some(50.0));
    }

    #[test]
    fn test_resolve_boundary_belongs_to_upper_tier() {
        let tiers = default_tiers();
        let level = resolve_level(&tiers, 50.0);
        assert_eq!(level.title, "认识");
        assert_eq!(level.progress, 0.0);
    }

    #[test]
    fn test_resolve_top_tier_overflow() {
        let tiers = default_tiers();
        let level = resolve_level(&tiers, 1_000_000.0);
        assert_eq!(level.title, "命运之人");
        assert_eq!(level.progress, 1.0);
        assert_eq!(level.next_level_at, None);
    }

    #[test]
    fn test_progress_rounded_to_three_decimals() {
        let tiers = default_tiers();
        let level = resolve_level(&tiers, 1.0);
        assert_eq!(level.progress, 0.02);
    }
}
