//! `TigerStyle` Constants
//!
//! Big-endian names with units: `DST_TIME_ADVANCE_MS_MAX`, not
//! `MAX_TIME_ADVANCE`.

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second
pub const TIME_MS_PER_SEC: u64 = 1000;

/// Milliseconds per minute
pub const TIME_MS_PER_MIN: u64 = 60 * TIME_MS_PER_SEC;

/// Milliseconds per hour
pub const TIME_MS_PER_HOUR: u64 = 60 * TIME_MS_PER_MIN;

/// Milliseconds per day
pub const TIME_MS_PER_DAY: u64 = 24 * TIME_MS_PER_HOUR;

// =============================================================================
// DST (Deterministic Simulation Testing) Limits
// =============================================================================

/// Maximum time advance per step (24 hours)
pub const DST_TIME_ADVANCE_MS_MAX: u64 = TIME_MS_PER_DAY;

/// Maximum probability for fault injection (1.0 = 100%)
pub const DST_FAULT_PROBABILITY_MAX: f64 = 1.0;

/// Maximum number of simulation steps
pub const DST_SIMULATION_STEPS_MAX: u64 = 1_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_constants_consistent() {
        assert_eq!(TIME_MS_PER_MIN, 60_000);
        assert_eq!(TIME_MS_PER_HOUR, 3_600_000);
        assert_eq!(TIME_MS_PER_DAY, 86_400_000);
    }

    #[test]
    fn test_dst_limits_valid() {
        assert!(DST_TIME_ADVANCE_MS_MAX > 0);
        assert!(DST_FAULT_PROBABILITY_MAX <= 1.0);
    }
}
