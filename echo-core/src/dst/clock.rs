//! `SimClock` - Simulated Time
//!
//! `TigerStyle`: Deterministic, controllable time.
//!
//! The companion engines never read the system clock; they hold a
//! `SimClock` and ask it for "now". In production the host advances the
//! clock from wall time; in tests the clock is advanced explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::constants::{DST_TIME_ADVANCE_MS_MAX, TIME_MS_PER_SEC};

/// A simulated clock for deterministic testing.
///
/// `TigerStyle`:
/// - Time only moves forward
/// - Clones share state (`Arc<AtomicU64>` inside)
/// - Async sleepers are woken whenever time advances
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Current time in milliseconds since Unix epoch
    current_ms: Arc<AtomicU64>,
    /// Woken whenever time advances
    notify: Arc<Notify>,
}

impl SimClock {
    /// Create a clock starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::at_ms(0)
    }

    /// Create a clock starting at the given millisecond timestamp.
    #[must_use]
    pub fn at_ms(start_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(AtomicU64::new(start_ms)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Create a clock starting at the given `DateTime`.
    ///
    /// # Panics
    /// Panics on pre-epoch datetimes.
    #[must_use]
    pub fn at_datetime(dt: DateTime<Utc>) -> Self {
        let ms = dt.timestamp_millis();
        assert!(ms >= 0, "clock cannot start before the epoch");
        Self::at_ms(ms as u64)
    }

    /// Current time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }

    /// Current time in whole seconds.
    #[must_use]
    pub fn now_secs(&self) -> u64 {
        self.now_ms() / TIME_MS_PER_SEC
    }

    /// Current time as a `DateTime<Utc>`.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        let ms = self.now_ms() as i64;
        DateTime::from_timestamp_millis(ms)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Advance time by the given milliseconds, waking sleepers.
    ///
    /// # Panics
    /// Panics if `ms` exceeds `DST_TIME_ADVANCE_MS_MAX`.
    ///
    /// # Returns
    /// The new current time.
    pub fn advance_ms(&self, ms: u64) -> u64 {
        // Precondition
        assert!(
            ms <= DST_TIME_ADVANCE_MS_MAX,
            "advance_ms({}) exceeds max ({})",
            ms,
            DST_TIME_ADVANCE_MS_MAX
        );

        let old_ms = self.current_ms.fetch_add(ms, Ordering::SeqCst);
        let new_ms = old_ms.saturating_add(ms);
        self.notify.notify_waiters();

        // Postcondition
        assert!(new_ms >= old_ms, "time must not go backwards");
        new_ms
    }

    /// Advance time by the given (non-negative) seconds.
    pub fn advance_secs(&self, secs: f64) -> u64 {
        // Precondition
        assert!(secs >= 0.0, "secs must be non-negative, got {}", secs);

        self.advance_ms((secs * 1000.0) as u64)
    }

    /// Advance time by the given hours.
    ///
    /// Large advances are split into day-sized steps so the per-step
    /// bound still holds.
    pub fn advance_hours(&self, hours: f64) -> u64 {
        // Precondition
        assert!(hours >= 0.0, "hours must be non-negative, got {}", hours);

        let mut remaining_ms = (hours * 3_600_000.0) as u64;
        while remaining_ms > 0 {
            let step = remaining_ms.min(DST_TIME_ADVANCE_MS_MAX);
            self.advance_ms(step);
            remaining_ms -= step;
        }
        self.now_ms()
    }

    /// Set time to an absolute value.
    ///
    /// # Panics
    /// Panics if `ms` is in the past.
    pub fn set_ms(&self, ms: u64) {
        let current = self.now_ms();
        // Precondition
        assert!(
            ms >= current,
            "cannot set time backwards: {} < {}",
            ms,
            current
        );

        self.current_ms.store(ms, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Elapsed milliseconds since a given timestamp.
    ///
    /// # Panics
    /// Panics if `since` is in the future.
    #[must_use]
    pub fn elapsed_since(&self, since: u64) -> u64 {
        let current = self.now_ms();
        // Precondition
        assert!(
            since <= current,
            "elapsed_since({}) is in the future (now={})",
            since,
            current
        );

        current - since
    }

    /// Whether `duration_ms` has passed since `since`.
    #[must_use]
    pub fn has_elapsed(&self, since: u64, duration_ms: u64) -> bool {
        self.elapsed_since(since) >= duration_ms
    }

    /// Sleep until the given duration has passed.
    ///
    /// Yields until another task advances the clock far enough.
    pub async fn sleep_ms(&self, duration_ms: u64) {
        let target_ms = self.now_ms().saturating_add(duration_ms);
        while self.now_ms() < target_ms {
            self.notify.notified().await;
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
