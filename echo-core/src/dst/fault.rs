//! `FaultInjector` - Probabilistic Fault Injection
//!
//! `TigerStyle`: Explicit fault injection for chaos testing.
//!
//! The companion core has exactly one fallible collaborator, the backing
//! store, so the fault surface is small: reads and writes.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::constants::DST_FAULT_PROBABILITY_MAX;
use crate::dst::rng::DeterministicRng;

/// Types of faults that can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultType {
    /// A store read (list/load) fails
    StoreReadFail,
    /// A store write (append/overwrite/save) fails
    StoreWriteFail,
}

impl FaultType {
    /// The fault type name as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StoreReadFail => "store_read_fail",
            Self::StoreWriteFail => "store_write_fail",
        }
    }
}

impl std::fmt::Display for FaultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for a single fault.
#[derive(Debug, Clone)]
pub struct FaultConfig {
    /// The type of fault
    pub fault_type: FaultType,
    /// Probability of injection (0.0 to 1.0)
    pub probability: f64,
    /// Optional operation filter (substring match)
    pub operation_filter: Option<String>,
    /// Maximum number of injections (None = unlimited)
    pub max_injections: Option<u64>,
}

impl FaultConfig {
    /// Create a new fault configuration.
    ///
    /// # Panics
    /// Panics if probability is not in [0, 1].
    #[must_use]
    pub fn new(fault_type: FaultType, probability: f64) -> Self {
        // Precondition
        assert!(
            (0.0..=DST_FAULT_PROBABILITY_MAX).contains(&probability),
            "probability must be in [0, {}], got {}",
            DST_FAULT_PROBABILITY_MAX,
            probability
        );

        Self {
            fault_type,
            probability,
            operation_filter: None,
            max_injections: None,
        }
    }

    /// Only fire for operations whose name contains `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.operation_filter = Some(filter.into());
        self
    }

    /// Cap the total number of injections.
    #[must_use]
    pub fn with_max_injections(mut self, max: u64) -> Self {
        // Precondition
        assert!(max > 0, "max_injections must be positive");
        self.max_injections = Some(max);
        self
    }
}

/// Fault injector for simulation testing.
///
/// `TigerStyle`:
/// - Faults registered before sharing via Arc
/// - Deterministic through a seeded RNG
/// - Interior mutability so `should_inject` works on `&self`
#[derive(Debug)]
pub struct FaultInjector {
    rng: Mutex<DeterministicRng>,
    configs: Vec<FaultConfig>,
    injection_counts: Mutex<HashMap<FaultType, u64>>,
}

impl FaultInjector {
    /// Create a new fault injector with the given RNG.
    #[must_use]
    pub fn new(rng: DeterministicRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            configs: Vec::new(),
            injection_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Register a fault configuration.
    ///
    /// Must happen before the injector is shared via Arc.
    pub fn register(&mut self, config: FaultConfig) {
        self.injection_counts
            .lock()
            .unwrap()
            .entry(config.fault_type)
            .or_insert(0);
        self.configs.push(config);
    }

    /// Decide whether a fault fires for the given operation.
    ///
    /// Returns the fault type to inject, or `None`.
    pub fn should_inject(&self, operation: &str) -> Option<FaultType> {
        for config in &self.configs {
            if let Some(ref filter) = config.operation_filter {
                if !operation.contains(filter) {
                    continue;
                }
            }

            if let Some(max) = config.max_injections {
                let counts = self.injection_counts.lock().unwrap();
                if counts.get(&config.fault_type).copied().unwrap_or(0) >= max {
                    continue;
                }
            }

            let fires = self.rng.lock().unwrap().next_bool(config.probability);
            if fires {
                *self
                    .injection_counts
                    .lock()
                    .unwrap()
                    .entry(config.fault_type)
                    .or_insert(0) += 1;
                return Some(config.fault_type);
            }
        }
        None
    }

    /// Total injections across all fault types.
    #[must_use]
    pub fn total_injections(&self) -> u64 {
        self.injection_counts.lock().unwrap().values().sum()
    }

    /// Injections for one fault type.
    #[must_use]
    pub fn injections(&self, fault_type: FaultType) -> u64 {
        self.injection_counts
            .lock()
            .unwrap()
            .get(&fault_type)
            .copied()
            .unwrap_or(0)
    }
}

/// Builder for a `FaultInjector`.
///
/// `TigerStyle`: Fluent registration before the injector is shared.
#[derive(Debug)]
pub struct FaultInjectorBuilder {
    injector: FaultInjector,
}

impl FaultInjectorBuilder {
    /// Create a builder with the given RNG.
    #[must_use]
    pub fn new(rng: DeterministicRng) -> Self {
        Self {
            injector: FaultInjector::new(rng),
        }
    }

    /// Register a fault.
    #[must_use]
    pub fn with_fault(mut self, config: FaultConfig) -> Self {
        self.injector.register(config);
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> FaultInjector {
        self.injector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_faults_never_fires() {
        let injector = FaultInjector::new(DeterministicRng::new(42));
        for _ in 0..100 {
            assert_eq!(injector.should_inject("memory.overwrite"), None);
        }
    }

    #[test]
    fn test_certain_fault_always_fires() {
        let mut injector = FaultInjector::new(DeterministicRng::new(42));
        injector.register(FaultConfig::new(FaultType::StoreWriteFail, 1.0));

        for _ in 0..10 {
            assert_eq!(
                injector.should_inject("state.save"),
                Some(FaultType::StoreWriteFail)
            );
        }
        assert_eq!(injector.total_injections(), 10);
    }

    #[test]
    fn test_operation_filter() {
        let mut injector = FaultInjector::new(DeterministicRng::new(42));
        injector
            .register(FaultConfig::new(FaultType::StoreReadFail, 1.0).with_filter("memory."));

        assert_eq!(injector.should_inject("state.load"), None);
        assert_eq!(
            injector.should_inject("memory.list"),
            Some(FaultType::StoreReadFail)
        );
    }

    #[test]
    fn test_max_injections_caps() {
        let mut injector = FaultInjector::new(DeterministicRng::new(42));
        injector.register(
            FaultConfig::new(FaultType::StoreWriteFail, 1.0).with_max_injections(2),
        );

        assert!(injector.should_inject("memory.append").is_some());
        assert!(injector.should_inject("memory.append").is_some());
        assert_eq!(injector.should_inject("memory.append"), None);
        assert_eq!(injector.injections(FaultType::StoreWriteFail), 2);
    }

    #[test]
    fn test_same_seed_same_fault_pattern() {
        let run = |seed: u64| -> Vec<bool> {
            let mut injector = FaultInjector::new(DeterministicRng::new(seed));
            injector.register(FaultConfig::new(FaultType::StoreWriteFail, 0.5));
            (0..32)
                .map(|_| injector.should_inject("memory.overwrite").is_some())
                .collect()
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    #[should_panic(expected = "probability must be in")]
    fn test_invalid_probability_panics() {
        let _ = FaultConfig::new(FaultType::StoreReadFail, 1.5);
    }
}
