//! `SimConfig` - Simulation Configuration
//!
//! `TigerStyle`: Seed management for deterministic testing.

use std::env;

use rand::Rng;

use crate::constants::DST_SIMULATION_STEPS_MAX;

/// Configuration for a simulation run.
///
/// `TigerStyle`:
/// - Immutable after creation
/// - Seed printed for reproducibility when generated
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Random seed for deterministic execution
    seed: u64,
    /// Maximum number of simulation steps
    steps_max: u64,
}

impl SimConfig {
    /// Create config with an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            steps_max: DST_SIMULATION_STEPS_MAX,
        }
    }

    /// Create config from the `DST_SEED` env var, or a random seed.
    ///
    /// A generated seed is printed so failing runs can be replayed with
    /// `DST_SEED=<seed> cargo test`.
    ///
    /// # Panics
    /// Panics if `DST_SEED` is set but not a valid u64.
    #[must_use]
    pub fn from_env_or_random() -> Self {
        let seed = match env::var("DST_SEED") {
            Ok(raw) => raw
                .parse::<u64>()
                .unwrap_or_else(|_| panic!("DST_SEED must be a valid u64, got: {}", raw)),
            Err(_) => {
                let seed = rand::thread_rng().gen::<u64>();
                eprintln!("DST: generated random seed (replay with DST_SEED={})", seed);
                seed
            }
        };
        Self::with_seed(seed)
    }

    /// The seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The maximum number of steps.
    #[must_use]
    pub fn steps_max(&self) -> u64 {
        self.steps_max
    }

    /// A copy of this config with a different `steps_max`.
    #[must_use]
    pub fn with_steps_max(self, steps_max: u64) -> Self {
        // Precondition
        assert!(steps_max > 0, "steps_max must be positive");

        Self {
            seed: self.seed,
            steps_max,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_env_or_random()
    }
}
