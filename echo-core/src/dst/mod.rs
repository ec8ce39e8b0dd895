//! DST - Deterministic Simulation Testing
//!
//! TigerBeetle/FoundationDB-style determinism primitives: a controllable
//! clock, a seeded RNG, and probabilistic fault injection for the store.
//!
//! # Usage
//!
//! ```rust
//! use echo_core::dst::{DeterministicRng, SimClock};
//!
//! let clock = SimClock::at_ms(1_000_000);
//! let mut rng = DeterministicRng::new(42);
//!
//! clock.advance_secs(30.0);
//! let roll = rng.next_float();
//! assert!((0.0..1.0).contains(&roll));
//! ```
//!
//! Run a failing test again with an explicit seed:
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

mod clock;
mod config;
mod fault;
mod rng;

pub use clock::SimClock;
pub use config::SimConfig;
pub use fault::{FaultConfig, FaultInjector, FaultInjectorBuilder, FaultType};
pub use rng::DeterministicRng;
