//! # Echo Core
//!
//! Deterministic-simulation primitives shared by the echo companion
//! engines and their tests:
//!
//! - [`dst::SimClock`] - injectable wall-clock, milliseconds, monotonic
//! - [`dst::DeterministicRng`] - seeded ChaCha20 RNG with weighted draws
//! - [`dst::SimConfig`] - seed management (`DST_SEED` replay)
//! - [`dst::FaultInjector`] - probabilistic store-fault injection
//!
//! Nothing in this crate touches the system clock or a global RNG; every
//! source of nondeterminism is injected so that the same seed replays the
//! same run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod dst;

pub use constants::*;
pub use dst::{
    DeterministicRng, FaultConfig, FaultInjector, FaultInjectorBuilder, FaultType, SimClock,
    SimConfig,
};
