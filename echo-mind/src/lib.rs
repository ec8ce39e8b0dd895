//! # Echo Mind
//!
//! The core of a persistent digital companion: a layered memory system
//! with forgetting and consolidation dynamics, and a probabilistic
//! emotion model, connected by an autonomous life cycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  LifeCycle driver                   │
//! │        tick · autonomous sweep · user message       │
//! ├──────────────────────────┬──────────────────────────┤
//! │      MemoryEngine        │      EmotionEngine       │
//! │  add / recall+reinforce  │  mood drift · reaction   │
//! │  forgetting curve        │  intimacy ladder         │
//! │  consolidation · prune   │  emotional diary         │
//! ├──────────────────────────┴──────────────────────────┤
//! │   Store traits (MemoryStore / StateStore / Logs)    │
//! │        SimStore (tests) · JsonFileStore (local)     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Memory layers
//!
//! Records start short-term (or long-term when important enough), fade
//! along a per-layer forgetting curve, are reinforced every time a
//! relevance query returns them, and are promoted as recall and
//! importance accumulate. Core memories never decay.
//!
//! ## Determinism
//!
//! Time and randomness come from `echo-core`'s `SimClock` and
//! `DeterministicRng`; the same seed replays the same emotional life.
//!
//! ## Example
//!
//! ```rust
//! use echo_core::dst::{DeterministicRng, SimClock};
//! use echo_mind::cycle::LifeCycle;
//! use echo_mind::emotion::EmotionEngine;
//! use echo_mind::memory::MemoryEngine;
//! use echo_mind::store::SimStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clock = SimClock::at_ms(1_700_000_000_000);
//! let store = SimStore::new();
//!
//! let mut companion = LifeCycle::new(
//!     MemoryEngine::new(store.clone(), clock.clone()),
//!     EmotionEngine::new(clock.clone()),
//!     store.clone(),
//!     store,
//!     clock.clone(),
//!     DeterministicRng::new(42),
//! );
//!
//! companion.on_user_message("我喜欢猫").await?;
//! clock.advance_secs(30.0);
//! let report = companion.tick().await?;
//! println!("mood: {}", report.mood);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod cycle;
pub mod emotion;
pub mod memory;
pub mod state;
pub mod store;

pub use cycle::{CycleConfig, CycleError, LifeCycle, SweepReport, TickReport, UserMessageReport};
pub use emotion::{EmotionConfig, EmotionEngine, IntimacyLevel, Mood, MoodDisplay};
pub use memory::{
    ConsolidationReport, ForgettingReport, MemoryEngine, MemoryEngineConfig, MemoryError,
    MemoryKind, MemoryLayer, MemoryRecord, MemorySource, MemoryStats, Valence,
};
pub use state::{EchoState, EmotionEvent, LifeLog, Personality};
pub use store::{JsonFileStore, LifeLogStore, MemoryStore, SimStore, StateStore, StoreError};
