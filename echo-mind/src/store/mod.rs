//! Persistence seam for the companion core.
//!
//! The engines speak to three narrow traits ([`MemoryStore`],
//! [`StateStore`], [`LifeLogStore`]); this module provides an in-memory
//! fault-injectable backend for tests ([`SimStore`]) and a JSON
//! file-per-collection backend for local use ([`JsonFileStore`]).

mod adapter;
mod error;
mod json;
mod sim;

pub use adapter::{LifeLogStore, MemoryStore, StateStore};
pub use error::{StoreError, StoreResult};
pub use json::JsonFileStore;
pub use sim::SimStore;
