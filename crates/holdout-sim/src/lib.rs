//! Simulation engine for HOLDOUT.
//!
//! Owns the hecs ECS world, runs every system once per tick in a fixed
//! order, and produces `UiSummary`s plus outbound `SimEvent`s for the host.

pub mod engine;
pub mod scheduler;
pub mod sinks;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use holdout_core as core;
pub use engine::{EngineError, SimulationEngine};
pub use sinks::{EffectSink, SpawnRequest, SpawnSink};
