//! Capability interfaces between the simulation and its collaborators.
//!
//! Systems never call collaborators directly. Effects are buffered as
//! `SimEvent`s during the tick and handed to every registered `EffectSink`
//! afterwards; spawn requests go through a `SpawnSink`.

use std::panic::{self, AssertUnwindSafe};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use holdout_core::enums::EnemyTier;
use holdout_core::events::SimEvent;

/// Receives outbound effects (rendering, audio, HUD hooks).
pub trait EffectSink {
    fn emit(&mut self, event: &SimEvent);
}

/// Buffers events; also the in-tick collector used by every system.
impl EffectSink for Vec<SimEvent> {
    fn emit(&mut self, event: &SimEvent) {
        self.push(event.clone());
    }
}

/// A request to place one enemy in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub tier: EnemyTier,
    pub position: Vec3,
    /// Speed multiplier of the wave that asked for it.
    pub speed_multiplier: f32,
}

/// Receives enemy spawn requests from the wave director.
pub trait SpawnSink {
    fn request_spawn(&mut self, request: SpawnRequest);
}

impl SpawnSink for Vec<SpawnRequest> {
    fn request_spawn(&mut self, request: SpawnRequest) {
        self.push(request);
    }
}

/// Hand every event to every sink. A panicking sink is logged and skipped
/// for that event; the rest of the dispatch still runs.
pub fn dispatch(sinks: &mut [Box<dyn EffectSink>], events: &[SimEvent]) {
    for event in events {
        for (index, sink) in sinks.iter_mut().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| sink.emit(event)));
            if let Err(payload) = result {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::error!("effect sink {index} panicked on {event:?}: {reason}");
            }
        }
    }
}
