//! Player input and session commands.
//!
//! `TickInput` is sampled once per frame and consumed by the tick that
//! follows. `SimCommand`s are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Input snapshot for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement axes on the ground plane, each in [-1, 1]. `x` east, `y` north.
    pub move_x: f32,
    pub move_y: f32,
    /// Aim axes. Zero aim keeps the previous facing.
    pub aim_x: f32,
    pub aim_y: f32,
    pub shoot: bool,
    pub dash: bool,
    pub interact: bool,
    pub area_charge: bool,
    /// 1-based weapon slot to switch to.
    pub weapon_slot: Option<u8>,
}

/// Session-level actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Start a run from the main menu.
    StartRun,
    /// Pause the simulation. Deferred effects pause with it.
    Pause,
    /// Resume a paused simulation.
    Resume,
    /// Throw away the current run and start a fresh one.
    Restart,
}
