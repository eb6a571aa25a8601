//! UI summary: the pull-based view of the simulation after each tick.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::ComboState;
use crate::enums::*;
use crate::types::SimTime;

/// Everything the HUD needs, rebuilt after every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSummary {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub player: PlayerView,
    pub combo: ComboState,
    pub objective: ObjectiveView,
    pub last_stand: LastStandView,
    pub score: ScoreView,
    pub minimap: Vec<MinimapEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave_number: u32,
    pub phase: WavePhase,
    pub enemies_remaining: u32,
    pub enemies_total: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub current_weapon: WeaponType,
    pub ammo: BTreeMap<WeaponType, u32>,
    pub unlocked: Vec<WeaponType>,
    pub dash_ready: bool,
    /// Seconds until the area charge can be used again (0 = ready).
    pub area_charge_cooldown: f64,
    /// Power-ups with seconds remaining.
    pub power_ups: Vec<(PowerUpKind, f64)>,
    pub carrying_cell: bool,
    pub dead: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub phase: ObjectivePhase,
    pub delivered: u32,
    pub required: u32,
    pub delivery_point: Vec3,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LastStandView {
    pub phase: LastStandPhase,
    pub kills: u32,
    pub kills_required: u32,
    pub time_remaining: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub kills: u32,
    pub shots_fired: u32,
    pub waves_cleared: u32,
}

/// Position and kind only; no behavior state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimapEntry {
    pub kind: MinimapKind,
    pub x: f32,
    pub z: f32,
}
