//! Events emitted by the simulation for rendering, audio and UI collaborators.
//!
//! Every outbound effect of a tick is one `SimEvent`. Entity handles are
//! exported as their `to_bits` value so events stay plain data.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Fire-and-forget notification for collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    // --- Enemies ---
    EnemySpawned {
        id: u64,
        tier: EnemyTier,
        position: Vec3,
    },
    EnemyMoved {
        id: u64,
        position: Vec3,
        facing: f32,
        state: EnemyState,
    },
    EnemyKilled {
        id: u64,
        tier: EnemyTier,
        position: Vec3,
    },

    // --- Weapons ---
    MuzzleFlash {
        position: Vec3,
        facing: f32,
        weapon: WeaponType,
    },
    WeaponFired {
        weapon: WeaponType,
        pellets: u32,
    },
    WeaponSwitched {
        weapon: WeaponType,
    },
    WeaponUnlocked {
        weapon: WeaponType,
    },
    AreaChargeFired {
        position: Vec3,
        radius: f32,
    },
    Explosion {
        position: Vec3,
        radius: f32,
        source: ExplosionSource,
    },

    // --- Objective ---
    ItemPickedUp {
        id: u64,
    },
    ItemDropped {
        id: u64,
        position: Vec3,
    },
    ItemDelivered {
        id: u64,
        delivered: u32,
        required: u32,
    },
    ObjectiveComplete,

    // --- Waves ---
    WaveStarted {
        wave: u32,
        enemies: u32,
    },
    WaveCompleted {
        wave: u32,
    },

    // --- Feedback ---
    ScreenShake {
        magnitude: f32,
    },
    DamageNumber {
        position: Vec3,
        amount: f32,
    },
    ScorePopup {
        position: Vec3,
        points: u32,
        combo: u32,
    },
    HealNumber {
        position: Vec3,
        amount: f32,
    },
    PlayerHit {
        damage: f32,
    },
    PickupCollected {
        id: u64,
    },
    Notification {
        text: String,
    },

    // --- Last stand ---
    LastStandStarted {
        kills_required: u32,
        duration_secs: f64,
    },
    LastStandSucceeded {
        restored_health: f32,
    },
    LastStandFailed,

    // --- End of run ---
    PlayerDied,
    GameWon,
}
