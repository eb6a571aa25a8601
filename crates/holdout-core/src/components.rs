//! ECS components for hecs entities, plus the player record.
//!
//! Components are plain data. Game logic lives in the simulation systems.

use std::collections::{BTreeMap, BTreeSet};

use glam::{Vec2, Vec3};
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// World position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Facing angle in radians (0 = +z, clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing(pub f32);

/// Identifier of a player life. Enemies target it and power cells record it
/// as their carrier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Per-enemy attack bookkeeping. Stats live in the archetype table; this only
/// carries state that differs between melee and ranged enemies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackState {
    Melee,
    Ranged {
        /// Seconds until the next bolt may be fired.
        reload_remaining: f64,
    },
}

/// Hostile unit.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub tier: EnemyTier,
    pub state: EnemyState,
    pub health: f32,
    pub max_health: f32,
    pub hitbox_radius: f32,
    /// Wave speed multiplier fixed at spawn.
    pub speed_multiplier: f32,
    /// Transient impulse, decays every tick.
    pub knockback: Vec3,
    pub attack: AttackState,
    pub target: Option<PlayerId>,
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player(PlayerId),
    Enemy(Entity),
}

/// What kind of projectile this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Weapon(WeaponType),
    EnemyBolt,
}

impl ProjectileKind {
    pub fn is_homing(self) -> bool {
        matches!(self, ProjectileKind::Weapon(w) if w.is_homing())
    }
}

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub kind: ProjectileKind,
    pub damage: f32,
    /// Impulse speed applied to whatever it hits.
    pub knockback: f32,
    pub radius: f32,
    pub lifetime_secs: f64,
    pub created_at: f64,
}

/// Pickup payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PickupKind {
    Health { amount: f32 },
    /// Ammo for every unlocked weapon.
    Ammo { amount: u32 },
    PowerUp { kind: PowerUpKind },
    Weapon { weapon: WeaponType },
}

/// A collectible lying in the arena.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub expires_at: f64,
}

/// Single-hit explosive barrel.
#[derive(Debug, Clone)]
pub struct Barrel {
    pub health: f32,
    pub exploding: bool,
    pub hitbox_radius: f32,
}

/// Objective item.
#[derive(Debug, Clone, Default)]
pub struct PowerCell {
    pub collected: bool,
    pub delivered: bool,
    pub carrier: Option<PlayerId>,
}

/// Kill streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    /// Seconds until the streak lapses. Never negative.
    pub timer: f32,
    pub max_combo: u32,
}

/// Dash bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashState {
    pub active: bool,
    pub direction: Vec2,
    pub started_at: f64,
    /// Earliest time the next dash may start.
    pub ready_at: f64,
}

/// The player. Owned by the engine outside the ECS world, one per life.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub hitbox_radius: f32,
    pub ammo: BTreeMap<WeaponType, u32>,
    pub unlocked: BTreeSet<WeaponType>,
    pub current_weapon: WeaponType,
    pub last_fire_at: Option<f64>,
    pub dash: DashState,
    /// Earliest time the area charge may be used again.
    pub area_charge_ready_at: f64,
    pub combo: ComboState,
    /// Expiry timestamp per power-up.
    pub power_ups: BTreeMap<PowerUpKind, f64>,
    pub carried_cell: Option<Entity>,
    pub last_stand_used: bool,
    pub dead: bool,
}

impl Player {
    /// Fresh player holding only the starting weapon.
    pub fn new(id: PlayerId, position: Vec3, max_health: f32, hitbox_radius: f32) -> Self {
        let mut ammo = BTreeMap::new();
        ammo.insert(WeaponType::Pistol, 0);
        let mut unlocked = BTreeSet::new();
        unlocked.insert(WeaponType::Pistol);
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            facing: 0.0,
            health: max_health,
            max_health,
            hitbox_radius,
            ammo,
            unlocked,
            current_weapon: WeaponType::Pistol,
            last_fire_at: None,
            dash: DashState::default(),
            area_charge_ready_at: 0.0,
            combo: ComboState::default(),
            power_ups: BTreeMap::new(),
            carried_cell: None,
            last_stand_used: false,
            dead: false,
        }
    }

    /// Whether a power-up's expiry lies in the future.
    pub fn has_power_up(&self, kind: PowerUpKind, now: f64) -> bool {
        self.power_ups.get(&kind).is_some_and(|&expiry| expiry > now)
    }

    pub fn ammo_for(&self, weapon: WeaponType) -> u32 {
        self.ammo.get(&weapon).copied().unwrap_or(0)
    }
}
