//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player weapon.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum WeaponType {
    /// Single shot, cheap, always available.
    #[default]
    Pistol,
    /// Multi-pellet fan, heavy shake.
    Shotgun,
    /// Fast single shots.
    Smg,
    /// Slow homing rocket that explodes on impact or expiry.
    RocketLauncher,
}

impl WeaponType {
    /// All weapons in slot order.
    pub const ALL: [WeaponType; 4] = [
        WeaponType::Pistol,
        WeaponType::Shotgun,
        WeaponType::Smg,
        WeaponType::RocketLauncher,
    ];

    /// Weapon bound to a 1-based slot number.
    pub fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(WeaponType::Pistol),
            2 => Some(WeaponType::Shotgun),
            3 => Some(WeaponType::Smg),
            4 => Some(WeaponType::RocketLauncher),
            _ => None,
        }
    }

    /// 1-based slot number.
    pub fn slot(self) -> u8 {
        match self {
            WeaponType::Pistol => 1,
            WeaponType::Shotgun => 2,
            WeaponType::Smg => 3,
            WeaponType::RocketLauncher => 4,
        }
    }

    /// Whether projectiles of this weapon steer toward enemies.
    pub fn is_homing(self) -> bool {
        matches!(self, WeaponType::RocketLauncher)
    }
}

/// Enemy tier. Each tier has its own archetype in the enemy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Baseline melee enemy.
    Grunt,
    /// Fast, fragile melee enemy.
    Runner,
    /// Slow, heavy melee enemy.
    Tank,
    /// Ranged enemy that keeps its distance and spits bolts.
    Spitter,
}

impl EnemyTier {
    pub const ALL: [EnemyTier; 4] = [
        EnemyTier::Grunt,
        EnemyTier::Runner,
        EnemyTier::Tank,
        EnemyTier::Spitter,
    ];
}

/// Enemy behavior state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle,
    Chasing,
    Attacking,
    Dead,
}

/// Timed player buffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Halves weapon cooldowns.
    RapidFire,
    /// Doubles pellet counts.
    SpreadShot,
    /// Reduces incoming damage.
    Shield,
    /// Increases movement speed.
    Speed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::SpreadShot,
        PowerUpKind::Shield,
        PowerUpKind::Speed,
    ];
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Player died.
    GameOver,
    /// Objective complete.
    Victory,
}

/// Wave director phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    Idle,
    /// Counting down to the next wave.
    Delaying,
    /// Wave in progress, spawning and/or fighting.
    Active,
    /// Wave cleared, short hold before the next delay.
    Completing,
}

/// Objective flow phase. `Complete` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectivePhase {
    #[default]
    NotCarrying,
    Carrying,
    Complete,
}

/// Last stand phase, once per life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastStandPhase {
    #[default]
    Available,
    Active,
    Succeeded,
    Failed,
}

/// What caused an explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionSource {
    Rocket,
    Barrel,
    AreaCharge,
}

/// Entity kinds shown on the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimapKind {
    Player,
    Enemy(EnemyTier),
    Pickup,
    Barrel,
    PowerCell,
    DeliveryPoint,
}
