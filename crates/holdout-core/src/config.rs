//! Simulation configuration.
//!
//! A single `SimConfig` is handed to the engine at construction. Every group
//! falls back to the defaults in `constants` for fields missing from JSON.
//! Invalid values are rejected up front by `validate`, never in the tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::{EnemyTier, WeaponType};

/// Configuration rejected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: String, value: f64 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: String, value: f64 },
    #[error("weapon {weapon:?} must fire at least one pellet")]
    NoPellets { weapon: WeaponType },
}

/// Player movement and survivability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub speed: f32,
    pub hitbox_radius: f32,
    pub dash_speed: f32,
    pub dash_duration_secs: f64,
    pub dash_cooldown_secs: f64,
    pub min_hit_effect_damage: f32,
    pub power_up_duration_secs: f64,
    pub shield_damage_reduction: f32,
    pub speed_boost_multiplier: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            speed: PLAYER_SPEED,
            hitbox_radius: PLAYER_HITBOX_RADIUS,
            dash_speed: DASH_SPEED,
            dash_duration_secs: DASH_DURATION_SECS,
            dash_cooldown_secs: DASH_COOLDOWN_SECS,
            min_hit_effect_damage: MIN_HIT_EFFECT_DAMAGE,
            power_up_duration_secs: POWER_UP_DURATION_SECS,
            shield_damage_reduction: SHIELD_DAMAGE_REDUCTION,
            speed_boost_multiplier: SPEED_BOOST_MULTIPLIER,
        }
    }
}

/// Stats for one weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponSpec {
    /// Ammo consumed per trigger pull.
    pub energy_cost: u32,
    pub cooldown_secs: f64,
    pub pellet_count: u32,
    /// Total fan angle (radians) the pellets are spread over.
    pub spread_arc: f32,
    pub projectile_speed: f32,
    pub damage: f32,
    pub knockback: f32,
    pub lifetime_secs: f64,
    /// 1 = light, higher shakes harder.
    pub power_class: u8,
    /// Ammo granted on unlock.
    pub starting_ammo: u32,
    pub max_ammo: u32,
}

/// One `WeaponSpec` per weapon type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTable {
    pub pistol: WeaponSpec,
    pub shotgun: WeaponSpec,
    pub smg: WeaponSpec,
    pub rocket_launcher: WeaponSpec,
}

impl WeaponTable {
    pub fn get(&self, weapon: WeaponType) -> &WeaponSpec {
        match weapon {
            WeaponType::Pistol => &self.pistol,
            WeaponType::Shotgun => &self.shotgun,
            WeaponType::Smg => &self.smg,
            WeaponType::RocketLauncher => &self.rocket_launcher,
        }
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self {
            pistol: WeaponSpec {
                energy_cost: 0,
                cooldown_secs: 0.35,
                pellet_count: 1,
                spread_arc: 0.0,
                projectile_speed: 28.0,
                damage: 10.0,
                knockback: 3.0,
                lifetime_secs: 1.2,
                power_class: 1,
                starting_ammo: 0,
                max_ammo: 0,
            },
            shotgun: WeaponSpec {
                energy_cost: 1,
                cooldown_secs: 0.9,
                pellet_count: 6,
                spread_arc: 0.5,
                projectile_speed: 24.0,
                damage: 8.0,
                knockback: 6.0,
                lifetime_secs: 0.5,
                power_class: 3,
                starting_ammo: 24,
                max_ammo: 48,
            },
            smg: WeaponSpec {
                energy_cost: 1,
                cooldown_secs: 0.1,
                pellet_count: 1,
                spread_arc: 0.08,
                projectile_speed: 32.0,
                damage: 6.0,
                knockback: 1.5,
                lifetime_secs: 0.9,
                power_class: 1,
                starting_ammo: 120,
                max_ammo: 240,
            },
            rocket_launcher: WeaponSpec {
                energy_cost: 1,
                cooldown_secs: 1.2,
                pellet_count: 1,
                spread_arc: 0.0,
                projectile_speed: 14.0,
                damage: 40.0,
                knockback: 10.0,
                lifetime_secs: 2.5,
                power_class: 4,
                starting_ammo: 8,
                max_ammo: 16,
            },
        }
    }
}

/// How an archetype hurts the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttackProfile {
    Melee {
        damage_per_sec: f32,
        range: f32,
    },
    Ranged {
        damage: f32,
        range: f32,
        fire_interval_secs: f64,
        bolt_speed: f32,
        bolt_lifetime_secs: f64,
    },
}

impl AttackProfile {
    pub fn range(&self) -> f32 {
        match *self {
            AttackProfile::Melee { range, .. } | AttackProfile::Ranged { range, .. } => range,
        }
    }
}

/// Stats for one enemy tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub speed: f32,
    pub max_health: f32,
    pub hitbox_radius: f32,
    pub score_value: u32,
    pub attack: AttackProfile,
}

/// One `EnemyArchetype` per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub grunt: EnemyArchetype,
    pub runner: EnemyArchetype,
    pub tank: EnemyArchetype,
    pub spitter: EnemyArchetype,
}

impl EnemyTable {
    pub fn get(&self, tier: EnemyTier) -> &EnemyArchetype {
        match tier {
            EnemyTier::Grunt => &self.grunt,
            EnemyTier::Runner => &self.runner,
            EnemyTier::Tank => &self.tank,
            EnemyTier::Spitter => &self.spitter,
        }
    }

    /// Largest hitbox of any tier, used to pad spatial queries.
    pub fn max_hitbox_radius(&self) -> f32 {
        EnemyTier::ALL
            .iter()
            .map(|&t| self.get(t).hitbox_radius)
            .fold(0.0, f32::max)
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            grunt: EnemyArchetype {
                speed: GRUNT_SPEED,
                max_health: GRUNT_HEALTH,
                hitbox_radius: GRUNT_HITBOX,
                score_value: 100,
                attack: AttackProfile::Melee {
                    damage_per_sec: GRUNT_DPS,
                    range: MELEE_RANGE,
                },
            },
            runner: EnemyArchetype {
                speed: RUNNER_SPEED,
                max_health: RUNNER_HEALTH,
                hitbox_radius: RUNNER_HITBOX,
                score_value: 75,
                attack: AttackProfile::Melee {
                    damage_per_sec: RUNNER_DPS,
                    range: MELEE_RANGE,
                },
            },
            tank: EnemyArchetype {
                speed: TANK_SPEED,
                max_health: TANK_HEALTH,
                hitbox_radius: TANK_HITBOX,
                score_value: 250,
                attack: AttackProfile::Melee {
                    damage_per_sec: TANK_DPS,
                    range: MELEE_RANGE + 0.3,
                },
            },
            spitter: EnemyArchetype {
                speed: SPITTER_SPEED,
                max_health: SPITTER_HEALTH,
                hitbox_radius: SPITTER_HITBOX,
                score_value: 150,
                attack: AttackProfile::Ranged {
                    damage: SPITTER_BOLT_DAMAGE,
                    range: SPITTER_RANGE,
                    fire_interval_secs: SPITTER_FIRE_INTERVAL_SECS,
                    bolt_speed: SPITTER_BOLT_SPEED,
                    bolt_lifetime_secs: 2.0,
                },
            },
        }
    }
}

/// Wave pacing and escalation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub initial_delay_secs: f64,
    pub between_wave_delay_secs: f64,
    pub completion_hold_secs: f64,
    pub spawn_interval_secs: f64,
    pub base_quota: u32,
    pub quota_per_wave: u32,
    pub speed_ramp: f32,
    pub max_speed_multiplier: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            initial_delay_secs: INITIAL_WAVE_DELAY_SECS,
            between_wave_delay_secs: BETWEEN_WAVE_DELAY_SECS,
            completion_hold_secs: WAVE_COMPLETION_HOLD_SECS,
            spawn_interval_secs: WAVE_SPAWN_INTERVAL_SECS,
            base_quota: WAVE_BASE_QUOTA,
            quota_per_wave: WAVE_QUOTA_PER_WAVE,
            speed_ramp: WAVE_SPEED_RAMP,
            max_speed_multiplier: WAVE_MAX_SPEED_MULTIPLIER,
        }
    }
}

/// Power cell pickup and delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveTuning {
    pub pickup_radius: f32,
    pub delivery_radius: f32,
    pub pickup_cooldown_secs: f32,
    pub cells_required: u32,
    pub bonus_enemies_per_delivery: u32,
}

impl Default for ObjectiveTuning {
    fn default() -> Self {
        Self {
            pickup_radius: CELL_PICKUP_RADIUS,
            delivery_radius: CELL_DELIVERY_RADIUS,
            pickup_cooldown_secs: CELL_PICKUP_COOLDOWN_SECS,
            cells_required: CELLS_REQUIRED,
            bonus_enemies_per_delivery: BONUS_ENEMIES_PER_DELIVERY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LastStandTuning {
    pub duration_secs: f64,
    pub kills_required: u32,
    pub restore_health: f32,
}

impl Default for LastStandTuning {
    fn default() -> Self {
        Self {
            duration_secs: LAST_STAND_DURATION_SECS,
            kills_required: LAST_STAND_KILLS_REQUIRED,
            restore_health: LAST_STAND_RESTORE_HEALTH,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboTuning {
    pub timeout_secs: f32,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            timeout_secs: COMBO_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    /// Per-tick velocity multiplier.
    pub decay: f32,
    /// Components below this snap to zero.
    pub min_speed: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            decay: KNOCKBACK_DECAY,
            min_speed: KNOCKBACK_MIN_SPEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrelTuning {
    pub hitbox_radius: f32,
    pub explosion_radius: f32,
    pub damage: f32,
    pub knockback: f32,
    pub chain_radius: f32,
    pub chain_delay_secs: f64,
    pub player_damage_scale: f32,
}

impl Default for BarrelTuning {
    fn default() -> Self {
        Self {
            hitbox_radius: BARREL_HITBOX,
            explosion_radius: BARREL_EXPLOSION_RADIUS,
            damage: BARREL_DAMAGE,
            knockback: BARREL_KNOCKBACK,
            chain_radius: BARREL_CHAIN_RADIUS,
            chain_delay_secs: BARREL_CHAIN_DELAY_SECS,
            player_damage_scale: BARREL_PLAYER_DAMAGE_SCALE,
        }
    }
}

/// Thermobaric area charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaChargeTuning {
    pub cooldown_secs: f64,
    pub radius: f32,
    pub damage: f32,
    pub knockback: f32,
}

impl Default for AreaChargeTuning {
    fn default() -> Self {
        Self {
            cooldown_secs: AREA_CHARGE_COOLDOWN_SECS,
            radius: AREA_CHARGE_RADIUS,
            damage: AREA_CHARGE_DAMAGE,
            knockback: AREA_CHARGE_KNOCKBACK,
        }
    }
}

/// Projectile behavior shared by all player weapons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub radius: f32,
    pub homing_range: f32,
    pub homing_strength: f32,
    pub rocket_explosion_radius: f32,
    pub pellet_jitter_rads: f32,
    pub screen_shake_per_power_class: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            radius: PROJECTILE_RADIUS,
            homing_range: HOMING_RANGE,
            homing_strength: HOMING_STRENGTH,
            rocket_explosion_radius: ROCKET_EXPLOSION_RADIUS,
            pellet_jitter_rads: PELLET_JITTER_RADS,
            screen_shake_per_power_class: SCREEN_SHAKE_PER_POWER_CLASS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub radius: f32,
    pub lifetime_secs: f64,
    pub kill_drop_chance: f64,
    pub health_amount: f32,
    pub ammo_amount: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            radius: PICKUP_RADIUS,
            lifetime_secs: PICKUP_LIFETIME_SECS,
            kill_drop_chance: KILL_DROP_CHANCE,
            health_amount: HEALTH_PICKUP_AMOUNT,
            ammo_amount: AMMO_PICKUP_AMOUNT,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    pub spatial_cell_size: f32,
    pub enemy_fade_secs: f64,
    pub player: PlayerTuning,
    pub weapons: WeaponTable,
    pub projectiles: ProjectileTuning,
    pub enemies: EnemyTable,
    pub waves: WaveTuning,
    pub objective: ObjectiveTuning,
    pub last_stand: LastStandTuning,
    pub combo: ComboTuning,
    pub knockback: KnockbackTuning,
    pub barrels: BarrelTuning,
    pub area_charge: AreaChargeTuning,
    pub pickups: PickupTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            spatial_cell_size: SPATIAL_CELL_SIZE,
            enemy_fade_secs: ENEMY_FADE_SECS,
            player: PlayerTuning::default(),
            weapons: WeaponTable::default(),
            projectiles: ProjectileTuning::default(),
            enemies: EnemyTable::default(),
            waves: WaveTuning::default(),
            objective: ObjectiveTuning::default(),
            last_stand: LastStandTuning::default(),
            combo: ComboTuning::default(),
            knockback: KnockbackTuning::default(),
            barrels: BarrelTuning::default(),
            area_charge: AreaChargeTuning::default(),
            pickups: PickupTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spatial_cell_size", self.spatial_cell_size as f64)?;
        positive("player.max_health", self.player.max_health as f64)?;
        positive("player.speed", self.player.speed as f64)?;
        positive("player.hitbox_radius", self.player.hitbox_radius as f64)?;
        positive("player.dash_duration_secs", self.player.dash_duration_secs)?;
        unit("player.shield_damage_reduction", self.player.shield_damage_reduction as f64)?;

        for weapon in WeaponType::ALL {
            let spec = self.weapons.get(weapon);
            if spec.pellet_count == 0 {
                return Err(ConfigError::NoPellets { weapon });
            }
            positive(&format!("weapons.{weapon:?}.cooldown_secs"), spec.cooldown_secs)?;
            positive(
                &format!("weapons.{weapon:?}.projectile_speed"),
                spec.projectile_speed as f64,
            )?;
            positive(&format!("weapons.{weapon:?}.lifetime_secs"), spec.lifetime_secs)?;
        }
        positive("projectiles.radius", self.projectiles.radius as f64)?;
        unit("projectiles.homing_strength", self.projectiles.homing_strength as f64)?;
        positive(
            "projectiles.rocket_explosion_radius",
            self.projectiles.rocket_explosion_radius as f64,
        )?;

        for tier in EnemyTier::ALL {
            let arch = self.enemies.get(tier);
            positive(&format!("enemies.{tier:?}.speed"), arch.speed as f64)?;
            positive(&format!("enemies.{tier:?}.max_health"), arch.max_health as f64)?;
            positive(&format!("enemies.{tier:?}.hitbox_radius"), arch.hitbox_radius as f64)?;
            positive(&format!("enemies.{tier:?}.attack.range"), arch.attack.range() as f64)?;
            if let AttackProfile::Ranged {
                fire_interval_secs,
                bolt_speed,
                ..
            } = arch.attack
            {
                positive(&format!("enemies.{tier:?}.fire_interval_secs"), fire_interval_secs)?;
                positive(&format!("enemies.{tier:?}.bolt_speed"), bolt_speed as f64)?;
            }
        }

        positive("waves.spawn_interval_secs", self.waves.spawn_interval_secs)?;
        positive("waves.base_quota", self.waves.base_quota as f64)?;
        positive("objective.pickup_radius", self.objective.pickup_radius as f64)?;
        positive("objective.delivery_radius", self.objective.delivery_radius as f64)?;
        positive("objective.cells_required", self.objective.cells_required as f64)?;
        positive("last_stand.duration_secs", self.last_stand.duration_secs)?;
        positive("last_stand.restore_health", self.last_stand.restore_health as f64)?;
        positive("combo.timeout_secs", self.combo.timeout_secs as f64)?;
        unit("knockback.decay", self.knockback.decay as f64)?;
        positive("barrels.explosion_radius", self.barrels.explosion_radius as f64)?;
        positive("barrels.chain_delay_secs", self.barrels.chain_delay_secs)?;
        positive("area_charge.radius", self.area_charge.radius as f64)?;
        positive("area_charge.cooldown_secs", self.area_charge.cooldown_secs)?;
        positive("pickups.radius", self.pickups.radius as f64)?;
        unit("pickups.kill_drop_chance", self.pickups.kill_drop_chance)?;
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field: field.to_string(),
            value,
        })
    }
}

fn unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange {
            field: field.to_string(),
            value,
        })
    }
}
