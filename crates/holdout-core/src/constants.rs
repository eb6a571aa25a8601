//! Simulation constants and default tuning parameters.
//!
//! Every value here is the default for a field of `SimConfig`; hosts can
//! override them through JSON configuration.

/// Nominal tick rate (Hz) used by hosts that step at a fixed rate.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Spatial index ---

/// Side length of a spatial hash cell (world units).
pub const SPATIAL_CELL_SIZE: f32 = 4.0;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 6.0;
pub const PLAYER_HITBOX_RADIUS: f32 = 0.5;

/// Height at which projectiles leave the muzzle.
pub const MUZZLE_HEIGHT: f32 = 1.0;

pub const DASH_SPEED: f32 = 18.0;
pub const DASH_DURATION_SECS: f64 = 0.2;
pub const DASH_COOLDOWN_SECS: f64 = 1.5;

/// Damage below which a melee tick does not raise a player-hit effect.
pub const MIN_HIT_EFFECT_DAMAGE: f32 = 0.1;

// --- Power-ups ---

pub const POWER_UP_DURATION_SECS: f64 = 10.0;

/// Fraction of incoming damage blocked while shielded.
pub const SHIELD_DAMAGE_REDUCTION: f32 = 0.5;

/// Movement multiplier while the speed power-up is active.
pub const SPEED_BOOST_MULTIPLIER: f32 = 1.4;

// --- Weapons ---

/// Small random angle added to each pellet (radians, +/-).
pub const PELLET_JITTER_RADS: f32 = 0.03;

/// Screen shake per weapon power class step.
pub const SCREEN_SHAKE_PER_POWER_CLASS: f32 = 0.15;

/// Collision radius of a player projectile.
pub const PROJECTILE_RADIUS: f32 = 0.15;

// --- Homing ---

pub const HOMING_RANGE: f32 = 12.0;

/// Fraction of the way the direction turns toward the target each tick.
pub const HOMING_STRENGTH: f32 = 0.08;

/// Radius of the explosion when a rocket detonates.
pub const ROCKET_EXPLOSION_RADIUS: f32 = 3.0;

// --- Area charge (thermobaric) ---

pub const AREA_CHARGE_COOLDOWN_SECS: f64 = 20.0;
pub const AREA_CHARGE_RADIUS: f32 = 8.0;
pub const AREA_CHARGE_DAMAGE: f32 = 150.0;
pub const AREA_CHARGE_KNOCKBACK: f32 = 14.0;

// --- Enemies ---

/// Delay between an enemy's death and its removal (cosmetic fade).
pub const ENEMY_FADE_SECS: f64 = 0.6;

/// Extra reach added to the separation distance when computing attack range.
pub const ATTACK_RANGE_EPSILON: f32 = 0.05;

pub const GRUNT_SPEED: f32 = 3.0;
pub const GRUNT_HEALTH: f32 = 30.0;
pub const GRUNT_DPS: f32 = 10.0;
pub const GRUNT_HITBOX: f32 = 0.5;

pub const RUNNER_SPEED: f32 = 5.5;
pub const RUNNER_HEALTH: f32 = 15.0;
pub const RUNNER_DPS: f32 = 6.0;
pub const RUNNER_HITBOX: f32 = 0.4;

pub const TANK_SPEED: f32 = 1.8;
pub const TANK_HEALTH: f32 = 120.0;
pub const TANK_DPS: f32 = 25.0;
pub const TANK_HITBOX: f32 = 0.9;

pub const SPITTER_SPEED: f32 = 2.5;
pub const SPITTER_HEALTH: f32 = 25.0;
pub const SPITTER_BOLT_DAMAGE: f32 = 8.0;
pub const SPITTER_RANGE: f32 = 10.0;
pub const SPITTER_FIRE_INTERVAL_SECS: f64 = 2.0;
pub const SPITTER_BOLT_SPEED: f32 = 9.0;
pub const SPITTER_HITBOX: f32 = 0.5;

/// Default melee reach measured center to center.
pub const MELEE_RANGE: f32 = 1.2;

// --- Knockback ---

/// Velocity multiplier applied to knockback every tick.
pub const KNOCKBACK_DECAY: f32 = 0.85;

/// Knockback components below this magnitude snap to zero.
pub const KNOCKBACK_MIN_SPEED: f32 = 0.1;

// --- Combo / score ---

pub const COMBO_TIMEOUT_SECS: f32 = 3.0;

// --- Waves ---

pub const INITIAL_WAVE_DELAY_SECS: f64 = 3.0;
pub const BETWEEN_WAVE_DELAY_SECS: f64 = 5.0;
pub const WAVE_COMPLETION_HOLD_SECS: f64 = 1.5;
pub const WAVE_SPAWN_INTERVAL_SECS: f64 = 0.8;
pub const WAVE_BASE_QUOTA: u32 = 6;
pub const WAVE_QUOTA_PER_WAVE: u32 = 3;

/// Enemy speed gained per wave beyond the first.
pub const WAVE_SPEED_RAMP: f32 = 0.05;
pub const WAVE_MAX_SPEED_MULTIPLIER: f32 = 1.5;

// --- Objective ---

pub const CELL_PICKUP_RADIUS: f32 = 1.5;
pub const CELL_DELIVERY_RADIUS: f32 = 2.5;
pub const CELL_PICKUP_COOLDOWN_SECS: f32 = 1.0;
pub const CELLS_REQUIRED: u32 = 3;
pub const BONUS_ENEMIES_PER_DELIVERY: u32 = 4;

// --- Last stand ---

pub const LAST_STAND_DURATION_SECS: f64 = 8.0;
pub const LAST_STAND_KILLS_REQUIRED: u32 = 5;
pub const LAST_STAND_RESTORE_HEALTH: f32 = 50.0;

// --- Barrels ---

pub const BARREL_HITBOX: f32 = 0.6;
pub const BARREL_EXPLOSION_RADIUS: f32 = 4.0;
pub const BARREL_DAMAGE: f32 = 80.0;
pub const BARREL_KNOCKBACK: f32 = 12.0;
pub const BARREL_CHAIN_RADIUS: f32 = 4.0;
pub const BARREL_CHAIN_DELAY_SECS: f64 = 0.25;

/// Fraction of barrel damage applied to the player.
pub const BARREL_PLAYER_DAMAGE_SCALE: f32 = 0.5;

// --- Pickups ---

pub const PICKUP_RADIUS: f32 = 0.6;
pub const PICKUP_LIFETIME_SECS: f64 = 15.0;
pub const KILL_DROP_CHANCE: f64 = 0.15;
pub const HEALTH_PICKUP_AMOUNT: f32 = 25.0;
pub const AMMO_PICKUP_AMOUNT: u32 = 20;
