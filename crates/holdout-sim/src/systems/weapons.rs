//! Weapon fire control.
//!
//! `fire` is a pure query that builds the projectile batch for a trigger
//! pull; `apply` commits its cost to the player. The split lets the caller
//! inspect a shot (pellet count, shake) before anything changes.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::components::{Player, Projectile, ProjectileKind, ProjectileOwner};
use holdout_core::config::{AreaChargeTuning, ProjectileTuning, WeaponTable};
use holdout_core::constants::MUZZLE_HEIGHT;
use holdout_core::enums::{ExplosionSource, PowerUpKind, WeaponType};
use holdout_core::types::{direction_from_angle, from_planar};

use crate::systems::damage::Explosion;

/// One projectile to spawn.
#[derive(Debug, Clone)]
pub struct ProjectileSpawn {
    pub projectile: Projectile,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Everything a trigger pull produces.
#[derive(Debug, Clone)]
pub struct FireSolution {
    pub weapon: WeaponType,
    pub muzzle: Vec3,
    pub projectiles: Vec<ProjectileSpawn>,
    pub screen_shake: f32,
    pub ammo_cost: u32,
}

/// Cooldown after RapidFire.
fn effective_cooldown(player: &Player, now: f64, table: &WeaponTable) -> f64 {
    let base = table.get(player.current_weapon).cooldown_secs;
    if player.has_power_up(PowerUpKind::RapidFire, now) {
        base * 0.5
    } else {
        base
    }
}

pub fn can_fire(player: &Player, now: f64, table: &WeaponTable) -> bool {
    if player.dead || player.dash.active {
        return false;
    }
    let spec = table.get(player.current_weapon);
    if player.ammo_for(player.current_weapon) < spec.energy_cost {
        return false;
    }
    match player.last_fire_at {
        Some(last) => now - last >= effective_cooldown(player, now, table),
        None => true,
    }
}

/// Build the shot for the current weapon, or `None` if it cannot fire.
/// Pellets fan evenly across the spread arc around the facing, each with a
/// little random jitter. The player is not modified.
pub fn fire(
    player: &Player,
    now: f64,
    table: &WeaponTable,
    tuning: &ProjectileTuning,
    rng: &mut ChaCha8Rng,
) -> Option<FireSolution> {
    if !can_fire(player, now, table) {
        return None;
    }
    let weapon = player.current_weapon;
    let spec = table.get(weapon);

    let mut pellets = spec.pellet_count;
    if player.has_power_up(PowerUpKind::SpreadShot, now) {
        pellets *= 2;
    }

    let muzzle = player.position + Vec3::Y * MUZZLE_HEIGHT;
    let mut projectiles = Vec::with_capacity(pellets as usize);
    for i in 0..pellets {
        let offset = if pellets > 1 {
            -spec.spread_arc * 0.5 + spec.spread_arc * i as f32 / (pellets - 1) as f32
        } else {
            0.0
        };
        let jitter = if tuning.pellet_jitter_rads > 0.0 {
            rng.gen_range(-tuning.pellet_jitter_rads..=tuning.pellet_jitter_rads)
        } else {
            0.0
        };
        let dir = direction_from_angle(player.facing + offset + jitter);
        projectiles.push(ProjectileSpawn {
            projectile: Projectile {
                owner: ProjectileOwner::Player(player.id),
                kind: ProjectileKind::Weapon(weapon),
                damage: spec.damage,
                knockback: spec.knockback,
                radius: tuning.radius,
                lifetime_secs: spec.lifetime_secs,
                created_at: now,
            },
            position: muzzle,
            velocity: from_planar(dir * spec.projectile_speed, 0.0),
        });
    }

    Some(FireSolution {
        weapon,
        muzzle,
        projectiles,
        screen_shake: spec.power_class as f32 * tuning.screen_shake_per_power_class,
        ammo_cost: spec.energy_cost,
    })
}

/// Commit a shot: pay its ammo and start the cooldown.
pub fn apply(player: &mut Player, solution: &FireSolution, now: f64) {
    let ammo = player.ammo.entry(solution.weapon).or_insert(0);
    *ammo = ammo.saturating_sub(solution.ammo_cost);
    player.last_fire_at = Some(now);
}

/// Switch to the weapon in a 1-based slot. Only unlocked weapons other than
/// the current one are accepted.
pub fn switch_weapon(player: &mut Player, slot: u8) -> Option<WeaponType> {
    let weapon = WeaponType::from_slot(slot)?;
    if weapon == player.current_weapon || !player.unlocked.contains(&weapon) {
        return None;
    }
    player.current_weapon = weapon;
    Some(weapon)
}

/// Grant a weapon with its starting ammo. Returns false if already owned.
pub fn unlock_weapon(player: &mut Player, weapon: WeaponType, table: &WeaponTable) -> bool {
    if !player.unlocked.insert(weapon) {
        return false;
    }
    player.ammo.insert(weapon, table.get(weapon).starting_ammo);
    true
}

/// Add ammo to every unlocked weapon, capped at each weapon's maximum.
pub fn add_ammo(player: &mut Player, amount: u32, table: &WeaponTable) {
    for &weapon in &player.unlocked {
        let cap = table.get(weapon).max_ammo;
        let ammo = player.ammo.entry(weapon).or_insert(0);
        *ammo = ammo.saturating_add(amount).min(cap);
    }
}

/// Trigger the area charge if its cooldown has run out.
pub fn use_area_charge(player: &mut Player, now: f64, tuning: &AreaChargeTuning) -> Option<Explosion> {
    if player.dead || now < player.area_charge_ready_at {
        return None;
    }
    player.area_charge_ready_at = now + tuning.cooldown_secs;
    Some(Explosion {
        position: player.position,
        radius: tuning.radius,
        damage: tuning.damage,
        knockback: tuning.knockback,
        source: ExplosionSource::AreaCharge,
    })
}
