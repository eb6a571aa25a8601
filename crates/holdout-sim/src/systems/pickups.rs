//! Pickups: collection, expiry, kill drops and wave-clear weapon rewards.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::components::{Pickup, PickupKind, Player, Position};
use holdout_core::config::SimConfig;
use holdout_core::enums::{PowerUpKind, WeaponType};
use holdout_core::events::SimEvent;
use holdout_core::types::planar_distance;

use crate::systems::weapons;
use crate::world_setup;

/// Collect every pickup touching the player.
pub fn resolve(
    world: &mut World,
    player: &mut Player,
    config: &SimConfig,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    if player.dead {
        return;
    }
    let reach = player.hitbox_radius + config.pickups.radius;
    let mut touched: Vec<(Entity, PickupKind)> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| planar_distance(pos.0, player.position) <= reach)
        .map(|(e, (pickup, _))| (e, pickup.kind))
        .collect();
    touched.sort_unstable_by_key(|(e, _)| e.to_bits());

    for (entity, kind) in touched {
        apply_pickup(player, kind, config, now, events);
        events.push(SimEvent::PickupCollected {
            id: entity.to_bits().get(),
        });
        let _ = world.despawn(entity);
    }
}

fn apply_pickup(
    player: &mut Player,
    kind: PickupKind,
    config: &SimConfig,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    match kind {
        PickupKind::Health { amount } => {
            let before = player.health;
            player.health = (player.health + amount).min(player.max_health);
            events.push(SimEvent::HealNumber {
                position: player.position,
                amount: player.health - before,
            });
        }
        PickupKind::Ammo { amount } => {
            weapons::add_ammo(player, amount, &config.weapons);
            events.push(SimEvent::Notification {
                text: format!("+{amount} ammo"),
            });
        }
        PickupKind::PowerUp { kind } => {
            player
                .power_ups
                .insert(kind, now + config.player.power_up_duration_secs);
            events.push(SimEvent::Notification {
                text: format!("{kind:?}!"),
            });
        }
        PickupKind::Weapon { weapon } => {
            if weapons::unlock_weapon(player, weapon, &config.weapons) {
                log::debug!("weapon unlocked: {weapon:?}");
                events.push(SimEvent::WeaponUnlocked { weapon });
            } else {
                weapons::add_ammo(player, config.weapons.get(weapon).starting_ammo, &config.weapons);
            }
        }
    }
}

/// Remove pickups whose lifetime has run out.
pub fn expire(world: &mut World, now: f64) {
    let expired: Vec<Entity> = world
        .query::<&Pickup>()
        .iter()
        .filter(|(_, pickup)| pickup.expires_at <= now)
        .map(|(e, _)| e)
        .collect();
    for entity in expired {
        let _ = world.despawn(entity);
    }
}

/// Seeded roll for a drop where an enemy died.
pub fn roll_kill_drop(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Vec3,
    now: f64,
    config: &SimConfig,
) -> Option<Entity> {
    if !rng.gen_bool(config.pickups.kill_drop_chance) {
        return None;
    }
    let kind = match rng.gen_range(0..10) {
        0..=3 => PickupKind::Health {
            amount: config.pickups.health_amount,
        },
        4..=7 => PickupKind::Ammo {
            amount: config.pickups.ammo_amount,
        },
        _ => PickupKind::PowerUp {
            kind: PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())],
        },
    };
    Some(world_setup::spawn_pickup(
        world,
        kind,
        position,
        now + config.pickups.lifetime_secs,
    ))
}

/// Place a reward for a weapon the player does not own yet (and that is not
/// already lying in the arena) at a random item spawn point. `None` when no
/// such weapon or no spawn point exists. Rewards do not expire.
pub fn spawn_weapon_pickup(
    world: &mut World,
    player: &Player,
    rng: &mut ChaCha8Rng,
    spawn_points: &[Vec3],
) -> Option<Entity> {
    let on_floor: Vec<WeaponType> = world
        .query::<&Pickup>()
        .iter()
        .filter_map(|(_, pickup)| match pickup.kind {
            PickupKind::Weapon { weapon } => Some(weapon),
            _ => None,
        })
        .collect();
    let candidates: Vec<WeaponType> = WeaponType::ALL
        .into_iter()
        .filter(|w| !player.unlocked.contains(w) && !on_floor.contains(w))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    if spawn_points.is_empty() {
        log::warn!("weapon reward skipped: no item spawn points");
        return None;
    }
    let weapon = candidates[rng.gen_range(0..candidates.len())];
    let position = spawn_points[rng.gen_range(0..spawn_points.len())];
    Some(world_setup::spawn_pickup(
        world,
        PickupKind::Weapon { weapon },
        position,
        f64::INFINITY,
    ))
}
