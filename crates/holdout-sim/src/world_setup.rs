//! Entity spawn factories for setting up the arena world.
//!
//! Creates the player, barrels, power cells, enemies, projectiles and
//! pickups with their component bundles.

use glam::Vec3;
use hecs::{Entity, World};

use holdout_core::components::*;
use holdout_core::config::{AttackProfile, SimConfig};
use holdout_core::enums::{EnemyState, EnemyTier};
use holdout_map::ArenaMap;

/// Populate a fresh arena: barrels at every barrel point and one power cell
/// per required delivery, at the first item spawn points.
pub fn setup_arena(world: &mut World, map: &ArenaMap, config: &SimConfig) {
    for &point in &map.barrel_spawns {
        spawn_barrel(world, point, config.barrels.hitbox_radius);
    }
    for &point in map
        .item_spawns
        .iter()
        .take(config.objective.cells_required as usize)
    {
        spawn_power_cell(world, point);
    }
}

/// Create the player at the first player spawn point.
pub fn create_player(map: &ArenaMap, config: &SimConfig, id: PlayerId) -> Player {
    let spawn = map.player_spawns.first().copied().unwrap_or(Vec3::ZERO);
    Player::new(
        id,
        spawn,
        config.player.max_health,
        config.player.hitbox_radius,
    )
}

/// Spawn one enemy of `tier` at `position`.
pub fn spawn_enemy(
    world: &mut World,
    config: &SimConfig,
    tier: EnemyTier,
    position: Vec3,
    speed_multiplier: f32,
    target: Option<PlayerId>,
) -> Entity {
    let archetype = config.enemies.get(tier);
    let attack = match archetype.attack {
        AttackProfile::Melee { .. } => AttackState::Melee,
        AttackProfile::Ranged {
            fire_interval_secs, ..
        } => AttackState::Ranged {
            reload_remaining: fire_interval_secs,
        },
    };

    world.spawn((
        Enemy {
            tier,
            state: EnemyState::Idle,
            health: archetype.max_health,
            max_health: archetype.max_health,
            hitbox_radius: archetype.hitbox_radius,
            speed_multiplier,
            knockback: Vec3::ZERO,
            attack,
            target,
        },
        Position(position),
        Velocity(Vec3::ZERO),
        Facing(0.0),
    ))
}

/// Spawn a projectile moving at `velocity`.
pub fn spawn_projectile(
    world: &mut World,
    projectile: Projectile,
    position: Vec3,
    velocity: Vec3,
) -> Entity {
    let facing = holdout_core::types::angle_of(holdout_core::types::planar(velocity));
    world.spawn((projectile, Position(position), Velocity(velocity), Facing(facing)))
}

pub fn spawn_pickup(world: &mut World, kind: PickupKind, position: Vec3, expires_at: f64) -> Entity {
    world.spawn((Pickup { kind, expires_at }, Position(position)))
}

pub fn spawn_barrel(world: &mut World, position: Vec3, hitbox_radius: f32) -> Entity {
    world.spawn((
        Barrel {
            health: 1.0,
            exploding: false,
            hitbox_radius,
        },
        Position(position),
    ))
}

pub fn spawn_power_cell(world: &mut World, position: Vec3) -> Entity {
    world.spawn((PowerCell::default(), Position(position)))
}
