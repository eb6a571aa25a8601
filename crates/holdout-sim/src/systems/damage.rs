//! Damage, knockback and explosion application.
//!
//! Every path that hurts an enemy goes through `apply_damage`, which reports
//! kills as `KillRecord`s so the engine can score them in one place.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use holdout_core::components::{Enemy, Player, Position, Velocity};
use holdout_core::config::PlayerTuning;
use holdout_core::enums::{EnemyState, EnemyTier, ExplosionSource, PowerUpKind};
use holdout_core::events::SimEvent;
use holdout_core::types::{from_planar, planar, planar_distance};

use crate::spatial::SpatialIndex;
use crate::systems::combat_math::explosion_falloff_damage;

/// An explosion waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub position: Vec3,
    pub radius: f32,
    pub damage: f32,
    pub knockback: f32,
    pub source: ExplosionSource,
}

/// An enemy that died this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillRecord {
    pub entity: Entity,
    pub tier: EnemyTier,
    pub position: Vec3,
}

/// Subtract `amount` from an enemy. Returns a kill record on the hit that
/// takes it to zero; dead or unknown enemies are ignored.
pub fn apply_damage(
    world: &mut World,
    entity: Entity,
    amount: f32,
    events: &mut Vec<SimEvent>,
) -> Option<KillRecord> {
    let Ok((enemy, pos, vel)) = world.query_one_mut::<(&mut Enemy, &Position, &mut Velocity)>(entity)
    else {
        return None;
    };
    if enemy.state == EnemyState::Dead || amount <= 0.0 {
        return None;
    }

    enemy.health -= amount;
    events.push(SimEvent::DamageNumber {
        position: pos.0,
        amount,
    });

    if enemy.health > 0.0 {
        return None;
    }
    enemy.health = 0.0;
    enemy.state = EnemyState::Dead;
    enemy.knockback = Vec3::ZERO;
    vel.0 = Vec3::ZERO;
    Some(KillRecord {
        entity,
        tier: enemy.tier,
        position: pos.0,
    })
}

/// Push a live enemy directly away from `origin` at `impulse` units/sec.
pub fn apply_knockback(world: &mut World, entity: Entity, origin: Vec3, impulse: f32) {
    let Ok(pos) = world.get::<&Position>(entity).map(|p| p.0) else {
        return;
    };
    let away = (planar(pos) - planar(origin)).normalize_or_zero();
    push_enemy(world, entity, away, impulse);
}

/// Add a knockback impulse along a planar direction.
pub fn push_enemy(world: &mut World, entity: Entity, direction: Vec2, impulse: f32) {
    let Ok(mut enemy) = world.get::<&mut Enemy>(entity) else {
        return;
    };
    if enemy.state == EnemyState::Dead || impulse <= 0.0 {
        return;
    }
    enemy.knockback += from_planar(direction.normalize_or_zero() * impulse, 0.0);
}

/// Damage and knock back every live enemy inside the blast radius.
pub fn apply_explosion(
    world: &mut World,
    index: &mut SpatialIndex,
    explosion: &Explosion,
    max_enemy_radius: f32,
    events: &mut Vec<SimEvent>,
) -> Vec<KillRecord> {
    events.push(SimEvent::Explosion {
        position: explosion.position,
        radius: explosion.radius,
        source: explosion.source,
    });

    let candidates = index
        .query_near(
            explosion.position.x,
            explosion.position.z,
            explosion.radius + max_enemy_radius,
        )
        .to_vec();

    let mut kills = Vec::new();
    for entity in candidates {
        let Ok(pos) = world.get::<&Position>(entity).map(|p| p.0) else {
            continue;
        };
        let dist = planar_distance(pos, explosion.position);
        let damage = explosion_falloff_damage(explosion.damage, dist, explosion.radius);
        if damage <= 0.0 {
            continue;
        }
        apply_knockback(world, entity, explosion.position, explosion.knockback);
        if let Some(kill) = apply_damage(world, entity, damage, events) {
            kills.push(kill);
        }
    }
    kills
}

/// Damage a barrel blast deals to the player at `player_pos`.
pub fn barrel_player_damage(explosion: &Explosion, player_pos: Vec3, scale: f32) -> f32 {
    if explosion.source != ExplosionSource::Barrel {
        return 0.0;
    }
    let dist = planar_distance(player_pos, explosion.position);
    explosion_falloff_damage(explosion.damage, dist, explosion.radius) * scale
}

/// Apply incoming damage to the player. Dashing, last stand and death make
/// the player immune; Shield scales the hit down. Returns the damage taken.
pub fn damage_player(
    player: &mut Player,
    raw: f32,
    now: f64,
    tuning: &PlayerTuning,
    last_stand_active: bool,
) -> f32 {
    if raw <= 0.0 || player.dead || player.dash.active || last_stand_active {
        return 0.0;
    }
    let mut amount = raw;
    if player.has_power_up(PowerUpKind::Shield, now) {
        amount *= 1.0 - tuning.shield_damage_reduction;
    }
    player.health -= amount;
    amount
}
