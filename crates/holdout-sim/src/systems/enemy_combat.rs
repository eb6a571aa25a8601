//! Enemy motion and combat.
//!
//! Per live enemy: knockback or steering, hard separation from the player,
//! spatial index refresh, then the `Chasing`/`Attacking` decision and the
//! attack itself. Enemies are processed in handle order.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use holdout_ai::{SteeringContext, SteeringDelegate};
use holdout_core::components::{
    AttackState, Enemy, Facing, Player, Position, Projectile, ProjectileKind, ProjectileOwner,
    Velocity,
};
use holdout_core::config::{AttackProfile, SimConfig};
use holdout_core::constants::{ATTACK_RANGE_EPSILON, MUZZLE_HEIGHT};
use holdout_core::enums::EnemyState;
use holdout_core::events::SimEvent;
use holdout_core::types::{angle_of, from_planar, planar, planar_distance};
use holdout_map::ArenaMap;

use crate::spatial::SpatialIndex;
use crate::systems::combat_math::process_knockback;
use crate::systems::damage::damage_player;
use crate::world_setup;

/// Damage dealt to the player by melee this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemyCombatOutcome {
    pub melee_damage: f32,
    pub bolts_fired: u32,
}

/// Attack range used for the chase/attack decision: the configured range,
/// but always at least the separation distance plus a small epsilon.
pub fn effective_attack_range(configured: f32, separation: f32) -> f32 {
    configured.max(separation + ATTACK_RANGE_EPSILON)
}

/// Move along each axis only if the destination is walkable.
fn slide_move(map: &ArenaMap, position: Vec3, step: Vec2) -> Vec3 {
    let mut pos = position;
    if map.is_walkable(pos.x + step.x, pos.z) {
        pos.x += step.x;
    }
    if map.is_walkable(pos.x, pos.z + step.y) {
        pos.z += step.y;
    }
    pos
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    index: &mut SpatialIndex,
    player: &mut Player,
    map: &ArenaMap,
    steering: &mut dyn SteeringDelegate,
    config: &SimConfig,
    last_stand_active: bool,
    now: f64,
    dt: f32,
    events: &mut Vec<SimEvent>,
) -> EnemyCombatOutcome {
    let mut outcome = EnemyCombatOutcome::default();

    let mut enemies: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, enemy)| enemy.state != EnemyState::Dead)
        .map(|(e, _)| e)
        .collect();
    enemies.sort_unstable_by_key(|e| e.to_bits());

    let mut bolts: Vec<(Projectile, Vec3, Vec3)> = Vec::new();

    for entity in enemies {
        let Ok((enemy, pos, vel, facing)) =
            world.query_one_mut::<(&mut Enemy, &mut Position, &mut Velocity, &mut Facing)>(entity)
        else {
            continue;
        };
        let archetype = config.enemies.get(enemy.tier);
        let separation = enemy.hitbox_radius + player.hitbox_radius;
        let attack_range = effective_attack_range(archetype.attack.range(), separation);

        if player.dead {
            enemy.state = EnemyState::Idle;
            vel.0 = Vec3::ZERO;
            continue;
        }

        // 1. Knockback overrides steering until it has decayed away.
        if enemy.knockback != Vec3::ZERO {
            let step = process_knockback(pos.0, enemy.knockback, dt, &config.knockback, |x, z| {
                map.is_walkable(x, z)
            });
            pos.0 = step.position;
            enemy.knockback = step.velocity;
            vel.0 = Vec3::ZERO;
        } else {
            let ctx = SteeringContext {
                entity_bits: entity.to_bits().get(),
                tier: enemy.tier,
                state: enemy.state,
                position: pos.0,
                player_position: player.position,
                attack_range,
                elapsed_secs: now,
                map,
            };
            let dir = steering.steer(&ctx).normalize_or_zero();
            let speed = archetype.speed * enemy.speed_multiplier;
            pos.0 = slide_move(map, pos.0, dir * speed * dt);
            vel.0 = from_planar(dir * speed, 0.0);
        }

        // 2. Hard separation from the player.
        let offset = planar(pos.0) - planar(player.position);
        let dist = offset.length();
        if dist < separation {
            let away = if dist > f32::EPSILON { offset / dist } else { Vec2::X };
            let pushed = planar(player.position) + away * separation;
            if map.is_walkable(pushed.x, pushed.y) {
                pos.0 = from_planar(pushed, pos.0.y);
            }
        }

        // 3. Index follows the final position.
        index.update(entity, pos.0.x, pos.0.z, enemy.hitbox_radius);

        // 4. Chase or attack.
        let to_player = planar(player.position) - planar(pos.0);
        facing.0 = angle_of(to_player);
        let dist = planar_distance(pos.0, player.position);
        enemy.state = if dist <= attack_range {
            EnemyState::Attacking
        } else {
            EnemyState::Chasing
        };

        // 5. Attack.
        match (&mut enemy.attack, archetype.attack) {
            (AttackState::Melee, AttackProfile::Melee { damage_per_sec, .. }) => {
                if enemy.state == EnemyState::Attacking {
                    outcome.melee_damage +=
                        damage_player(player, damage_per_sec * dt, now, &config.player, last_stand_active);
                }
            }
            (
                AttackState::Ranged { reload_remaining },
                AttackProfile::Ranged {
                    damage,
                    fire_interval_secs,
                    bolt_speed,
                    bolt_lifetime_secs,
                    ..
                },
            ) => {
                *reload_remaining = (*reload_remaining - dt as f64).max(0.0);
                if enemy.state == EnemyState::Attacking && *reload_remaining <= 0.0 {
                    *reload_remaining = fire_interval_secs;
                    let dir = to_player.normalize_or_zero();
                    bolts.push((
                        Projectile {
                            owner: ProjectileOwner::Enemy(entity),
                            kind: ProjectileKind::EnemyBolt,
                            damage,
                            knockback: 0.0,
                            radius: config.projectiles.radius,
                            lifetime_secs: bolt_lifetime_secs,
                            created_at: now,
                        },
                        pos.0 + Vec3::Y * MUZZLE_HEIGHT,
                        from_planar(dir * bolt_speed, 0.0),
                    ));
                }
            }
            _ => {}
        }

        events.push(SimEvent::EnemyMoved {
            id: entity.to_bits().get(),
            position: pos.0,
            facing: facing.0,
            state: enemy.state,
        });
    }

    if outcome.melee_damage > 0.0 && outcome.melee_damage >= config.player.min_hit_effect_damage {
        events.push(SimEvent::PlayerHit {
            damage: outcome.melee_damage,
        });
    }

    for (projectile, position, velocity) in bolts {
        world_setup::spawn_projectile(world, projectile, position, velocity);
        outcome.bolts_fired += 1;
    }
    outcome
}
