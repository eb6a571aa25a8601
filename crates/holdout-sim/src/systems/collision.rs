//! Projectile hit resolution.
//!
//! Player shots test enemies through the spatial index first, then barrels.
//! Enemy bolts only test the player. Every projectile that hits is consumed.

use glam::Vec3;
use hecs::{Entity, World};

use holdout_core::components::{
    Enemy, Player, Position, Projectile, ProjectileOwner, Velocity,
};
use holdout_core::config::{BarrelTuning, PlayerTuning, ProjectileTuning};
use holdout_core::enums::{EnemyState, ExplosionSource};
use holdout_core::events::SimEvent;
use holdout_core::types::{planar, planar_distance};

use crate::scheduler::{ScheduledTask, ScheduledTaskQueue};
use crate::spatial::SpatialIndex;
use crate::systems::barrels;
use crate::systems::damage::{self, Explosion, KillRecord};

/// Results the engine acts on after collisions.
#[derive(Debug, Default)]
pub struct CollisionOutcome {
    pub kills: Vec<KillRecord>,
    pub explosions: Vec<Explosion>,
    /// Enemy bolts that actually hurt the player this tick.
    pub bolt_hits: u32,
}

/// Lowest-handle live enemy whose hitbox overlaps the projectile.
fn first_enemy_hit(
    world: &World,
    index: &mut SpatialIndex,
    position: Vec3,
    radius: f32,
    max_enemy_radius: f32,
) -> Option<Entity> {
    index
        .query_near(position.x, position.z, radius + max_enemy_radius)
        .iter()
        .copied()
        .find(|&candidate| {
            let Ok(mut query) = world.query_one::<(&Enemy, &Position)>(candidate) else {
                return false;
            };
            let overlaps = query.get().is_some_and(|(enemy, pos)| {
                enemy.state != EnemyState::Dead
                    && planar_distance(pos.0, position) <= enemy.hitbox_radius + radius
            });
            overlaps
        })
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    index: &mut SpatialIndex,
    queue: &mut ScheduledTaskQueue<ScheduledTask>,
    player: &mut Player,
    projectile_tuning: &ProjectileTuning,
    barrel_tuning: &BarrelTuning,
    player_tuning: &PlayerTuning,
    max_enemy_radius: f32,
    last_stand_active: bool,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    let projectiles: Vec<(Entity, Vec3, Vec3, Projectile)> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(e, (proj, pos, vel))| (e, pos.0, vel.0, proj.clone()))
        .collect();

    let mut consumed: Vec<Entity> = Vec::new();

    for (entity, pos, vel, proj) in projectiles {
        match proj.owner {
            ProjectileOwner::Player(_) => {
                let hit = first_enemy_hit(world, index, pos, proj.radius, max_enemy_radius);
                if let Some(enemy) = hit {
                    consumed.push(entity);
                    if proj.kind.is_homing() {
                        outcome.explosions.push(rocket_blast(pos, &proj, projectile_tuning));
                    } else {
                        damage::push_enemy(world, enemy, planar(vel), proj.knockback);
                        if let Some(kill) = damage::apply_damage(world, enemy, proj.damage, events) {
                            outcome.kills.push(kill);
                        }
                    }
                    continue;
                }

                if let Some(barrel) = barrels::hit_test(world, pos, proj.radius) {
                    consumed.push(entity);
                    if let Some(blast) = barrels::explode(world, queue, barrel, now, barrel_tuning) {
                        outcome.explosions.push(blast);
                    }
                    if proj.kind.is_homing() {
                        outcome.explosions.push(rocket_blast(pos, &proj, projectile_tuning));
                    }
                }
            }
            ProjectileOwner::Enemy(_) => {
                if player.dead
                    || planar_distance(pos, player.position) > player.hitbox_radius + proj.radius
                {
                    continue;
                }
                consumed.push(entity);
                let taken =
                    damage::damage_player(player, proj.damage, now, player_tuning, last_stand_active);
                if taken > 0.0 {
                    outcome.bolt_hits += 1;
                    if taken >= player_tuning.min_hit_effect_damage {
                        events.push(SimEvent::PlayerHit { damage: taken });
                    }
                }
            }
        }
    }

    for entity in consumed {
        let _ = world.despawn(entity);
    }
    outcome
}

fn rocket_blast(position: Vec3, proj: &Projectile, tuning: &ProjectileTuning) -> Explosion {
    Explosion {
        position,
        radius: tuning.rocket_explosion_radius,
        damage: proj.damage,
        knockback: proj.knockback,
        source: ExplosionSource::Rocket,
    }
}
