//! Projectile physics: homing, integration, culling.
//!
//! Hits against enemies, barrels and the player are resolved afterwards by
//! the collision system. A rocket culled here still explodes.

use glam::{Vec2, Vec3};
use hecs::{Entity, World};

use holdout_core::components::{Enemy, Position, Projectile, Velocity};
use holdout_core::config::ProjectileTuning;
use holdout_core::enums::{EnemyState, ExplosionSource};
use holdout_core::types::{from_planar, planar, planar_distance};
use holdout_map::ArenaMap;

use crate::spatial::SpatialIndex;
use crate::systems::damage::Explosion;

/// Nearest live enemy within `range` of `origin`. Equal distances go to the
/// lowest handle.
pub fn find_homing_target(
    world: &World,
    index: &mut SpatialIndex,
    origin: Vec3,
    range: f32,
) -> Option<(Entity, Vec3)> {
    let mut best: Option<(Entity, Vec3, f32)> = None;
    for &candidate in index.query_near(origin.x, origin.z, range) {
        let Ok(mut query) = world.query_one::<(&Enemy, &Position)>(candidate) else {
            continue;
        };
        let Some((enemy, pos)) = query.get() else {
            continue;
        };
        if enemy.state == EnemyState::Dead {
            continue;
        }
        let dist = planar_distance(origin, pos.0);
        if dist > range {
            continue;
        }
        // Candidates arrive sorted by handle, so strict `<` keeps the lowest.
        if best.map_or(true, |(_, _, d)| dist < d) {
            best = Some((candidate, pos.0, dist));
        }
    }
    best.map(|(e, p, _)| (e, p))
}

/// Turn `velocity` toward `target` by `strength` (0..=1), keeping its speed.
pub fn steer_toward(position: Vec3, velocity: Vec3, target: Vec3, strength: f32) -> Vec3 {
    let speed = planar(velocity).length();
    let heading = planar(velocity).normalize_or_zero();
    let desired = (planar(target) - planar(position)).normalize_or_zero();
    if heading == Vec2::ZERO || desired == Vec2::ZERO {
        return velocity;
    }
    let blended = heading.lerp(desired, strength).normalize_or_zero();
    if blended == Vec2::ZERO {
        return velocity;
    }
    from_planar(blended * speed, velocity.y)
}

/// Advance every projectile by `dt`. Returns rocket explosions from culled
/// rockets.
pub fn run(
    world: &mut World,
    index: &mut SpatialIndex,
    map: &ArenaMap,
    tuning: &ProjectileTuning,
    now: f64,
    dt: f32,
) -> Vec<Explosion> {
    let projectiles: Vec<(Entity, Vec3, Vec3, Projectile)> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(e, (proj, pos, vel))| (e, pos.0, vel.0, proj.clone()))
        .collect();

    let mut moves: Vec<(Entity, Vec3, Vec3)> = Vec::with_capacity(projectiles.len());
    let mut culled: Vec<Entity> = Vec::new();
    let mut explosions = Vec::new();

    for (entity, pos, mut vel, proj) in projectiles {
        if proj.kind.is_homing() {
            if let Some((_, target)) = find_homing_target(world, index, pos, tuning.homing_range) {
                vel = steer_toward(pos, vel, target, tuning.homing_strength);
            }
        }

        let next = pos + vel * dt;
        let expired = now - proj.created_at > proj.lifetime_secs;
        let blocked = !map.is_walkable(next.x, next.z);
        if expired || blocked {
            culled.push(entity);
            if proj.kind.is_homing() {
                explosions.push(Explosion {
                    position: if blocked { pos } else { next },
                    radius: tuning.rocket_explosion_radius,
                    damage: proj.damage,
                    knockback: proj.knockback,
                    source: ExplosionSource::Rocket,
                });
            }
        } else {
            moves.push((entity, next, vel));
        }
    }

    for (entity, next, vel) in moves {
        if let Ok((pos, v)) = world.query_one_mut::<(&mut Position, &mut Velocity)>(entity) {
            pos.0 = next;
            v.0 = vel;
        }
    }
    for entity in culled {
        let _ = world.despawn(entity);
    }
    explosions
}
