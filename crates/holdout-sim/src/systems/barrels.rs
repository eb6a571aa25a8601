//! Explosive barrels and their chain reactions.
//!
//! A barrel dies to a single hit. Its blast queues every other intact barrel
//! within the chain radius to detonate after a short delay; each barrel
//! explodes at most once.

use glam::Vec3;
use hecs::{Entity, World};

use holdout_core::components::{Barrel, Position};
use holdout_core::config::BarrelTuning;
use holdout_core::enums::ExplosionSource;
use holdout_core::types::planar_distance;

use crate::scheduler::{ScheduledTask, ScheduledTaskQueue};
use crate::systems::damage::Explosion;

/// First intact barrel (lowest handle) whose hitbox overlaps a circle.
pub fn hit_test(world: &World, position: Vec3, radius: f32) -> Option<Entity> {
    world
        .query::<(&Barrel, &Position)>()
        .iter()
        .filter(|(_, (barrel, pos))| {
            !barrel.exploding && planar_distance(pos.0, position) <= barrel.hitbox_radius + radius
        })
        .map(|(e, _)| e)
        .min_by_key(|e| e.to_bits())
}

/// Detonate a barrel: queue its neighbours and despawn it. Returns `None` for
/// unknown or already exploding barrels.
pub fn explode(
    world: &mut World,
    queue: &mut ScheduledTaskQueue<ScheduledTask>,
    id: Entity,
    now: f64,
    tuning: &BarrelTuning,
) -> Option<Explosion> {
    let center = {
        let (barrel, pos) = world.query_one_mut::<(&mut Barrel, &Position)>(id).ok()?;
        if barrel.exploding {
            return None;
        }
        barrel.exploding = true;
        barrel.health = 0.0;
        pos.0
    };

    let mut neighbours: Vec<Entity> = world
        .query::<(&Barrel, &Position)>()
        .iter()
        .filter(|&(e, (barrel, pos))| {
            e != id && !barrel.exploding && planar_distance(pos.0, center) <= tuning.chain_radius
        })
        .map(|(e, _)| e)
        .collect();
    neighbours.sort_unstable_by_key(|e| e.to_bits());

    for neighbour in neighbours {
        let task = ScheduledTask::ChainExplode(neighbour);
        if !queue.contains(task) {
            queue.schedule(task, now + tuning.chain_delay_secs);
        }
    }

    // A barrel that blew up on its own no longer needs its queued detonation.
    queue.cancel(ScheduledTask::ChainExplode(id));
    let _ = world.despawn(id);
    log::debug!("barrel {id:?} exploded at {center}");

    Some(Explosion {
        position: center,
        radius: tuning.explosion_radius,
        damage: tuning.damage,
        knockback: tuning.knockback,
        source: ExplosionSource::Barrel,
    })
}

/// Detonate every chained barrel that has come due.
pub fn update(
    world: &mut World,
    queue: &mut ScheduledTaskQueue<ScheduledTask>,
    now: f64,
    tuning: &BarrelTuning,
) -> Vec<Explosion> {
    let due = queue.drain_due_where(now, |task| matches!(task, ScheduledTask::ChainExplode(_)));
    let mut explosions = Vec::new();
    for task in due {
        if let ScheduledTask::ChainExplode(id) = task {
            if let Some(explosion) = explode(world, queue, id, now, tuning) {
                explosions.push(explosion);
            }
        }
    }
    explosions
}
