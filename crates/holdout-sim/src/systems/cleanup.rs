//! Cleanup system: despawns dead enemies whose fade delay has elapsed.

use hecs::World;

use crate::scheduler::{ScheduledTask, ScheduledTaskQueue};
use crate::spatial::SpatialIndex;

/// Drain due `RemoveEnemy` tasks. Returns how many enemies were removed.
pub fn run(
    world: &mut World,
    index: &mut SpatialIndex,
    queue: &mut ScheduledTaskQueue<ScheduledTask>,
    now: f64,
) -> usize {
    let due = queue.drain_due_where(now, |task| matches!(task, ScheduledTask::RemoveEnemy(_)));
    let mut removed = 0;
    for task in due {
        if let ScheduledTask::RemoveEnemy(entity) = task {
            index.remove(entity);
            if world.despawn(entity).is_ok() {
                removed += 1;
            }
        }
    }
    removed
}
