//! Simulation-time task queue.
//!
//! Deferred effects (enemy removal after the death fade, barrel chain
//! detonations) are keyed by the task value itself and fire once accumulated
//! simulation time reaches their due time. Nothing here reads a wall clock,
//! so pausing the tick pauses every pending task.

use std::collections::HashMap;
use std::hash::Hash;

use hecs::Entity;

/// Tasks the engine defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledTask {
    /// Despawn a dead enemy after its fade.
    RemoveEnemy(Entity),
    /// Detonate a barrel caught in a chain reaction.
    ChainExplode(Entity),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_at: f64,
    seq: u64,
}

/// Pending tasks keyed by value. Scheduling an already-pending task replaces
/// its due time instead of adding a second entry.
#[derive(Debug)]
pub struct ScheduledTaskQueue<T> {
    pending: HashMap<T, Pending>,
    next_seq: u64,
}

impl<T> Default for ScheduledTaskQueue<T> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> ScheduledTaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` at simulation time `due_at`, replacing any pending
    /// entry for the same task.
    pub fn schedule(&mut self, task: T, due_at: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(task, Pending { due_at, seq });
    }

    /// Drop a pending task. Returns whether it was pending.
    pub fn cancel(&mut self, task: T) -> bool {
        self.pending.remove(&task).is_some()
    }

    pub fn contains(&self, task: T) -> bool {
        self.pending.contains_key(&task)
    }

    /// Due time of a pending task.
    pub fn due_at(&self, task: T) -> Option<f64> {
        self.pending.get(&task).map(|p| p.due_at)
    }

    /// Remove and return every task due at or before `now`, ordered by due
    /// time then scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        self.drain_due_where(now, |_| true)
    }

    /// Like `drain_due`, restricted to tasks matching `filter`. Non-matching
    /// due tasks stay queued.
    pub fn drain_due_where(&mut self, now: f64, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let mut due: Vec<(T, Pending)> = self
            .pending
            .iter()
            .filter(|(task, p)| p.due_at <= now && filter(task))
            .map(|(task, p)| (*task, *p))
            .collect();
        due.sort_by(|a, b| a.1.due_at.total_cmp(&b.1.due_at).then(a.1.seq.cmp(&b.1.seq)));
        for (task, _) in &due {
            self.pending.remove(task);
        }
        due.into_iter().map(|(task, _)| task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
