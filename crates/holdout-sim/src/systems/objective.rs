//! Objective flow: carry power cells to the delivery point.
//!
//! `NotCarrying ⇄ Carrying → Complete`. Cells are picked up by walking over
//! them, dropped with interact (or forcibly, when the carrier is hit), and
//! delivered by carrying them into the delivery radius.

use glam::Vec3;
use hecs::{Entity, World};

use holdout_core::components::{PlayerId, Position, PowerCell};
use holdout_core::config::ObjectiveTuning;
use holdout_core::enums::ObjectivePhase;
use holdout_core::events::SimEvent;
use holdout_core::types::planar_distance;

/// What happened to the objective during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectiveUpdate {
    pub delivered: bool,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct ObjectiveFlow {
    tuning: ObjectiveTuning,
    delivery_point: Vec3,
    phase: ObjectivePhase,
    carried: Option<Entity>,
    delivered: u32,
    /// Seconds until a cell may be picked up again.
    pickup_cooldown: f32,
}

impl ObjectiveFlow {
    pub fn new(tuning: ObjectiveTuning, delivery_point: Vec3) -> Self {
        Self {
            tuning,
            delivery_point,
            phase: ObjectivePhase::NotCarrying,
            carried: None,
            delivered: 0,
            pickup_cooldown: 0.0,
        }
    }

    pub fn update(
        &mut self,
        world: &mut World,
        carrier: PlayerId,
        player_pos: Vec3,
        interact_pressed: bool,
        dt: f32,
        events: &mut Vec<SimEvent>,
    ) -> ObjectiveUpdate {
        let mut result = ObjectiveUpdate::default();
        if self.phase == ObjectivePhase::Complete {
            return result;
        }
        self.pickup_cooldown = (self.pickup_cooldown - dt).max(0.0);

        if let Some(cell) = self.carried {
            if interact_pressed {
                self.drop_at(world, cell, player_pos, events);
                return result;
            }

            if let Ok(mut pos) = world.get::<&mut Position>(cell) {
                pos.0 = player_pos;
            }
            if planar_distance(player_pos, self.delivery_point) <= self.tuning.delivery_radius {
                self.deliver(world, cell, events);
                result.delivered = true;
                result.completed = self.phase == ObjectivePhase::Complete;
            }
            return result;
        }

        if self.pickup_cooldown <= 0.0 {
            if let Some(cell) = self.nearest_free_cell(world, player_pos) {
                self.take(world, cell, carrier, events);
            }
        }
        result
    }

    /// Lowest-handle free cell within pickup radius.
    fn nearest_free_cell(&self, world: &World, player_pos: Vec3) -> Option<Entity> {
        let mut candidates: Vec<Entity> = world
            .query::<(&PowerCell, &Position)>()
            .iter()
            .filter(|(_, (cell, pos))| {
                !cell.collected
                    && !cell.delivered
                    && planar_distance(pos.0, player_pos) <= self.tuning.pickup_radius
            })
            .map(|(e, _)| e)
            .collect();
        candidates.sort_unstable_by_key(|e| e.to_bits());
        candidates.first().copied()
    }

    /// Pick up a specific cell. No-op while already carrying, once complete,
    /// or if the cell is not free.
    pub fn pick_up(
        &mut self,
        world: &mut World,
        cell: Entity,
        carrier: PlayerId,
        events: &mut Vec<SimEvent>,
    ) -> bool {
        if self.carried.is_some() || self.phase == ObjectivePhase::Complete {
            return false;
        }
        let free = world
            .get::<&PowerCell>(cell)
            .is_ok_and(|c| !c.collected && !c.delivered);
        if !free {
            return false;
        }
        self.take(world, cell, carrier, events);
        true
    }

    fn take(&mut self, world: &mut World, cell: Entity, carrier: PlayerId, events: &mut Vec<SimEvent>) {
        if let Ok(mut pc) = world.get::<&mut PowerCell>(cell) {
            pc.collected = true;
            pc.carrier = Some(carrier);
        }
        self.carried = Some(cell);
        self.phase = ObjectivePhase::Carrying;
        events.push(SimEvent::ItemPickedUp {
            id: cell.to_bits().get(),
        });
    }

    /// Drop the carried cell at `position` and restart the pickup cooldown,
    /// whether or not a cell was carried.
    pub fn force_drop_cell(&mut self, world: &mut World, position: Vec3, events: &mut Vec<SimEvent>) {
        if let Some(cell) = self.carried {
            self.drop_at(world, cell, position, events);
        } else {
            self.pickup_cooldown = self.tuning.pickup_cooldown_secs;
        }
    }

    fn drop_at(&mut self, world: &mut World, cell: Entity, position: Vec3, events: &mut Vec<SimEvent>) {
        if let Ok((pc, pos)) = world.query_one_mut::<(&mut PowerCell, &mut Position)>(cell) {
            pc.collected = false;
            pc.carrier = None;
            pos.0 = position;
        }
        self.carried = None;
        self.phase = ObjectivePhase::NotCarrying;
        self.pickup_cooldown = self.tuning.pickup_cooldown_secs;
        events.push(SimEvent::ItemDropped {
            id: cell.to_bits().get(),
            position,
        });
    }

    fn deliver(&mut self, world: &mut World, cell: Entity, events: &mut Vec<SimEvent>) {
        if let Ok((pc, pos)) = world.query_one_mut::<(&mut PowerCell, &mut Position)>(cell) {
            pc.delivered = true;
            pc.carrier = None;
            pos.0 = self.delivery_point;
        }
        self.carried = None;
        self.delivered += 1;
        events.push(SimEvent::ItemDelivered {
            id: cell.to_bits().get(),
            delivered: self.delivered,
            required: self.tuning.cells_required,
        });

        if self.delivered >= self.tuning.cells_required {
            self.phase = ObjectivePhase::Complete;
            log::info!("objective complete: {} cells delivered", self.delivered);
            events.push(SimEvent::ObjectiveComplete);
        } else {
            self.phase = ObjectivePhase::NotCarrying;
        }
    }

    pub fn phase(&self) -> ObjectivePhase {
        self.phase
    }

    pub fn carried(&self) -> Option<Entity> {
        self.carried
    }

    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    pub fn required(&self) -> u32 {
        self.tuning.cells_required
    }

    pub fn delivery_point(&self) -> Vec3 {
        self.delivery_point
    }

    pub fn pickup_cooldown(&self) -> f32 {
        self.pickup_cooldown
    }
}
