//! Steering delegates.
//!
//! The simulation asks a `SteeringDelegate` which way each enemy wants to
//! walk; speed, wall collision and separation are applied by the caller.
//! No ECS dependency, operates on plain data.

use glam::{Vec2, Vec3};

use holdout_core::enums::{EnemyState, EnemyTier};
use holdout_core::types::planar;
use holdout_map::ArenaMap;

use crate::profiles::get_profile;

/// Input to a steering decision for a single enemy.
pub struct SteeringContext<'a> {
    /// Stable handle bits of the enemy, usable as a per-enemy seed.
    pub entity_bits: u64,
    pub tier: EnemyTier,
    pub state: EnemyState,
    pub position: Vec3,
    pub player_position: Vec3,
    /// Effective attack range of this enemy.
    pub attack_range: f32,
    pub elapsed_secs: f64,
    pub map: &'a ArenaMap,
}

/// Chooses a movement direction for an enemy.
pub trait SteeringDelegate {
    /// Planar direction (`x`, `z`), unit length, or zero to hold position.
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2;
}

/// Default delegate: head for the player, weave if the tier does, keep range
/// for ranged tiers, and slide along walls that block the direct line.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChaseSteering;

impl SteeringDelegate for ChaseSteering {
    fn steer(&mut self, ctx: &SteeringContext<'_>) -> Vec2 {
        let profile = get_profile(ctx.tier);
        let to_player = planar(ctx.player_position) - planar(ctx.position);
        let dist = to_player.length();
        if dist < 1e-4 {
            return Vec2::ZERO;
        }
        let toward = to_player / dist;

        let desired = match profile.hold_range_fraction {
            Some(fraction) => {
                let hold = ctx.attack_range * fraction;
                if dist < hold {
                    -toward
                } else if dist > ctx.attack_range * 0.95 {
                    toward
                } else {
                    Vec2::ZERO
                }
            }
            None if profile.weave_amplitude > 0.0 => {
                // Phase offset per enemy so a pack doesn't weave in lockstep.
                let phase = (ctx.entity_bits % 628) as f64 / 100.0;
                let t = ctx.elapsed_secs * profile.weave_frequency as f64 * std::f64::consts::TAU;
                let angle = (t + phase).sin() as f32 * profile.weave_amplitude;
                Vec2::from_angle(angle).rotate(toward)
            }
            None => toward,
        };

        if desired == Vec2::ZERO {
            return desired;
        }
        slide_around_walls(ctx.map, ctx.position, desired, profile.probe_distance)
    }
}

/// If the probe ahead is blocked, fall back to the dominant axis, then the
/// other axis. Returns `desired` unchanged when nothing is free so the
/// mover's own wall collision stops it.
pub fn slide_around_walls(map: &ArenaMap, position: Vec3, desired: Vec2, probe: f32) -> Vec2 {
    let origin = planar(position);
    let free = |dir: Vec2| {
        let p = origin + dir * probe;
        map.is_walkable(p.x, p.y)
    };

    if free(desired) {
        return desired;
    }

    let sign = |v: f32| {
        if v > 0.0 {
            1.0
        } else if v < 0.0 {
            -1.0
        } else {
            0.0
        }
    };
    let x_axis = Vec2::new(sign(desired.x), 0.0);
    let z_axis = Vec2::new(0.0, sign(desired.y));
    let (first, second) = if desired.x.abs() >= desired.y.abs() {
        (x_axis, z_axis)
    } else {
        (z_axis, x_axis)
    };

    for candidate in [first, second] {
        if candidate.length_squared() > 0.0 && free(candidate) {
            return candidate;
        }
    }
    desired
}
