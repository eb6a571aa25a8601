//! Pure combat arithmetic: score, combo, knockback, explosion falloff.

use glam::Vec3;

use holdout_core::components::ComboState;
use holdout_core::config::{ComboTuning, KnockbackTuning};

/// Score for a kill worth `base` at the given combo count.
///
/// Multiplier is `1 + (combo - 1) * 0.5`, floored; a combo of 0 counts as 1.
pub fn calculate_score(base: u32, combo: u32) -> u32 {
    let combo = combo.max(1);
    let multiplier = 1.0 + (combo - 1) as f64 * 0.5;
    (base as f64 * multiplier).floor() as u32
}

/// Something that changes the combo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComboEvent {
    Kill,
    /// Time passed without a kill.
    Elapsed(f32),
}

/// Advance the combo state machine.
pub fn update_combo_state(state: &mut ComboState, event: ComboEvent, tuning: &ComboTuning) {
    match event {
        ComboEvent::Kill => {
            state.count += 1;
            state.timer = tuning.timeout_secs;
            state.max_combo = state.max_combo.max(state.count);
        }
        ComboEvent::Elapsed(dt) => {
            state.timer = (state.timer - dt.max(0.0)).max(0.0);
            if state.timer == 0.0 {
                state.count = 0;
            }
        }
    }
}

/// Result of one knockback integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackStep {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Integrate a knockback impulse for one tick.
///
/// The x and z destinations are tested separately: a blocked axis keeps its
/// coordinate and loses its velocity, the other axis still moves. Surviving
/// velocity is multiplied by the decay rate and components under the
/// threshold snap to exactly zero.
pub fn process_knockback(
    position: Vec3,
    velocity: Vec3,
    dt: f32,
    tuning: &KnockbackTuning,
    walkable: impl Fn(f32, f32) -> bool,
) -> KnockbackStep {
    let mut pos = position;
    let mut vel = velocity;

    let next_x = pos.x + vel.x * dt;
    if walkable(next_x, pos.z) {
        pos.x = next_x;
    } else {
        vel.x = 0.0;
    }

    let next_z = pos.z + vel.z * dt;
    if walkable(pos.x, next_z) {
        pos.z = next_z;
    } else {
        vel.z = 0.0;
    }

    vel.x *= tuning.decay;
    vel.z *= tuning.decay;
    vel.y = 0.0;
    if vel.x.abs() < tuning.min_speed {
        vel.x = 0.0;
    }
    if vel.z.abs() < tuning.min_speed {
        vel.z = 0.0;
    }

    KnockbackStep {
        position: pos,
        velocity: vel,
    }
}

/// Damage dealt at `distance` from an explosion center:
/// `floor(base * (1 - 0.5 * distance / radius))`, zero outside the radius.
pub fn explosion_falloff_damage(base: f32, distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 || distance > radius {
        return 0.0;
    }
    (base * (1.0 - 0.5 * distance / radius)).floor()
}
