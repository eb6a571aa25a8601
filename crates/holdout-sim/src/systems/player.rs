//! Player control: weapon slots, facing, dash, movement, buff expiry.

use glam::{Vec2, Vec3};

use holdout_core::commands::TickInput;
use holdout_core::components::Player;
use holdout_core::config::SimConfig;
use holdout_core::enums::PowerUpKind;
use holdout_core::events::SimEvent;
use holdout_core::types::{angle_of, direction_from_angle, from_planar};
use holdout_map::ArenaMap;

use crate::systems::combat_math::{update_combo_state, ComboEvent};
use crate::systems::last_stand::LastStand;
use crate::systems::weapons;

/// Clamp stick input to the unit disc.
fn stick(x: f32, y: f32) -> Vec2 {
    let v = Vec2::new(x, y);
    if v.length_squared() > 1.0 {
        v.normalize()
    } else {
        v
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    player: &mut Player,
    input: &TickInput,
    map: &ArenaMap,
    config: &SimConfig,
    last_stand: &LastStand,
    now: f64,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    update_combo_state(&mut player.combo, ComboEvent::Elapsed(dt), &config.combo);
    player.power_ups.retain(|_, &mut expiry| expiry > now);

    if player.dead {
        player.velocity = Vec3::ZERO;
        return;
    }

    if let Some(slot) = input.weapon_slot {
        if let Some(weapon) = weapons::switch_weapon(player, slot) {
            events.push(SimEvent::WeaponSwitched { weapon });
        }
    }

    let movement = stick(input.move_x, input.move_y);
    let aim = Vec2::new(input.aim_x, input.aim_y);
    if aim.length_squared() > f32::EPSILON {
        player.facing = angle_of(aim);
    } else if movement.length_squared() > f32::EPSILON {
        player.facing = angle_of(movement);
    }

    if last_stand.is_active() {
        last_stand.apply_effects(player);
        return;
    }

    let tuning = &config.player;
    if player.dash.active && now - player.dash.started_at >= tuning.dash_duration_secs {
        player.dash.active = false;
    }
    if input.dash && !player.dash.active && now >= player.dash.ready_at {
        let direction = if movement.length_squared() > f32::EPSILON {
            movement.normalize()
        } else {
            direction_from_angle(player.facing)
        };
        player.dash.active = true;
        player.dash.direction = direction;
        player.dash.started_at = now;
        player.dash.ready_at = now + tuning.dash_cooldown_secs;
    }

    let velocity = if player.dash.active {
        player.dash.direction * tuning.dash_speed
    } else {
        let mut speed = tuning.speed;
        if player.has_power_up(PowerUpKind::Speed, now) {
            speed *= tuning.speed_boost_multiplier;
        }
        movement * speed
    };

    let step = velocity * dt;
    let mut pos = player.position;
    if map.is_walkable(pos.x + step.x, pos.z) {
        pos.x += step.x;
    }
    if map.is_walkable(pos.x, pos.z + step.y) {
        pos.z += step.y;
    }
    player.position = pos;
    player.velocity = from_planar(velocity, 0.0);
}
