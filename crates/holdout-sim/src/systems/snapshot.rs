//! Snapshot system: reads the world and the engine-held state machines and
//! builds the `UiSummary` the HUD pulls after every tick.
//!
//! Read-only: never modifies the world.

use hecs::World;

use holdout_core::components::*;
use holdout_core::enums::*;
use holdout_core::state::*;
use holdout_core::types::SimTime;

use crate::systems::last_stand::LastStand;
use crate::systems::objective::ObjectiveFlow;
use crate::systems::wave_director::WaveDirector;

/// Build the full summary.
#[allow(clippy::too_many_arguments)]
pub fn build_summary(
    world: &World,
    player: &Player,
    time: &SimTime,
    phase: GamePhase,
    waves: &WaveDirector,
    objective: &ObjectiveFlow,
    last_stand: &LastStand,
    score: &ScoreView,
) -> UiSummary {
    let now = time.elapsed_secs;
    UiSummary {
        time: *time,
        phase,
        wave: WaveView {
            wave_number: waves.wave_number(),
            phase: waves.phase(),
            enemies_remaining: waves.enemies_remaining(),
            enemies_total: waves.enemies_total(),
        },
        player: build_player(player, now),
        combo: player.combo,
        objective: ObjectiveView {
            phase: objective.phase(),
            delivered: objective.delivered(),
            required: objective.required(),
            delivery_point: objective.delivery_point(),
        },
        last_stand: LastStandView {
            phase: last_stand.phase(),
            kills: last_stand.kills(),
            kills_required: last_stand.kills_required(),
            time_remaining: last_stand.time_remaining(now),
        },
        score: score.clone(),
        minimap: build_minimap(world, player, objective),
    }
}

fn build_player(player: &Player, now: f64) -> PlayerView {
    PlayerView {
        position: player.position,
        facing: player.facing,
        health: player.health,
        max_health: player.max_health,
        current_weapon: player.current_weapon,
        ammo: player.ammo.clone(),
        unlocked: player.unlocked.iter().copied().collect(),
        dash_ready: !player.dash.active && now >= player.dash.ready_at,
        area_charge_cooldown: (player.area_charge_ready_at - now).max(0.0),
        power_ups: player
            .power_ups
            .iter()
            .filter(|(_, &expiry)| expiry > now)
            .map(|(&kind, &expiry)| (kind, expiry - now))
            .collect(),
        carrying_cell: player.carried_cell.is_some(),
        dead: player.dead,
    }
}

/// Positions and kinds only.
fn build_minimap(world: &World, player: &Player, objective: &ObjectiveFlow) -> Vec<MinimapEntry> {
    let mut entries = vec![MinimapEntry {
        kind: MinimapKind::Player,
        x: player.position.x,
        z: player.position.z,
    }];

    for (_, (enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
        if enemy.state != EnemyState::Dead {
            entries.push(MinimapEntry {
                kind: MinimapKind::Enemy(enemy.tier),
                x: pos.0.x,
                z: pos.0.z,
            });
        }
    }
    for (_, (_, pos)) in world.query::<(&Pickup, &Position)>().iter() {
        entries.push(MinimapEntry {
            kind: MinimapKind::Pickup,
            x: pos.0.x,
            z: pos.0.z,
        });
    }
    for (_, (_, pos)) in world.query::<(&Barrel, &Position)>().iter() {
        entries.push(MinimapEntry {
            kind: MinimapKind::Barrel,
            x: pos.0.x,
            z: pos.0.z,
        });
    }
    for (_, (cell, pos)) in world.query::<(&PowerCell, &Position)>().iter() {
        if !cell.delivered && cell.carrier.is_none() {
            entries.push(MinimapEntry {
                kind: MinimapKind::PowerCell,
                x: pos.0.x,
                z: pos.0.z,
            });
        }
    }

    let delivery = objective.delivery_point();
    entries.push(MinimapEntry {
        kind: MinimapKind::DeliveryPoint,
        x: delivery.x,
        z: delivery.z,
    });
    entries
}
