//! Full runs through the public engine API: waves, weapons, barrels, the
//! objective, last stand and effect sinks.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use holdout_core::commands::{SimCommand, TickInput};
use holdout_core::components::{Barrel, Enemy, PowerCell, Projectile};
use holdout_core::config::SimConfig;
use holdout_core::enums::*;
use holdout_core::events::SimEvent;
use holdout_map::ArenaMap;
use holdout_sim::scheduler::ScheduledTask;
use holdout_sim::systems::weapons;
use holdout_sim::{EffectSink, SimulationEngine};

const DT: f64 = 1.0 / 60.0;

const ARENA: [&str; 9] = [
    "############",
    "#E........E#",
    "#..........#",
    "#C...B....C#",
    "#..........#",
    "#.....P....#",
    "#..........#",
    "#C...D.....#",
    "############",
];

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<SimEvent>>>);

impl Recorder {
    fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }

    fn contains(&self, event: &SimEvent) -> bool {
        self.0.borrow().contains(event)
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl EffectSink for Recorder {
    fn emit(&mut self, event: &SimEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

struct Panicker;

impl EffectSink for Panicker {
    fn emit(&mut self, event: &SimEvent) {
        if matches!(event, SimEvent::WaveStarted { .. }) {
            panic!("renderer fell over");
        }
    }
}

fn started_engine(seed: u64) -> (SimulationEngine, Recorder) {
    started_engine_with(SimConfig {
        seed,
        ..Default::default()
    })
}

fn started_engine_with(config: SimConfig) -> (SimulationEngine, Recorder) {
    let map = ArenaMap::from_ascii(&ARENA, 2.0).unwrap();
    let mut engine = SimulationEngine::new(config, map).unwrap();
    let recorder = Recorder::default();
    engine.add_sink(Box::new(recorder.clone()));
    engine.queue_command(SimCommand::StartRun);
    engine.tick(&TickInput::default(), DT);
    (engine, recorder)
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn test_first_wave_spawns_enemies() {
    let (mut engine, recorder) = started_engine(1);
    for _ in 0..(60 * 4) {
        engine.tick(&idle(), DT);
    }
    let summary = engine.summary();
    assert_eq!(summary.wave.wave_number, 1);
    assert_eq!(summary.wave.phase, WavePhase::Active);
    assert!(recorder.contains(&SimEvent::WaveStarted {
        wave: 1,
        enemies: 6
    }));

    let spawned = recorder.count(|e| matches!(e, SimEvent::EnemySpawned { .. }));
    assert!(spawned >= 1);
    let enemy_spawns = &engine.map().enemy_spawns;
    for event in recorder.0.borrow().iter() {
        if let SimEvent::EnemySpawned { tier, position, .. } = event {
            assert_eq!(*tier, EnemyTier::Grunt);
            assert!(enemy_spawns.contains(position));
        }
    }
    assert_eq!(engine.spatial_index().len(), spawned);
}

#[test]
fn test_shotgun_fires_six_pellets() {
    let (mut engine, recorder) = started_engine(2);
    let table = engine.config().weapons.clone();
    assert!(weapons::unlock_weapon(engine.player_mut(), WeaponType::Shotgun, &table));

    engine.tick(
        &TickInput {
            weapon_slot: Some(2),
            ..idle()
        },
        DT,
    );
    assert!(recorder.contains(&SimEvent::WeaponSwitched {
        weapon: WeaponType::Shotgun
    }));

    let summary = engine.tick(
        &TickInput {
            shoot: true,
            ..idle()
        },
        DT,
    );
    assert!(recorder.contains(&SimEvent::WeaponFired {
        weapon: WeaponType::Shotgun,
        pellets: 6
    }));
    assert_eq!(engine.world().query::<&Projectile>().iter().count(), 6);
    assert_eq!(summary.player.ammo[&WeaponType::Shotgun], 23);
    assert_eq!(summary.score.shots_fired, 1);
}

#[test]
fn test_last_stand_success_restores_half_health() {
    let (mut engine, recorder) = started_engine(3);
    engine.player_mut().health = 0.0;
    let summary = engine.tick(&idle(), DT);
    assert_eq!(summary.last_stand.phase, LastStandPhase::Active);
    assert_eq!(summary.player.health, 1.0);
    assert_eq!(summary.phase, GamePhase::Active);

    let center = engine.player().position;
    for offset in [
        Vec3::new(1.5, 0.0, 0.0),
        Vec3::new(-1.5, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.5),
        Vec3::new(0.0, 0.0, -1.5),
        Vec3::new(1.2, 0.0, 1.2),
    ] {
        engine.spawn_enemy(EnemyTier::Grunt, center + offset);
    }

    let summary = engine.tick(
        &TickInput {
            area_charge: true,
            ..idle()
        },
        DT,
    );
    assert_eq!(summary.score.kills, 5);
    assert_eq!(summary.last_stand.phase, LastStandPhase::Succeeded);
    assert_eq!(summary.player.health, 50.0);
    assert!(recorder.contains(&SimEvent::LastStandSucceeded {
        restored_health: 50.0
    }));
    assert!(!summary.player.dead);
    assert!(engine.player().last_stand_used);
}

#[test]
fn test_last_stand_restore_clamped_to_max_health() {
    let mut config = SimConfig::default();
    config.last_stand.restore_health = 500.0;
    let (mut engine, recorder) = started_engine_with(config);
    assert!(!engine.player().last_stand_used);
    engine.player_mut().health = 0.0;
    engine.tick(&idle(), DT);
    assert!(engine.player().last_stand_used);

    let center = engine.player().position;
    for i in 0..5 {
        engine.spawn_enemy(EnemyTier::Grunt, center + Vec3::new(0.0, 0.0, 1.0 + i as f32 * 0.2));
    }
    let summary = engine.tick(
        &TickInput {
            area_charge: true,
            ..idle()
        },
        DT,
    );
    assert_eq!(summary.player.health, 100.0);
    assert!(recorder.contains(&SimEvent::LastStandSucceeded {
        restored_health: 100.0
    }));
    assert!(recorder.contains(&SimEvent::HealNumber {
        position: center,
        amount: 99.0
    }));
}

#[test]
fn test_placed_enemies_keep_wave_count_in_step() {
    let (mut engine, _recorder) = started_engine(10);
    let live = |engine: &SimulationEngine| {
        engine
            .world()
            .query::<&Enemy>()
            .iter()
            .filter(|(_, e)| e.state != EnemyState::Dead)
            .count() as u32
    };

    // Wave 1 begins at 3s and drips its last enemy out at 7s.
    for _ in 0..(60 * 7 + 30) {
        engine.tick(&idle(), DT);
    }
    assert_eq!(engine.waves().wave_number(), 1);
    assert_eq!(engine.waves().enemies_remaining(), 6);
    assert_eq!(live(&engine), 6);

    let center = engine.player().position;
    engine.spawn_enemy(EnemyTier::Grunt, center + Vec3::new(1.5, 0.0, 0.0));
    assert_eq!(engine.waves().enemies_remaining(), 7);
    assert_eq!(engine.waves().enemies_total(), 7);

    let summary = engine.tick(
        &TickInput {
            area_charge: true,
            ..idle()
        },
        DT,
    );
    assert!(summary.score.kills >= 1);
    assert_eq!(engine.waves().enemies_remaining(), live(&engine));
    assert_eq!(summary.wave.enemies_remaining, 7 - summary.score.kills);
}

#[test]
fn test_last_stand_timeout_ends_run() {
    let (mut engine, recorder) = started_engine(4);
    engine.player_mut().health = 0.0;
    engine.tick(&idle(), DT);
    let triggered_at = engine.time().elapsed_secs;

    let mut ticks = 0;
    while engine.phase() == GamePhase::Active && ticks < 60 * 12 {
        engine.tick(&idle(), DT);
        ticks += 1;
    }
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert!(engine.time().elapsed_secs - triggered_at >= 8.0 - 1e-9);
    assert!(recorder.contains(&SimEvent::LastStandFailed));
    assert!(recorder.contains(&SimEvent::PlayerDied));

    let frozen = engine.time();
    engine.tick(&idle(), DT);
    assert_eq!(engine.time(), frozen);
}

#[test]
fn test_second_lethal_hit_in_same_life_kills() {
    let (mut engine, recorder) = started_engine(5);
    engine.player_mut().health = 0.0;
    engine.tick(&idle(), DT);

    let center = engine.player().position;
    for i in 0..5 {
        engine.spawn_enemy(EnemyTier::Runner, center + Vec3::new(1.0 + i as f32 * 0.2, 0.0, 0.0));
    }
    engine.tick(
        &TickInput {
            area_charge: true,
            ..idle()
        },
        DT,
    );
    assert_eq!(engine.last_stand().phase(), LastStandPhase::Succeeded);

    engine.player_mut().health = 0.0;
    engine.tick(&idle(), DT);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(recorder.count(|e| matches!(e, SimEvent::LastStandStarted { .. })), 1);
}

#[test]
fn test_barrel_chain_after_delay_not_before() {
    let (mut engine, recorder) = started_engine(6);
    let player = engine.player().position;
    let first = engine.spawn_barrel(player + Vec3::new(0.0, 0.0, 3.0));
    let second = engine.spawn_barrel(player + Vec3::new(2.0, 0.0, 3.0));

    engine.tick(
        &TickInput {
            shoot: true,
            ..idle()
        },
        DT,
    );

    let mut detonated_at = None;
    for _ in 0..60 {
        engine.tick(&idle(), DT);
        if !engine.world().contains(first) {
            detonated_at = Some(engine.time().elapsed_secs);
            break;
        }
    }
    let t0 = detonated_at.expect("first barrel never exploded");
    let due = engine
        .tasks()
        .due_at(ScheduledTask::ChainExplode(second))
        .expect("second barrel not queued");
    assert!((due - (t0 + 0.25)).abs() < 1e-9);

    while engine.time().elapsed_secs + DT < due {
        engine.tick(&idle(), DT);
        assert!(engine.world().contains(second));
    }
    for _ in 0..2 {
        engine.tick(&idle(), DT);
    }
    assert!(!engine.world().contains(second));
    assert_eq!(engine.world().query::<&Barrel>().iter().count(), 1);
    assert_eq!(
        recorder.count(|e| matches!(
            e,
            SimEvent::Explosion {
                source: ExplosionSource::Barrel,
                ..
            }
        )),
        2
    );
    assert!(engine.player().health < 100.0);
}

#[test]
fn test_delivering_cells_wins_and_adds_bonus_enemies() {
    let (mut engine, recorder) = started_engine(7);
    let cells: Vec<Vec3> = engine.map().item_spawns.iter().take(3).copied().collect();
    let delivery = engine.map().delivery_point;

    for (i, cell) in cells.iter().enumerate() {
        engine.player_mut().position = *cell;
        engine.tick(&idle(), DT);
        assert_eq!(engine.objective().phase(), ObjectivePhase::Carrying);

        let remaining = engine.waves().enemies_remaining();
        recorder.clear();
        engine.player_mut().position = delivery;
        let summary = engine.tick(&idle(), DT);
        assert_eq!(summary.objective.delivered, i as u32 + 1);
        assert_eq!(engine.waves().enemies_remaining(), remaining + 4);
        assert_eq!(recorder.count(|e| matches!(e, SimEvent::EnemySpawned { .. })), 4);
    }

    assert_eq!(engine.phase(), GamePhase::Victory);
    assert!(recorder.contains(&SimEvent::ObjectiveComplete));
    assert!(recorder.contains(&SimEvent::GameWon));
    let delivered = engine
        .world()
        .query::<&PowerCell>()
        .iter()
        .filter(|(_, c)| c.delivered)
        .count();
    assert_eq!(delivered, 3);

    engine.queue_command(SimCommand::Restart);
    let summary = engine.tick(&idle(), DT);
    assert_eq!(summary.phase, GamePhase::Active);
    assert_eq!(summary.time.tick, 1);
    assert_eq!(summary.objective.delivered, 0);
    assert_eq!(summary.wave.wave_number, 0);
    assert_eq!(engine.world().query::<&PowerCell>().iter().count(), 3);
}

#[test]
fn test_dropping_cell_with_interact() {
    let (mut engine, recorder) = started_engine(8);
    let cell_at = engine.map().item_spawns[0];
    engine.player_mut().position = cell_at;
    engine.tick(&idle(), DT);
    assert!(engine.summary().player.carrying_cell);

    engine.tick(
        &TickInput {
            interact: true,
            ..idle()
        },
        DT,
    );
    assert!(!engine.summary().player.carrying_cell);
    assert!(recorder.count(|e| matches!(e, SimEvent::ItemDropped { .. })) == 1);

    // Still standing on it: the cooldown blocks an instant re-pickup.
    engine.tick(&idle(), DT);
    assert_eq!(engine.objective().phase(), ObjectivePhase::NotCarrying);
    for _ in 0..70 {
        engine.tick(&idle(), DT);
    }
    assert_eq!(engine.objective().phase(), ObjectivePhase::Carrying);
}

#[test]
fn test_panicking_sink_does_not_starve_others() {
    let map = ArenaMap::from_ascii(&ARENA, 2.0).unwrap();
    let mut engine = SimulationEngine::new(SimConfig::default(), map).unwrap();
    let recorder = Recorder::default();
    engine.add_sink(Box::new(Panicker));
    engine.add_sink(Box::new(recorder.clone()));
    engine.queue_command(SimCommand::StartRun);

    for _ in 0..(60 * 4) {
        engine.tick(&idle(), DT);
    }
    assert!(recorder.contains(&SimEvent::WaveStarted {
        wave: 1,
        enemies: 6
    }));
    assert!(recorder.count(|e| matches!(e, SimEvent::EnemySpawned { .. })) >= 1);
    assert_eq!(engine.phase(), GamePhase::Active);
}

#[test]
fn test_pause_holds_pending_chain() {
    let (mut engine, _recorder) = started_engine(9);
    let player = engine.player().position;
    let first = engine.spawn_barrel(player + Vec3::new(0.0, 0.0, 3.0));
    let second = engine.spawn_barrel(player + Vec3::new(2.0, 0.0, 3.0));
    engine.tick(
        &TickInput {
            shoot: true,
            ..idle()
        },
        DT,
    );
    while engine.world().contains(first) {
        engine.tick(&idle(), DT);
    }

    engine.queue_command(SimCommand::Pause);
    for _ in 0..120 {
        engine.tick(&idle(), DT);
    }
    assert!(engine.world().contains(second));

    engine.queue_command(SimCommand::Resume);
    for _ in 0..20 {
        engine.tick(&idle(), DT);
    }
    assert!(!engine.world().contains(second));
}

#[test]
fn test_same_seed_same_event_stream() {
    let run = |seed: u64| {
        let (mut engine, recorder) = started_engine(seed);
        for i in 0..600 {
            let input = TickInput {
                move_x: if (i / 120) % 2 == 0 { 1.0 } else { -1.0 },
                aim_y: 1.0,
                shoot: i % 3 == 0,
                dash: i % 97 == 0,
                ..idle()
            };
            engine.tick(&input, DT);
        }
        let events = recorder.0.borrow().clone();
        (serde_json::to_string(&events).unwrap(), serde_json::to_string(&engine.summary()).unwrap())
    };
    assert_eq!(run(99), run(99));
}
