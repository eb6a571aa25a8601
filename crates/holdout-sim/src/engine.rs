//! Simulation engine: the per-tick orchestrator.
//!
//! `SimulationEngine` owns the hecs world, the player, the spatial index, the
//! task queue and the stateful flows. It processes queued session commands,
//! runs every system in a fixed order, hands the tick's events to the
//! registered sinks and returns a `UiSummary`. Completely headless, so runs
//! are deterministic and testable.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use holdout_ai::{ChaseSteering, SteeringDelegate};
use holdout_core::commands::{SimCommand, TickInput};
use holdout_core::components::{PickupKind, Player, PlayerId, Position};
use holdout_core::config::{ConfigError, SimConfig};
use holdout_core::enums::{EnemyTier, GamePhase, WavePhase};
use holdout_core::events::SimEvent;
use holdout_core::state::{ScoreView, UiSummary};
use holdout_core::types::SimTime;
use holdout_map::ArenaMap;

use crate::scheduler::{ScheduledTask, ScheduledTaskQueue};
use crate::sinks::{self, EffectSink, SpawnRequest};
use crate::spatial::SpatialIndex;
use crate::systems;
use crate::systems::combat_math::{calculate_score, update_combo_state, ComboEvent};
use crate::systems::damage::{Explosion, KillRecord};
use crate::systems::last_stand::{LastStand, LastStandOutcome};
use crate::systems::objective::ObjectiveFlow;
use crate::systems::wave_director::WaveDirector;
use crate::world_setup;

/// Why an engine could not be built.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("map has {available} item spawn points, objective needs {required}")]
    NotEnoughItemSpawns { required: u32, available: usize },
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    map: ArenaMap,
    world: World,
    index: SpatialIndex,
    tasks: ScheduledTaskQueue<ScheduledTask>,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    player: Player,
    next_player_id: u32,
    waves: WaveDirector,
    objective: ObjectiveFlow,
    last_stand: LastStand,
    score: ScoreView,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
    spawn_requests: Vec<SpawnRequest>,
    explosions: Vec<Explosion>,
    sinks: Vec<Box<dyn EffectSink>>,
    steering: Box<dyn SteeringDelegate>,
}

impl SimulationEngine {
    /// Validate the configuration against the map and build an engine
    /// sitting in the main menu.
    pub fn new(config: SimConfig, map: ArenaMap) -> Result<Self, EngineError> {
        config.validate()?;
        let required = config.objective.cells_required;
        if map.item_spawns.len() < required as usize {
            return Err(EngineError::NotEnoughItemSpawns {
                required,
                available: map.item_spawns.len(),
            });
        }

        let player_id = PlayerId(0);
        Ok(Self {
            index: SpatialIndex::new(config.spatial_cell_size),
            tasks: ScheduledTaskQueue::new(),
            time: SimTime::default(),
            phase: GamePhase::MainMenu,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: world_setup::create_player(&map, &config, player_id),
            next_player_id: 1,
            waves: WaveDirector::new(config.waves.clone(), map.enemy_spawns.clone()),
            objective: ObjectiveFlow::new(config.objective.clone(), map.delivery_point),
            last_stand: LastStand::new(config.last_stand.clone()),
            score: ScoreView::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            spawn_requests: Vec::new(),
            explosions: Vec::new(),
            sinks: Vec::new(),
            steering: Box::new(ChaseSteering),
            world: World::new(),
            config,
            map,
        })
    }

    /// Replace the default chase steering.
    pub fn with_steering(mut self, steering: Box<dyn SteeringDelegate>) -> Self {
        self.steering = steering;
        self
    }

    /// Register a collaborator that receives every event after each tick.
    pub fn add_sink(&mut self, sink: Box<dyn EffectSink>) {
        self.sinks.push(sink);
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick of `dt` seconds. Time only moves
    /// while the run is active.
    pub fn tick(&mut self, input: &TickInput, dt: f64) -> UiSummary {
        self.process_commands();

        if self.phase == GamePhase::Active && dt > 0.0 {
            self.run_systems(input, dt);
        }

        sinks::dispatch(&mut self.sinks, &self.events);
        self.events.clear();
        self.summary()
    }

    /// Current UI summary without advancing.
    pub fn summary(&self) -> UiSummary {
        systems::snapshot::build_summary(
            &self.world,
            &self.player,
            &self.time,
            self.phase,
            &self.waves,
            &self.objective,
            &self.last_stand,
            &self.score,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &ArenaMap {
        &self.map
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player access for hosts and scenario setup.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn waves(&self) -> &WaveDirector {
        &self.waves
    }

    pub fn objective(&self) -> &ObjectiveFlow {
        &self.objective
    }

    pub fn last_stand(&self) -> &LastStand {
        &self.last_stand
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn tasks(&self) -> &ScheduledTaskQueue<ScheduledTask> {
        &self.tasks
    }

    /// Place an enemy outside the wave schedule. It joins the current wave's
    /// count, so its kill is charged to that wave.
    pub fn spawn_enemy(&mut self, tier: EnemyTier, position: Vec3) -> Entity {
        self.waves.add_placed_enemy();
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &self.config,
            tier,
            position,
            1.0,
            Some(self.player.id),
        );
        self.index_enemy(entity, tier, position);
        entity
    }

    pub fn spawn_barrel(&mut self, position: Vec3) -> Entity {
        world_setup::spawn_barrel(&mut self.world, position, self.config.barrels.hitbox_radius)
    }

    /// Drop a pickup with the usual lifetime.
    pub fn spawn_pickup(&mut self, kind: PickupKind, position: Vec3) -> Entity {
        let expires_at = self.time.elapsed_secs + self.config.pickups.lifetime_secs;
        world_setup::spawn_pickup(&mut self.world, kind, position, expires_at)
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StartRun => {
                if self.phase == GamePhase::MainMenu {
                    self.reset_run();
                }
            }
            SimCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            SimCommand::Restart => {
                if self.phase != GamePhase::MainMenu {
                    self.reset_run();
                }
            }
        }
    }

    /// Throw away everything and set up a fresh arena with a new life.
    fn reset_run(&mut self) {
        self.world.clear();
        self.index.clear();
        self.tasks.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.spawn_requests.clear();
        self.explosions.clear();

        world_setup::setup_arena(&mut self.world, &self.map, &self.config);
        self.player = world_setup::create_player(&self.map, &self.config, PlayerId(self.next_player_id));
        self.next_player_id += 1;
        self.waves = WaveDirector::new(self.config.waves.clone(), self.map.enemy_spawns.clone());
        self.waves.start();
        self.objective = ObjectiveFlow::new(self.config.objective.clone(), self.map.delivery_point);
        self.last_stand.reset();
        self.score = ScoreView::default();
        self.phase = GamePhase::Active;
        log::info!("run started (seed {})", self.config.seed);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &TickInput, dt: f64) {
        let dt32 = dt as f32;

        // 1. Time
        self.time.advance(dt);
        let now = self.time.elapsed_secs;

        // 2. Player control
        systems::player::run(
            &mut self.player,
            input,
            &self.map,
            &self.config,
            &self.last_stand,
            now,
            dt32,
            &mut self.events,
        );

        // 3. Weapons and area charge
        if input.shoot {
            self.fire_weapon(now);
        }
        if input.area_charge {
            if let Some(blast) =
                systems::weapons::use_area_charge(&mut self.player, now, &self.config.area_charge)
            {
                self.events.push(SimEvent::AreaChargeFired {
                    position: blast.position,
                    radius: blast.radius,
                });
                self.events.push(SimEvent::ScreenShake { magnitude: 1.0 });
                self.explosions.push(blast);
            }
        }

        // 4. Waves
        self.waves
            .update(dt, &mut self.rng, &mut self.spawn_requests, &mut self.events);
        self.spawn_requested_enemies();

        // 5. Projectile physics
        let rocket_blasts = systems::projectile::run(
            &mut self.world,
            &mut self.index,
            &self.map,
            &self.config.projectiles,
            now,
            dt32,
        );
        self.explosions.extend(rocket_blasts);

        // 6. Projectile collisions
        let max_enemy_radius = self.config.enemies.max_hitbox_radius();
        let hits = systems::collision::run(
            &mut self.world,
            &mut self.index,
            &mut self.tasks,
            &mut self.player,
            &self.config.projectiles,
            &self.config.barrels,
            &self.config.player,
            max_enemy_radius,
            self.last_stand.is_active(),
            now,
            &mut self.events,
        );
        for kill in hits.kills {
            self.handle_kill(kill, now);
        }
        self.explosions.extend(hits.explosions);
        if hits.bolt_hits > 0 && self.objective.carried().is_some() {
            self.objective
                .force_drop_cell(&mut self.world, self.player.position, &mut self.events);
        }

        // 7. Barrel chains
        let chained =
            systems::barrels::update(&mut self.world, &mut self.tasks, now, &self.config.barrels);
        self.explosions.extend(chained);

        // 8. Explosions
        self.apply_explosions(now, max_enemy_radius);

        // 9. Enemy motion and combat
        systems::enemy_combat::run(
            &mut self.world,
            &mut self.index,
            &mut self.player,
            &self.map,
            self.steering.as_mut(),
            &self.config,
            self.last_stand.is_active(),
            now,
            dt32,
            &mut self.events,
        );

        // 10. Player health and last stand
        self.resolve_player_health(now);

        // 11. Pickups
        systems::pickups::resolve(
            &mut self.world,
            &mut self.player,
            &self.config,
            now,
            &mut self.events,
        );
        systems::pickups::expire(&mut self.world, now);

        // 12. Objective
        if !self.player.dead {
            let result = self.objective.update(
                &mut self.world,
                self.player.id,
                self.player.position,
                input.interact,
                dt32,
                &mut self.events,
            );
            if result.delivered {
                self.waves.add_bonus_enemies(
                    self.config.objective.bonus_enemies_per_delivery,
                    &mut self.rng,
                    &mut self.spawn_requests,
                );
                self.spawn_requested_enemies();
            }
            if result.completed {
                self.phase = GamePhase::Victory;
                log::info!("run won at {now:.1}s, score {}", self.score.score);
                self.events.push(SimEvent::GameWon);
            }
        }
        self.player.carried_cell = self.objective.carried();

        // 13. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.index, &mut self.tasks, now);
    }

    fn fire_weapon(&mut self, now: f64) {
        let Some(solution) = systems::weapons::fire(
            &self.player,
            now,
            &self.config.weapons,
            &self.config.projectiles,
            &mut self.rng,
        ) else {
            return;
        };
        systems::weapons::apply(&mut self.player, &solution, now);
        self.score.shots_fired += 1;

        self.events.push(SimEvent::MuzzleFlash {
            position: solution.muzzle,
            facing: self.player.facing,
            weapon: solution.weapon,
        });
        self.events.push(SimEvent::WeaponFired {
            weapon: solution.weapon,
            pellets: solution.projectiles.len() as u32,
        });
        if solution.screen_shake > 0.0 {
            self.events.push(SimEvent::ScreenShake {
                magnitude: solution.screen_shake,
            });
        }
        for spawn in solution.projectiles {
            world_setup::spawn_projectile(
                &mut self.world,
                spawn.projectile,
                spawn.position,
                spawn.velocity,
            );
        }
    }

    fn apply_explosions(&mut self, now: f64, max_enemy_radius: f32) {
        let explosions = std::mem::take(&mut self.explosions);
        for explosion in &explosions {
            let kills = systems::damage::apply_explosion(
                &mut self.world,
                &mut self.index,
                explosion,
                max_enemy_radius,
                &mut self.events,
            );
            for kill in kills {
                self.handle_kill(kill, now);
            }

            let raw = systems::damage::barrel_player_damage(
                explosion,
                self.player.position,
                self.config.barrels.player_damage_scale,
            );
            let taken = systems::damage::damage_player(
                &mut self.player,
                raw,
                now,
                &self.config.player,
                self.last_stand.is_active(),
            );
            if taken >= self.config.player.min_hit_effect_damage && taken > 0.0 {
                self.events.push(SimEvent::PlayerHit { damage: taken });
            }
        }
    }

    fn spawn_requested_enemies(&mut self) {
        let requests = std::mem::take(&mut self.spawn_requests);
        for request in requests {
            let entity = world_setup::spawn_enemy(
                &mut self.world,
                &self.config,
                request.tier,
                request.position,
                request.speed_multiplier,
                Some(self.player.id),
            );
            self.index_enemy(entity, request.tier, request.position);
        }
    }

    fn index_enemy(&mut self, entity: Entity, tier: EnemyTier, position: Vec3) {
        let radius = self.config.enemies.get(tier).hitbox_radius;
        self.index.insert(entity, position.x, position.z, radius);
        self.events.push(SimEvent::EnemySpawned {
            id: entity.to_bits().get(),
            tier,
            position,
        });
    }

    /// Score a kill and feed it to every flow that counts kills. The body is
    /// removed after the fade delay.
    fn handle_kill(&mut self, kill: KillRecord, now: f64) {
        self.index.remove(kill.entity);
        self.tasks.schedule(
            ScheduledTask::RemoveEnemy(kill.entity),
            now + self.config.enemy_fade_secs,
        );

        update_combo_state(&mut self.player.combo, ComboEvent::Kill, &self.config.combo);
        let base = self.config.enemies.get(kill.tier).score_value;
        let points = calculate_score(base, self.player.combo.count);
        self.score.score += points as u64;
        self.score.kills += 1;

        self.events.push(SimEvent::EnemyKilled {
            id: kill.entity.to_bits().get(),
            tier: kill.tier,
            position: kill.position,
        });
        self.events.push(SimEvent::ScorePopup {
            position: kill.position,
            points,
            combo: self.player.combo.count,
        });

        self.last_stand.register_kill();

        let was_active = self.waves.phase() == WavePhase::Active;
        self.waves.on_enemy_killed(&mut self.events);
        if was_active && self.waves.phase() == WavePhase::Completing {
            self.on_wave_cleared();
        }

        systems::pickups::roll_kill_drop(
            &mut self.world,
            &mut self.rng,
            kill.position,
            now,
            &self.config,
        );
    }

    fn on_wave_cleared(&mut self) {
        self.score.waves_cleared += 1;
        let reward = systems::pickups::spawn_weapon_pickup(
            &mut self.world,
            &self.player,
            &mut self.rng,
            &self.map.item_spawns,
        );
        if reward.is_some() {
            self.events.push(SimEvent::Notification {
                text: "New weapon available".to_string(),
            });
        }
    }

    /// Lethal damage either starts the last stand or ends the run.
    fn resolve_player_health(&mut self, now: f64) {
        if self.player.dead {
            return;
        }

        if self.player.health <= 0.0 {
            if self.last_stand.try_trigger(now) {
                self.player.health = 1.0;
                self.player.last_stand_used = true;
                self.last_stand.apply_effects(&mut self.player);
                self.events.push(SimEvent::LastStandStarted {
                    kills_required: self.last_stand.kills_required(),
                    duration_secs: self.last_stand.duration_secs(),
                });
            } else {
                self.kill_player();
                return;
            }
        }

        match self.last_stand.update(now) {
            Some(LastStandOutcome::Succeeded { restored_health }) => {
                let before = self.player.health;
                let applied = restored_health.min(self.player.max_health);
                self.player.health = applied;
                self.events.push(SimEvent::LastStandSucceeded {
                    restored_health: applied,
                });
                self.events.push(SimEvent::HealNumber {
                    position: self.player.position,
                    amount: applied - before,
                });
            }
            Some(LastStandOutcome::Failed) => {
                self.events.push(SimEvent::LastStandFailed);
                self.kill_player();
            }
            None => {}
        }
    }

    fn kill_player(&mut self) {
        self.player.dead = true;
        self.player.health = 0.0;
        self.player.velocity = Vec3::ZERO;
        if self.objective.carried().is_some() {
            self.objective
                .force_drop_cell(&mut self.world, self.player.position, &mut self.events);
        }
        self.player.carried_cell = None;
        self.phase = GamePhase::GameOver;
        log::info!(
            "player died at {:.1}s on wave {}, score {}",
            self.time.elapsed_secs,
            self.waves.wave_number(),
            self.score.score
        );
        self.events.push(SimEvent::PlayerDied);
    }
}

/// Position of an entity, if it has one.
pub fn entity_position(world: &World, entity: Entity) -> Option<Vec3> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}
