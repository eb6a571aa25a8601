//! Wave director: paces enemy waves.
//!
//! `Idle → Delaying → Active → Completing → Delaying …`. A wave's enemies
//! drip out of the enemy spawn points one per spawn interval; the wave ends
//! when every enemy counted against it has been killed.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use holdout_core::config::WaveTuning;
use holdout_core::enums::{EnemyTier, WavePhase};
use holdout_core::events::SimEvent;

use crate::sinks::{SpawnRequest, SpawnSink};

#[derive(Debug, Clone)]
pub struct WaveDirector {
    tuning: WaveTuning,
    spawn_points: Vec<Vec3>,
    phase: WavePhase,
    wave_number: u32,
    /// Enemies still to kill before the wave counts as cleared.
    remaining: u32,
    total: u32,
    /// Enemies of the current wave not yet requested.
    pending_spawns: u32,
    spawn_timer: f64,
    /// Countdown for `Delaying` and `Completing`.
    phase_timer: f64,
}

impl WaveDirector {
    pub fn new(tuning: WaveTuning, spawn_points: Vec<Vec3>) -> Self {
        Self {
            tuning,
            spawn_points,
            phase: WavePhase::Idle,
            wave_number: 0,
            remaining: 0,
            total: 0,
            pending_spawns: 0,
            spawn_timer: 0.0,
            phase_timer: 0.0,
        }
    }

    /// Begin the countdown to the first wave.
    pub fn start(&mut self) {
        self.phase = WavePhase::Delaying;
        self.phase_timer = self.tuning.initial_delay_secs;
    }

    pub fn update(
        &mut self,
        dt: f64,
        rng: &mut ChaCha8Rng,
        sink: &mut dyn SpawnSink,
        events: &mut Vec<SimEvent>,
    ) {
        match self.phase {
            WavePhase::Idle => {}
            WavePhase::Delaying => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.begin_wave(events);
                    self.drip_spawns(0.0, rng, sink);
                }
            }
            WavePhase::Active => self.drip_spawns(dt, rng, sink),
            WavePhase::Completing => {
                self.phase_timer -= dt;
                if self.phase_timer <= 0.0 {
                    self.phase = WavePhase::Delaying;
                    self.phase_timer = self.tuning.between_wave_delay_secs;
                }
            }
        }
    }

    fn begin_wave(&mut self, events: &mut Vec<SimEvent>) {
        self.wave_number += 1;
        let quota = self.quota(self.wave_number);
        // Bonus enemies still alive from the previous wave stay on the books.
        self.remaining += quota;
        self.total = self.remaining;
        self.pending_spawns = quota;
        self.spawn_timer = 0.0;
        self.phase = WavePhase::Active;
        log::info!("wave {} started with {quota} enemies", self.wave_number);
        events.push(SimEvent::WaveStarted {
            wave: self.wave_number,
            enemies: quota,
        });
    }

    fn drip_spawns(&mut self, dt: f64, rng: &mut ChaCha8Rng, sink: &mut dyn SpawnSink) {
        if self.pending_spawns == 0 {
            return;
        }
        self.spawn_timer -= dt;
        while self.pending_spawns > 0 && self.spawn_timer <= 0.0 {
            let tier = choose_tier(self.wave_number, rng);
            self.request(tier, rng, sink);
            self.pending_spawns -= 1;
            self.spawn_timer += self.tuning.spawn_interval_secs;
        }
    }

    fn request(&self, tier: EnemyTier, rng: &mut ChaCha8Rng, sink: &mut dyn SpawnSink) {
        if self.spawn_points.is_empty() {
            log::warn!("spawn request for {tier:?} dropped: no enemy spawn points");
            return;
        }
        let position = self.spawn_points[rng.gen_range(0..self.spawn_points.len())];
        sink.request_spawn(SpawnRequest {
            tier,
            position,
            speed_multiplier: self.speed_multiplier(),
        });
    }

    /// Count a kill against the current wave. Clears the wave when the last
    /// counted enemy dies while it is active.
    pub fn on_enemy_killed(&mut self, events: &mut Vec<SimEvent>) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 && self.phase == WavePhase::Active {
            self.pending_spawns = 0;
            self.phase = WavePhase::Completing;
            self.phase_timer = self.tuning.completion_hold_secs;
            log::info!("wave {} complete", self.wave_number);
            events.push(SimEvent::WaveCompleted {
                wave: self.wave_number,
            });
        }
    }

    /// Add `n` enemies to the current count and request them right away,
    /// whatever the phase.
    pub fn add_bonus_enemies(&mut self, n: u32, rng: &mut ChaCha8Rng, sink: &mut dyn SpawnSink) {
        self.remaining += n;
        self.total += n;
        for _ in 0..n {
            let tier = choose_tier(self.wave_number.max(1), rng);
            self.request(tier, rng, sink);
        }
    }

    /// Count an enemy placed outside the spawn schedule against the current
    /// wave. No spawn request is issued.
    pub fn add_placed_enemy(&mut self) {
        self.remaining += 1;
        self.total += 1;
    }

    /// `base + per_wave * (wave - 1)`.
    pub fn quota(&self, wave: u32) -> u32 {
        self.tuning.base_quota + self.tuning.quota_per_wave * wave.saturating_sub(1)
    }

    /// Speed multiplier applied to enemies spawned in the current wave.
    pub fn speed_multiplier(&self) -> f32 {
        let ramp = 1.0 + self.tuning.speed_ramp * self.wave_number.saturating_sub(1) as f32;
        ramp.min(self.tuning.max_speed_multiplier)
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.remaining
    }

    pub fn enemies_total(&self) -> u32 {
        self.total
    }
}

/// Weighted pick of the tiers unlocked by `wave`.
fn choose_tier(wave: u32, rng: &mut ChaCha8Rng) -> EnemyTier {
    let weights = [
        (EnemyTier::Grunt, 6),
        (EnemyTier::Runner, if wave >= 2 { 3 } else { 0 }),
        (EnemyTier::Tank, if wave >= 3 { 1 } else { 0 }),
        (EnemyTier::Spitter, if wave >= 4 { 2 } else { 0 }),
    ];
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (tier, weight) in weights {
        if roll < weight {
            return tier;
        }
        roll -= weight;
    }
    EnemyTier::Grunt
}
