//! Last stand: one comeback chance per life.
//!
//! When lethal damage lands, the player is held at 1 health, frozen in place
//! and immune to damage for a fixed window. Reaching the kill requirement in
//! that window restores health; running out of time means death.

use glam::Vec3;

use holdout_core::components::Player;
use holdout_core::config::LastStandTuning;
use holdout_core::enums::LastStandPhase;

/// How an active last stand ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LastStandOutcome {
    Succeeded { restored_health: f32 },
    Failed,
}

#[derive(Debug, Clone)]
pub struct LastStand {
    tuning: LastStandTuning,
    phase: LastStandPhase,
    used: bool,
    kills: u32,
    started_at: f64,
}

impl LastStand {
    pub fn new(tuning: LastStandTuning) -> Self {
        Self {
            tuning,
            phase: LastStandPhase::Available,
            used: false,
            kills: 0,
            started_at: 0.0,
        }
    }

    /// Enter last stand. Returns false if this life already used it.
    pub fn try_trigger(&mut self, now: f64) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        self.phase = LastStandPhase::Active;
        self.kills = 0;
        self.started_at = now;
        log::debug!("last stand started at {now:.2}s");
        true
    }

    /// Check for success or timeout. Returns the outcome on the tick the
    /// last stand ends, `None` otherwise.
    pub fn update(&mut self, now: f64) -> Option<LastStandOutcome> {
        if self.phase != LastStandPhase::Active {
            return None;
        }
        if self.kills >= self.tuning.kills_required {
            self.phase = LastStandPhase::Succeeded;
            log::debug!("last stand succeeded with {} kills", self.kills);
            return Some(LastStandOutcome::Succeeded {
                restored_health: self.tuning.restore_health,
            });
        }
        if now - self.started_at >= self.tuning.duration_secs {
            self.phase = LastStandPhase::Failed;
            log::debug!("last stand failed with {} kills", self.kills);
            return Some(LastStandOutcome::Failed);
        }
        None
    }

    /// Count a kill toward the requirement. Ignored unless active.
    pub fn register_kill(&mut self) {
        if self.phase == LastStandPhase::Active {
            self.kills += 1;
        }
    }

    /// Pin the player in place while active.
    pub fn apply_effects(&self, player: &mut Player) {
        if self.phase != LastStandPhase::Active {
            return;
        }
        player.velocity = Vec3::ZERO;
        player.dash.active = false;
    }

    /// Fresh state for a new life.
    pub fn reset(&mut self) {
        self.phase = LastStandPhase::Available;
        self.used = false;
        self.kills = 0;
        self.started_at = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.phase == LastStandPhase::Active
    }

    pub fn phase(&self) -> LastStandPhase {
        self.phase
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn kills_required(&self) -> u32 {
        self.tuning.kills_required
    }

    pub fn duration_secs(&self) -> f64 {
        self.tuning.duration_secs
    }

    /// Seconds left while active, 0 otherwise.
    pub fn time_remaining(&self, now: f64) -> f64 {
        if self.phase == LastStandPhase::Active {
            (self.tuning.duration_secs - (now - self.started_at)).max(0.0)
        } else {
            0.0
        }
    }
}
