//! Tier-specific steering profiles.
//!
//! Consolidates per-tier movement parameters for the steering delegates.

use holdout_core::enums::EnemyTier;

/// Movement behavior for an enemy tier.
pub struct SteeringProfile {
    /// Fraction of the attack range a ranged enemy tries to hold. Closer
    /// than this it backs off. None for melee tiers.
    pub hold_range_fraction: Option<f32>,
    /// Lateral weave amplitude (radians) while closing in.
    pub weave_amplitude: f32,
    /// Weave frequency (Hz).
    pub weave_frequency: f32,
    /// How far ahead walls are probed when picking a slide direction.
    pub probe_distance: f32,
}

/// Get the steering profile for a tier.
pub fn get_profile(tier: EnemyTier) -> SteeringProfile {
    match tier {
        EnemyTier::Grunt => SteeringProfile {
            hold_range_fraction: None,
            weave_amplitude: 0.0,
            weave_frequency: 0.0,
            probe_distance: 0.6,
        },
        EnemyTier::Runner => SteeringProfile {
            hold_range_fraction: None,
            weave_amplitude: 0.35,
            weave_frequency: 1.5,
            probe_distance: 0.8,
        },
        EnemyTier::Tank => SteeringProfile {
            hold_range_fraction: None,
            weave_amplitude: 0.0,
            weave_frequency: 0.0,
            probe_distance: 1.0,
        },
        EnemyTier::Spitter => SteeringProfile {
            hold_range_fraction: Some(0.7),
            weave_amplitude: 0.0,
            weave_frequency: 0.0,
            probe_distance: 0.6,
        },
    }
}
