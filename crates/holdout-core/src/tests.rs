use glam::{Vec2, Vec3};

use crate::commands::{SimCommand, TickInput};
use crate::components::{PickupKind, Player, PlayerId};
use crate::config::{AttackProfile, ConfigError, SimConfig};
use crate::enums::*;
use crate::events::SimEvent;
use crate::state::UiSummary;
use crate::types::*;

#[test]
fn test_default_config_is_valid() {
    SimConfig::default()
        .validate()
        .expect("defaults must validate");
}

#[test]
fn test_config_from_partial_json_uses_defaults() {
    let config = SimConfig::from_json(r#"{ "seed": 7, "waves": { "base_quota": 2 } }"#).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.waves.base_quota, 2);
    // Untouched fields keep their defaults.
    let defaults = SimConfig::default();
    assert_eq!(
        config.waves.spawn_interval_secs,
        defaults.waves.spawn_interval_secs
    );
    assert_eq!(config.weapons.shotgun.pellet_count, 6);
}

#[test]
fn test_config_rejects_zero_pellets() {
    let mut config = SimConfig::default();
    config.weapons.shotgun.pellet_count = 0;
    match config.validate() {
        Err(ConfigError::NoPellets { weapon }) => assert_eq!(weapon, WeaponType::Shotgun),
        other => panic!("expected NoPellets, got {other:?}"),
    }
}

#[test]
fn test_config_rejects_bad_decay_and_negative_radius() {
    let mut config = SimConfig::default();
    config.knockback.decay = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfUnitRange { .. })
    ));

    let mut config = SimConfig::default();
    config.barrels.explosion_radius = -1.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonPositive { .. })
    ));
}

#[test]
fn test_config_rejects_malformed_json() {
    assert!(matches!(
        SimConfig::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_ranged_archetype_in_json() {
    let json = r#"{
        "enemies": {
            "grunt": {
                "speed": 2.0, "max_health": 10.0, "hitbox_radius": 0.5, "score_value": 10,
                "attack": { "type": "Ranged", "damage": 3.0, "range": 6.0,
                            "fire_interval_secs": 1.0, "bolt_speed": 5.0,
                            "bolt_lifetime_secs": 1.0 }
            }
        }
    }"#;
    let config = SimConfig::from_json(json).unwrap();
    assert!(matches!(
        config.enemies.get(EnemyTier::Grunt).attack,
        AttackProfile::Ranged { range, .. } if (range - 6.0).abs() < 1e-6
    ));
    // Other tiers keep their defaults.
    assert!(matches!(
        config.enemies.get(EnemyTier::Tank).attack,
        AttackProfile::Melee { .. }
    ));
}

#[test]
fn test_weapon_slots_round_trip() {
    for weapon in WeaponType::ALL {
        assert_eq!(WeaponType::from_slot(weapon.slot()), Some(weapon));
    }
    assert_eq!(WeaponType::from_slot(0), None);
    assert_eq!(WeaponType::from_slot(9), None);
    assert!(WeaponType::RocketLauncher.is_homing());
    assert!(!WeaponType::Shotgun.is_homing());
}

#[test]
fn test_player_power_up_expiry() {
    let mut player = Player::new(PlayerId(1), Vec3::ZERO, 100.0, 0.5);
    assert!(!player.has_power_up(PowerUpKind::Shield, 0.0));
    player.power_ups.insert(PowerUpKind::Shield, 5.0);
    assert!(player.has_power_up(PowerUpKind::Shield, 4.9));
    assert!(!player.has_power_up(PowerUpKind::Shield, 5.0));
}

#[test]
fn test_new_player_starts_with_pistol_only() {
    let player = Player::new(PlayerId(1), Vec3::ZERO, 100.0, 0.5);
    assert_eq!(player.current_weapon, WeaponType::Pistol);
    assert_eq!(player.unlocked.len(), 1);
    assert_eq!(player.health, 100.0);
    assert!(player.carried_cell.is_none());
}

#[test]
fn test_planar_helpers() {
    let a = Vec3::new(0.0, 5.0, 0.0);
    let b = Vec3::new(3.0, -2.0, 4.0);
    assert!((planar_distance(a, b) - 5.0).abs() < 1e-6);

    let north = direction_from_angle(0.0);
    assert!((north - Vec2::new(0.0, 1.0)).length() < 1e-6);
    let east = direction_from_angle(std::f32::consts::FRAC_PI_2);
    assert!((east - Vec2::new(1.0, 0.0)).length() < 1e-6);
    assert!((angle_of(east) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    assert_eq!(angle_of(Vec2::ZERO), 0.0);
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..60 {
        time.advance(1.0 / 60.0);
    }
    assert_eq!(time.tick, 60);
    assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_event_serde_tagging() {
    let event = SimEvent::WaveStarted {
        wave: 3,
        enemies: 12,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"WaveStarted""#));
    let back: SimEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_command_and_pickup_serde() {
    let json = serde_json::to_string(&SimCommand::Pause).unwrap();
    assert_eq!(json, r#"{"type":"Pause"}"#);

    let kind = PickupKind::PowerUp {
        kind: PowerUpKind::RapidFire,
    };
    let json = serde_json::to_string(&kind).unwrap();
    let back: PickupKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kind);
}

#[test]
fn test_input_and_summary_defaults() {
    let input = TickInput::default();
    assert!(!input.shoot && !input.dash && !input.interact && !input.area_charge);
    assert_eq!(input.weapon_slot, None);

    let summary = UiSummary::default();
    assert_eq!(summary.phase, GamePhase::MainMenu);
    assert_eq!(summary.wave.wave_number, 0);
    let json = serde_json::to_string(&summary).unwrap();
    assert!(json.contains("\"phase\":\"MainMenu\""));
}
