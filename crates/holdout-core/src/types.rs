//! Fundamental geometric and simulation types.
//!
//! World space is `x` east, `y` up (height), `z` north. Gameplay is planar on
//! `x/z`; facing angles are measured from +z, clockwise toward +x.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Simulation time tracking. Advanced only by the engine tick, so pausing the
/// loop pauses every deferred effect keyed on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks run.
    pub tick: u64,
    /// Accumulated simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Project onto the ground plane.
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Lift a ground-plane vector back to 3D at the given height.
pub fn from_planar(v: Vec2, y: f32) -> Vec3 {
    Vec3::new(v.x, y, v.y)
}

/// Distance on the ground plane, ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// Unit planar direction for a facing angle.
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}

/// Facing angle of a planar direction. Zero vectors face 0.
pub fn angle_of(dir: Vec2) -> f32 {
    if dir.length_squared() <= f32::EPSILON {
        0.0
    } else {
        dir.x.atan2(dir.y)
    }
}
