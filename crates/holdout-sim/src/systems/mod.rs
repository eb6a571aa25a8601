//! Systems that operate on the simulation world each tick.
//!
//! Most systems are free functions over `&mut World`. The stateful flows
//! (waves, objective, last stand) are small structs the engine owns and
//! drives from the tick.

pub mod barrels;
pub mod cleanup;
pub mod collision;
pub mod combat_math;
pub mod damage;
pub mod enemy_combat;
pub mod last_stand;
pub mod objective;
pub mod pickups;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod wave_director;
pub mod weapons;
