//! Enemy steering for HOLDOUT.
//!
//! Implements the movement-direction delegate the simulation queries for
//! every live enemy, and tier-driven steering profiles.

pub mod profiles;
pub mod steering;

pub use holdout_core as core;
pub use steering::{ChaseSteering, SteeringContext, SteeringDelegate};

#[cfg(test)]
mod tests;
