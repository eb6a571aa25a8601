//! Core types and definitions for the HOLDOUT arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands and per-tick input, configuration, UI summaries,
//! outbound events, and tuning constants.
//! It has no dependency on any rendering or audio framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
