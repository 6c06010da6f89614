//! Core types and definitions for the RAMPART tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, the grid and enemy route, per-type stat tables, components,
//! commands, errors, state snapshots, events, and constants.
//! It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod grid;
pub mod state;
pub mod tables;
pub mod types;

#[cfg(test)]
mod tests;
