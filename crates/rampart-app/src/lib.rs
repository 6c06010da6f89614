//! RAMPART runner.
//!
//! Drives the simulation engine at the nominal frame rate, either on a
//! dedicated game-loop thread fed over a channel or flat out in headless
//! mode, and hands every snapshot to a `Renderer`.

pub mod config;
pub mod game_loop;
pub mod render;
pub mod script;
pub mod state;

pub use rampart_core as core;
