//! Frenemy simulation: friend-of-a-friend and enemy-of-a-friend rules over a multimode graph.

mod config;
mod frenemy;

pub use config::{ConfigError, SimConfig};
pub use frenemy::{SimError, Simulation, TickCounts};
