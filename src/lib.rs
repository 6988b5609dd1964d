//! Alien Invasion: a fixed-tick arcade shooter core.
//!
//! The library owns every piece of game state and logic.  Drawing and input
//! are reached only through the traits in [`interfaces`], so the terminal
//! front end in `main.rs` is one of many possible hosts.

pub mod collision;
pub mod entities;
pub mod fleet;
pub mod interfaces;
pub mod playfield;
pub mod round;
pub mod settings;
pub mod simulation;
