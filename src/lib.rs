//! Island Hopper: platformer physics and procedural island terrain.
//!
//! `sim::level` builds the world once per session; `sim::step` moves an
//! entity one frame against it. `sim::session::Session` ties the two
//! together with the player and camera.

pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;
