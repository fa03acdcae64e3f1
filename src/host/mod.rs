//! Headless host
//!
//! Stand-ins for the engine the game core runs inside: a minimal physics
//! world and a frame driver. A real build would swap these for the
//! platform's own scene graph and physics.

pub mod physics;
pub mod runner;

pub use physics::{Aabb, PhysicsWorld};
pub use runner::{Game, Hud, RunSummary, autopilot};
