//! Per-frame simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - One fixed logical step per frame
//! - Seeded RNG only
//! - Output to the host goes through `GameEvent`s

pub mod body;
pub mod collision;
pub mod hero;
pub mod obstacles;
pub mod score;
pub mod scroll;
pub mod state;
pub mod tick;

pub use body::RigidBody;
pub use collision::{ContactOutcome, handle_contact};
pub use hero::{Hero, HeroAction};
pub use obstacles::{Obstacle, ObstaclePart, ObstacleSpawner};
pub use score::ScoreTracker;
pub use scroll::{Layer, ScrollTile, WorldScroller};
pub use state::{
    Body, ButtonState, ColliderTag, Contact, EntityId, GameEvent, IdAllocator, RunState,
    SceneNode, Simulation,
};
pub use tick::{TickInput, tick, touch_began, update};

#[cfg(test)]
pub(crate) mod test_support {
    use super::Simulation;
    use crate::scene::SceneDescription;
    use crate::tuning::Tuning;

    /// Fresh run on the stock scene
    pub fn new_sim(seed: u64) -> Simulation {
        let registry = SceneDescription::default().resolve().unwrap();
        Simulation::new(&registry, Tuning::default(), seed).unwrap()
    }
}
