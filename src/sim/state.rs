//! Run state and core simulation types
//!
//! A `Simulation` is one run. Restarting never resets it in place: the host
//! builds a fresh value and drops the old one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hero::Hero;
use super::obstacles::ObstacleSpawner;
use super::score::ScoreTracker;
use super::scroll::WorldScroller;
use crate::error::ConfigError;
use crate::scene::SceneRegistry;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Active,
    /// Terminal for this run
    GameOver,
}

impl RunState {
    #[inline]
    pub fn is_active(&self) -> bool {
        *self == RunState::Active
    }

    /// Transition to `GameOver`. Returns false if the run had already ended.
    pub fn end(&mut self) -> bool {
        match self {
            RunState::Active => {
                *self = RunState::GameOver;
                true
            }
            RunState::GameOver => false,
        }
    }
}

/// Identity of a node that can take part in contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Hands out entity ids, never reusing one within a run
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Semantic category of a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderTag {
    /// Gap between pipes; passing it scores
    Goal,
    Obstacle,
    Ground,
}

/// One side of a contact. The hero carries no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub tag: Option<ColliderTag>,
}

/// Contact-begin event delivered by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

impl Contact {
    pub fn involves(&self, id: EntityId) -> bool {
        self.a.id == id || self.b.id == id
    }

    pub fn has_tag(&self, tag: ColliderTag) -> bool {
        self.a.tag == Some(tag) || self.b.tag == Some(tag)
    }
}

/// Restart widget presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    Active,
    Selected,
    Hidden,
}

/// Top-level scene nodes (targets of the game-over shake)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneNode {
    ScrollLayer,
    ObstacleLayer,
    Hero,
    ScoreLabel,
    RestartButton,
}

impl SceneNode {
    pub const TOP_LEVEL: [SceneNode; 5] = [
        SceneNode::ScrollLayer,
        SceneNode::ObstacleLayer,
        SceneNode::Hero,
        SceneNode::ScoreLabel,
        SceneNode::RestartButton,
    ];
}

/// Commands and notifications for the host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score label must show this value
    ScoreChanged(u32),
    RestartButton(ButtonState),
    /// Run the one-shot shake effect on this node
    Shake(SceneNode),
    Flapped,
    ObstacleSpawned(EntityId),
    ObstacleRemoved(EntityId),
    TileRecycled(EntityId),
    GameOver { score: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub run_state: RunState,
    pub hero: Hero,
    pub scroller: WorldScroller,
    pub spawner: ObstacleSpawner,
    pub score: ScoreTracker,
    pub restart_button: ButtonState,
    pub tuning: Tuning,
    /// Scene size (visible area starts at x = 0)
    pub size: Vec2,
    /// Active steps simulated so far
    pub time_ticks: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) ids: IdAllocator,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    /// Start a new run from a resolved scene
    pub fn new(
        registry: &SceneRegistry,
        tuning: Tuning,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::start(registry, tuning, seed))
    }

    /// `new` for tuning that has already passed `Tuning::validate`
    pub(crate) fn start(registry: &SceneRegistry, tuning: Tuning, seed: u64) -> Self {
        let mut ids = IdAllocator::default();
        let mut events = Vec::new();

        let hero = Hero::new(ids.next(), &registry.hero);
        let scroller = WorldScroller::new(&registry.scroll_layer, &mut ids);
        let spawner = ObstacleSpawner::new(&registry.obstacle_layer);

        let mut score = ScoreTracker::default();
        score.reset(&mut events);
        events.push(GameEvent::RestartButton(ButtonState::Hidden));

        log::info!("Run started with seed: {}", seed);

        Self {
            run_state: RunState::Active,
            hero,
            scroller,
            spawner,
            score,
            restart_button: ButtonState::Hidden,
            tuning,
            size: registry.size,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids,
            events,
        }
    }

    pub fn set_restart_button(&mut self, state: ButtonState) {
        self.restart_button = state;
        self.events.push(GameEvent::RestartButton(state));
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events without consuming them
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Whether `id` names a live collidable entity of this run
    pub fn is_known_entity(&self, id: EntityId) -> bool {
        id == self.hero.id
            || self.scroller.tiles.iter().any(|t| t.id == id)
            || self
                .spawner
                .obstacles
                .iter()
                .any(|o| o.parts.iter().any(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneDescription;
    use crate::sim::test_support::new_sim;

    #[test]
    fn test_new_run_is_active_and_hides_restart() {
        let mut sim = new_sim(1);
        assert_eq!(sim.run_state, RunState::Active);
        assert_eq!(sim.score.points(), 0);
        assert_eq!(sim.restart_button, ButtonState::Hidden);
        assert_eq!(
            sim.drain_events(),
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::RestartButton(ButtonState::Hidden)
            ]
        );
        assert!(sim.pending_events().is_empty());
    }

    #[test]
    fn test_invalid_tuning_refused() {
        let registry = SceneDescription::default().resolve().unwrap();
        let tuning = Tuning {
            min_angular_vel: 3.0,
            max_angular_vel: -1.0,
            ..Tuning::default()
        };
        // clamp would panic on the first step with these bounds
        let err = Simulation::new(&registry, tuning, 1).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_angular_vel",
                ..
            }
        ));

        let tuning = Tuning {
            spawn_y_min: 500.0,
            spawn_y_max: 200.0,
            ..Tuning::default()
        };
        assert!(Simulation::new(&registry, tuning, 1).is_err());
    }

    #[test]
    fn test_run_state_ends_once() {
        let mut state = RunState::Active;
        assert!(state.end());
        assert_eq!(state, RunState::GameOver);
        assert!(!state.end());
        assert_eq!(state, RunState::GameOver);
    }

    #[test]
    fn test_ids_are_unique() {
        let sim = new_sim(1);
        let mut ids: Vec<EntityId> = sim.scroller.tiles.iter().map(|t| t.id).collect();
        ids.push(sim.hero.id);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), sim.scroller.tiles.len() + 1);
        assert!(sim.is_known_entity(sim.hero.id));
        assert!(!sim.is_known_entity(EntityId(9999)));
    }
}
