//! Frame driver
//!
//! Plays the role of the rendering host: delivers input, runs the gated update,
//! evaluates scripted actions, steps physics, dispatches contacts, and mirrors
//! the core's events into HUD state. Restart swaps in a brand-new run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::physics::PhysicsWorld;
use crate::error::ConfigError;
use crate::scene::SceneRegistry;
use crate::sim::{ButtonState, Contact, GameEvent, Simulation, TickInput, handle_contact, tick};
use crate::tuning::Tuning;

/// What the player sees outside the world layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score_text: String,
    pub restart_button: ButtonState,
    /// Shake effects started
    pub shakes: u32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score_text: String::new(),
            restart_button: ButtonState::Hidden,
            shakes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    /// Final score of every run, the current one last
    pub scores: Vec<u32>,
    pub best_score: u32,
}

/// Game instance holding the current run and host-side state
pub struct Game {
    registry: SceneRegistry,
    tuning: Tuning,
    pub sim: Simulation,
    physics: PhysicsWorld,
    pub hud: Hud,
    pub input: TickInput,
    last_time: Option<f64>,
    frames: u64,
    /// Scores of finished runs
    scores: Vec<u32>,
    /// Draws the seed of each new run
    seeds: Pcg32,
}

impl Game {
    pub fn new(registry: SceneRegistry, tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut seeds = Pcg32::seed_from_u64(seed);
        let sim = Simulation::start(&registry, tuning.clone(), seeds.random());
        let physics = PhysicsWorld::new(tuning.gravity);

        let mut game = Self {
            registry,
            tuning,
            sim,
            physics,
            hud: Hud::default(),
            input: TickInput::default(),
            last_time: None,
            frames: 0,
            scores: Vec::new(),
            seeds,
        };
        game.apply_events();
        Ok(game)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Queue a primary-input event for the next frame
    pub fn touch(&mut self) {
        self.input.touch = true;
    }

    /// Run one rendered frame. `current_time` is the host clock in seconds.
    pub fn frame(&mut self, current_time: f64) {
        if let Some(last) = self.last_time {
            if current_time < last {
                log::warn!("Host clock went backwards: {} -> {}", last, current_time);
            }
        }
        self.last_time = Some(current_time);
        self.frames += 1;

        let input = std::mem::take(&mut self.input);
        tick(&mut self.sim, &input);

        self.sim.hero.run_actions();

        let contacts = self.physics.step(&mut self.sim, self.tuning.fixed_dt);
        for contact in &contacts {
            self.dispatch_contact(contact);
        }

        self.apply_events();
    }

    /// Hand a physics contact to the core.
    ///
    /// # Panics
    ///
    /// Panics if either body is not part of the current run. A physics
    /// engine reporting such a contact is out of sync with the scene.
    pub fn dispatch_contact(&mut self, contact: &Contact) {
        assert!(
            self.sim.is_known_entity(contact.a.id) && self.sim.is_known_entity(contact.b.id),
            "contact with unknown body: {contact:?}"
        );
        handle_contact(&mut self.sim, contact);
    }

    /// Restart button callback. Does nothing unless the button is showing.
    pub fn press_restart(&mut self) -> bool {
        if self.hud.restart_button != ButtonState::Active {
            return false;
        }
        self.hud.restart_button = ButtonState::Selected;
        self.restart();
        true
    }

    fn restart(&mut self) {
        let finished = self.sim.score.points();
        self.scores.push(finished);

        let seed = self.seeds.random();
        self.sim = Simulation::start(&self.registry, self.tuning.clone(), seed);
        self.physics = PhysicsWorld::new(self.tuning.gravity);
        self.input = TickInput::default();

        log::info!(
            "Restarted (run {}, previous score {})",
            self.scores.len() + 1,
            finished
        );
        self.apply_events();
    }

    fn apply_events(&mut self) {
        for event in self.sim.drain_events() {
            match event {
                GameEvent::ScoreChanged(points) => self.hud.score_text = points.to_string(),
                GameEvent::RestartButton(state) => self.hud.restart_button = state,
                GameEvent::Shake(_) => self.hud.shakes += 1,
                _ => {}
            }
        }
    }

    pub fn summary(&self) -> RunSummary {
        let mut scores = self.scores.clone();
        scores.push(self.sim.score.points());
        RunSummary {
            frames: self.frames,
            best_score: scores.iter().copied().max().unwrap_or(0),
            scores,
        }
    }
}

/// How far below the gap centre the hero may sink before flapping
const AUTOPILOT_SLACK: f32 = 35.0;
/// Below this distance the autopilot flaps even while rising
const AUTOPILOT_CLIMB: f32 = 100.0;

/// Demo input: steer toward the gap of the nearest obstacle not yet passed
pub fn autopilot(sim: &Simulation) -> bool {
    let hero = &sim.hero;
    let hero_left = hero.position.x - hero.size.x / 2.0;

    let target = sim
        .spawner
        .obstacles
        .iter()
        .filter_map(|obstacle| {
            let pos = sim.spawner.scene_position(obstacle);
            let right = obstacle
                .parts
                .iter()
                .map(|p| pos.x + p.offset.x + p.size.x / 2.0)
                .fold(f32::MIN, f32::max);
            (right >= hero_left).then_some(pos)
        })
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map_or(sim.size.y / 2.0, |pos| pos.y);

    let below = target - hero.position.y;
    below > AUTOPILOT_SLACK && (hero.body.velocity.y <= 0.0 || below > AUTOPILOT_CLIMB)
}
