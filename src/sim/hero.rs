//! Player-controlled hero
//!
//! Flap impulses on input, and per-step safety clamps that keep the physics
//! engine from flinging the hero: a rise-speed cap, a nose-dive assist while
//! falling, and hard rotation/angular-velocity bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::state::EntityId;
use crate::scene::HeroDesc;
use crate::tuning::Tuning;

/// Scripted one-shot effect, evaluated by the host outside the physics step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeroAction {
    /// Snap rotation to the given angle (radians)
    SetRotation(f32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: EntityId,
    /// Scene-space position (integrated by the physics engine)
    pub position: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub body: RigidBody,
    /// Seconds since the last flap
    pub since_touch: f32,
    actions: Vec<HeroAction>,
}

impl Hero {
    pub fn new(id: EntityId, desc: &HeroDesc) -> Self {
        Self {
            id,
            position: desc.position,
            size: desc.size,
            rotation: 0.0,
            body: RigidBody::new(desc.mass, desc.moment_of_inertia),
            since_touch: 0.0,
            actions: Vec::new(),
        }
    }

    /// Kill current motion and kick the hero up, nose first
    pub fn apply_flap_impulse(&mut self, tuning: &Tuning) {
        self.body.velocity = Vec2::ZERO;
        self.body.apply_impulse(Vec2::new(0.0, tuning.flap_impulse));
        self.body.apply_angular_impulse(tuning.flap_angular_impulse);
        self.since_touch = 0.0;
    }

    /// Per-step clamp pass. Order matters: the speed cap lands before any
    /// rotation effect, and the hard bounds land after the dive assist.
    pub fn fixed_step(&mut self, dt: f32, tuning: &Tuning) {
        if self.body.velocity.y > tuning.max_rise_speed {
            self.body.velocity.y = tuning.max_rise_speed;
        }

        if self.since_touch > tuning.dive_assist_delay {
            self.body
                .apply_angular_impulse(tuning.dive_angular_impulse_rate * dt);
        }

        self.rotation = self
            .rotation
            .clamp(tuning.min_rotation(), tuning.max_rotation());
        self.body.angular_velocity = self
            .body
            .angular_velocity
            .clamp(tuning.min_angular_vel, tuning.max_angular_vel);

        self.since_touch += dt;
    }

    /// Freeze rotation and queue the death pose
    pub fn on_game_over(&mut self, tuning: &Tuning) {
        self.body.allows_rotation = false;
        self.body.angular_velocity = 0.0;
        self.remove_all_actions();
        self.run(HeroAction::SetRotation(tuning.death_rotation()));
    }

    pub fn run(&mut self, action: HeroAction) {
        self.actions.push(action);
    }

    pub fn remove_all_actions(&mut self) {
        self.actions.clear();
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Apply and discard pending actions. Returns how many ran.
    pub fn run_actions(&mut self) -> usize {
        let count = self.actions.len();
        for action in std::mem::take(&mut self.actions) {
            match action {
                HeroAction::SetRotation(angle) => self.rotation = angle,
            }
        }
        count
    }
}
