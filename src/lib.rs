//! Bunny Runner - a side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (hero control, scrolling, obstacles, contacts)
//! - `scene`: Scene layout and the typed registry resolved from it
//! - `tuning`: Data-driven game balance
//! - `host`: Headless stand-ins for the engine (physics, frame driver)

pub mod error;
pub mod host;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SceneError};
pub use scene::{SceneDescription, SceneRegistry};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Horizontal speed shared by the scroll and obstacle layers (units/s)
    pub const SCROLL_SPEED: f32 = 100.0;

    /// Hero motion
    pub const MAX_RISE_SPEED: f32 = 400.0;
    pub const FLAP_IMPULSE: f32 = 200.0;
    pub const FLAP_ANGULAR_IMPULSE: f32 = 1.0;
    /// Nose-dive assist, applied as `rate * dt` each step
    pub const DIVE_ANGULAR_IMPULSE_RATE: f32 = -20_000.0;
    /// Seconds after the last flap before the nose-dive assist kicks in
    pub const DIVE_ASSIST_DELAY: f32 = 0.2;

    /// Rotation bounds (degrees)
    pub const MIN_ROTATION_DEG: f32 = -90.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    pub const DEATH_ROTATION_DEG: f32 = -90.0;

    /// Angular velocity bounds (rad/s)
    pub const MIN_ANGULAR_VEL: f32 = -1.0;
    pub const MAX_ANGULAR_VEL: f32 = 3.0;

    /// Obstacle cadence and placement (scene space)
    pub const SPAWN_INTERVAL: f32 = 1.5;
    pub const SPAWN_X: f32 = 352.0;
    pub const SPAWN_Y_MIN: f32 = 234.0;
    pub const SPAWN_Y_MAX: f32 = 439.0;
    /// Obstacles are removed once their scene x drops to this (half the obstacle width)
    pub const OBSTACLE_REMOVAL_X: f32 = -26.0;

    /// Host physics gravity (units/s²)
    pub const GRAVITY: f32 = -1000.0;
}
