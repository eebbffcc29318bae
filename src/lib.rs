//! Brick Booster - breakout on top of any web page
//!
//! Elements picked by a selector become bricks; a ball and paddle play over
//! them on a canvas overlay.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision, state, tick)
//! - `deploy`: Page rects to field-local bricks
//! - `renderer`: Drawing surface capability (Canvas 2D on the web)
//! - `game_loop`: Frame driver with an injected scheduler
//! - `platform`: Browser glue
//! - `settings`: Tunables, loadable from JSON

pub mod deploy;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{BoosterError, Result};
pub use game_loop::{GameLoop, ManualScheduler, Scheduler};
pub use settings::{BrickHitPolicy, Settings};

/// Default tuning
pub mod consts {
    /// Extra field height below the container, giving the paddle its own lane
    pub const LANE_SPACE: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_VELOCITY: [f32; 2] = [4.0, -4.0];
    /// Spawn height above the bottom of the field
    pub const BALL_SPAWN_OFFSET: f32 = 30.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_STEP: f32 = 7.0;
}
