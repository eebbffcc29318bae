//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed step, velocities in pixels per tick
//! - Stable iteration order (bricks in deployment order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, classify, deflect};
pub use input::{Direction, InputController, InputHandle};
pub use rect::Rect;
pub use state::{Ball, Brick, BrickStatus, Field, GameEvent, GamePhase, GameState, Paddle};
pub use tick::tick;
