//! Game state and core simulation types
//!
//! Everything the loop mutates during a session lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::error::{BoosterError, Result};
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Running,
    /// Every brick destroyed (only when `end_on_clear` is set)
    Cleared,
    /// Ball missed the paddle
    GameOver,
}

impl GamePhase {
    /// Terminal phases never transition again within a session
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Brick at `index` (deployment order) was destroyed
    BrickDestroyed { index: usize },
    PaddleBounce,
    GameOver,
    Cleared,
}

/// The drawing area, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: u32,
    /// Container height plus lane space
    pub height: u32,
    /// Page-space position of the field origin
    pub top_offset: f32,
    pub left_offset: f32,
}

impl Field {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            top_offset: 0.0,
            left_offset: 0.0,
        }
    }

    /// Build a field covering a container's layout rect, padded downward by `lane_space`
    pub fn from_container(container: &Rect, lane_space: f32) -> Self {
        Self {
            width: container.width.max(0.0) as u32,
            height: (container.height + lane_space).max(0.0) as u32,
            top_offset: container.top,
            left_offset: container.left,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Page-space offset of the field origin
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.left_offset, self.top_offset)
    }
}

/// Brick status; only ever goes from intact to destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickStatus {
    Destroyed = 0,
    #[default]
    Intact = 1,
}

/// A brick in field-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub top: f32,
    pub left: f32,
    pub height: f32,
    pub width: f32,
    status: BrickStatus,
}

impl Brick {
    pub fn new(rect: Rect) -> Self {
        Self {
            top: rect.top,
            left: rect.left,
            height: rect.height,
            width: rect.width,
            status: BrickStatus::Intact,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    pub fn status(&self) -> BrickStatus {
        self.status
    }

    #[inline]
    pub fn is_intact(&self) -> bool {
        self.status == BrickStatus::Intact
    }

    /// Mark as destroyed. There is no way back.
    pub fn destroy(&mut self) {
        self.status = BrickStatus::Destroyed;
    }
}

/// The ball; `pos` is its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

/// The player's paddle, anchored to the bottom of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Rightmost legal `x` for a field of `field_width`
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.width).max(0.0)
    }

    /// Shift by `delta` and clamp to `[0, field_width - width]`
    pub fn shift(&mut self, delta: f32, field_width: f32) {
        self.x = (self.x + delta).clamp(0.0, self.max_x(field_width));
    }

    /// Whether `x` falls within the paddle's span (edges included)
    #[inline]
    pub fn covers(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    pub fn rect(&self, field: &Field) -> Rect {
        Rect::new(
            self.x,
            field.height as f32 - self.height,
            self.width,
            self.height,
        )
    }
}

/// Complete session state, owned by the game loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Field,
    pub ball: Ball,
    pub paddle: Paddle,
    /// `None` until bricks are deployed
    bricks: Option<Vec<Brick>>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain; the game loop keeps only the latest frame's
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session: ball near the bottom center, paddle centered, no bricks yet
    pub fn new(field: Field, settings: &Settings) -> Self {
        let size = field.size();
        let mut paddle = Paddle {
            x: 0.0,
            width: settings.paddle_width,
            height: settings.paddle_height,
        };
        paddle.x = paddle.max_x(size.x) / 2.0;

        Self {
            field,
            ball: Ball {
                pos: Vec2::new(size.x / 2.0, size.y - settings.spawn_offset),
                vel: Vec2::from(settings.initial_velocity),
                radius: settings.ball_radius,
            },
            paddle,
            bricks: None,
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Install the brick set, replacing any previous one
    pub fn set_bricks(&mut self, bricks: Vec<Brick>) {
        self.bricks = Some(bricks);
    }

    pub fn bricks(&self) -> Result<&[Brick]> {
        self.bricks.as_deref().ok_or(BoosterError::BricksNotDeployed)
    }

    pub fn bricks_mut(&mut self) -> Result<&mut [Brick]> {
        self.bricks
            .as_deref_mut()
            .ok_or(BoosterError::BricksNotDeployed)
    }

    pub fn intact_count(&self) -> usize {
        self.bricks
            .as_deref()
            .map_or(0, |b| b.iter().filter(|b| b.is_intact()).count())
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(Field::new(480, 320), &Settings::default());
        assert_eq!(state.ball.pos, Vec2::new(240.0, 290.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.paddle.x, 202.5);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(matches!(state.bricks(), Err(BoosterError::BricksNotDeployed)));
    }

    #[test]
    fn test_field_from_container() {
        let container = Rect::new(30.0, 80.0, 480.0, 320.0);
        let field = Field::from_container(&container, 100.0);
        assert_eq!((field.width, field.height), (480, 420));
        assert_eq!(field.offset(), Vec2::new(30.0, 80.0));
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let mut paddle = Paddle {
            x: 3.0,
            width: 75.0,
            height: 10.0,
        };
        paddle.shift(-7.0, 480.0);
        assert_eq!(paddle.x, 0.0);
        paddle.x = 400.0;
        paddle.shift(7.0, 480.0);
        assert_eq!(paddle.x, 405.0);
    }

    #[test]
    fn test_paddle_covers_edges() {
        let paddle = Paddle {
            x: 100.0,
            width: 75.0,
            height: 10.0,
        };
        assert!(paddle.covers(100.0));
        assert!(paddle.covers(175.0));
        assert!(!paddle.covers(99.9));
        assert!(!paddle.covers(175.1));
    }

    #[test]
    fn test_brick_destroy_is_one_way() {
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(brick.status(), BrickStatus::Intact);
        brick.destroy();
        brick.destroy();
        assert_eq!(brick.status(), BrickStatus::Destroyed);
        assert_eq!(brick.status() as u8, 0);
    }
}
