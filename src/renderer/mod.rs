//! Canvas-style 2D rendering
//!
//! The core only needs filled rectangles and filled circles. [`Surface`] is the
//! capability the host provides; the browser build uses a Canvas 2D context,
//! tests and the native binary use [`RecordingSurface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{BoosterError, Result};
use crate::sim::{GameState, Rect};

/// An opaque sRGB color, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// `#a0522d`
    pub const SIENNA: Color = Color::rgb(0xa0, 0x52, 0x2d);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (case-insensitive)
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || BoosterError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// CSS fill style string
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = BoosterError;

    fn try_from(s: String) -> Result<Self> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Clear a `width x height` area from the origin
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// One recorded paint operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Surface that records every paint operation instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the most recent clear
    pub fn current_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}

/// Repaint the whole scene: clear, intact bricks, ball, then paddle
pub fn draw_scene(state: &GameState, surface: &mut dyn Surface, color: Color) -> Result<()> {
    let bricks = state.bricks()?;
    let size = state.field.size();

    surface.clear(size.x, size.y);
    for brick in bricks.iter().filter(|b| b.is_intact()) {
        surface.fill_rect(brick.rect(), color);
    }
    surface.fill_circle(state.ball.pos, state.ball.radius, color);
    surface.fill_rect(state.paddle.rect(&state.field), color);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Brick, Field};

    #[test]
    fn test_color_parse_and_format() {
        assert_eq!(Color::from_hex("#a0522d").unwrap(), Color::SIENNA);
        assert_eq!(Color::from_hex("#0095DD").unwrap().to_css(), "#0095dd");
        assert!(matches!(Color::from_hex("a0522d"), Err(BoosterError::InvalidColor(_))));
        assert!(Color::from_hex("#a0522").is_err());
        assert!(Color::from_hex("#zz522d").is_err());
        assert!(Color::from_hex("#é0522").is_err());
    }

    #[test]
    fn test_draw_scene_order_skips_destroyed() {
        let settings = Settings::default();
        let mut state = GameState::new(Field::new(480, 320), &settings);
        let mut gone = Brick::new(Rect::new(0.0, 0.0, 20.0, 10.0));
        gone.destroy();
        state.set_bricks(vec![gone, Brick::new(Rect::new(50.0, 0.0, 20.0, 10.0))]);

        let mut surface = RecordingSurface::new();
        draw_scene(&state, &mut surface, settings.color).unwrap();

        let c = settings.color;
        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::Clear {
                    width: 480.0,
                    height: 320.0
                },
                DrawCommand::Rect {
                    rect: Rect::new(50.0, 0.0, 20.0, 10.0),
                    color: c
                },
                DrawCommand::Circle {
                    center: Vec2::new(240.0, 290.0),
                    radius: 10.0,
                    color: c
                },
                DrawCommand::Rect {
                    rect: Rect::new(202.5, 310.0, 75.0, 10.0),
                    color: c
                },
            ]
        );
    }

    #[test]
    fn test_draw_scene_requires_bricks() {
        let state = GameState::new(Field::new(480, 320), &Settings::default());
        let mut surface = RecordingSurface::new();
        assert!(matches!(
            draw_scene(&state, &mut surface, Color::SIENNA),
            Err(BoosterError::BricksNotDeployed)
        ));
        assert!(surface.commands.is_empty());
    }
}
