//! Game settings
//!
//! Defaults reproduce the classic Brick Booster feel. Hosts may pass a JSON
//! document to override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BoosterError, Result};
use crate::renderer::Color;

/// How many bricks a single tick may resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrickHitPolicy {
    /// First intact brick in deployment order wins; others wait for a later tick
    #[default]
    FirstHit,
    /// Every overlapping brick breaks and flips velocity (two hits can cancel out)
    EveryHit,
}

impl BrickHitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickHitPolicy::FirstHit => "first_hit",
            BrickHitPolicy::EveryHit => "every_hit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    /// Extra field height below the container, in pixels
    pub lane_space: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch velocity `[dx, dy]` in pixels per tick
    pub initial_velocity: [f32; 2],
    /// Spawn height above the field bottom
    pub spawn_offset: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels moved per tick while a direction is held
    pub paddle_step: f32,

    // === Rules ===
    pub brick_hit_policy: BrickHitPolicy,
    /// End the session once every brick is gone
    pub end_on_clear: bool,

    // === Host ===
    /// Fill color for bricks, ball, and paddle
    pub color: Color,
    /// Reload the page after the end-of-game alert (web only)
    pub reload_on_end: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_space: LANE_SPACE,

            ball_radius: BALL_RADIUS,
            initial_velocity: BALL_START_VELOCITY,
            spawn_offset: BALL_SPAWN_OFFSET,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,

            brick_hit_policy: BrickHitPolicy::FirstHit,
            end_on_clear: true,

            color: Color::SIENNA,
            reload_on_end: true,
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject values the simulation can't work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("ball_radius", self.ball_radius),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BoosterError::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("lane_space", self.lane_space),
            ("spawn_offset", self.spawn_offset),
            ("paddle_step", self.paddle_step),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BoosterError::InvalidSettings(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.initial_velocity.iter().any(|v| !v.is_finite()) {
            return Err(BoosterError::InvalidSettings(
                "initial_velocity must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
