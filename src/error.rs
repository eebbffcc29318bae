//! Crate error type
//!
//! Precondition violations are caller-sequencing bugs and surface immediately.
//! Losing the ball is not an error; it is a [`GamePhase`](crate::sim::GamePhase).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoosterError {
    /// `frame()` called before `init()` gave the loop a field
    #[error("game loop has not been initialized with a field")]
    NotInitialized,
    #[error("drawing surface is not attached")]
    SurfaceNotReady,
    #[error("brick set has not been deployed")]
    BricksNotDeployed,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    /// DOM/canvas failures reported by the browser host
    #[error("host error: {0}")]
    Host(String),
}

pub type Result<T, E = BoosterError> = std::result::Result<T, E>;
