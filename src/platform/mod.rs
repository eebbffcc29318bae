//! Platform abstraction layer
//!
//! The simulation and loop are host-agnostic. Browser specifics live in `web`:
//! - Field canvas creation from a container element
//! - Keyboard listeners feeding the shared input cell
//! - `requestAnimationFrame` scheduling
//! - End-of-session alert and reload

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;
