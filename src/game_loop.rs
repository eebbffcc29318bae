//! Frame driver
//!
//! A frame is a repaint followed by one simulation tick. The loop never calls
//! itself: after a running frame it asks the injected [`Scheduler`] for another
//! one, and the host invokes [`GameLoop::frame`] when that request fires.

use crate::deploy::deploy_bricks;
use crate::error::{BoosterError, Result};
use crate::renderer::{self, Surface};
use crate::settings::Settings;
use crate::sim::{self, Field, GameEvent, GamePhase, GameState, InputHandle, Rect};

/// Host capability that arranges for `frame()` to run later
pub trait Scheduler {
    /// Request one future frame. Must not run the frame synchronously, and
    /// must not queue a second frame while one is pending.
    fn request_frame(&mut self);

    /// Whether a requested frame has not fired yet
    fn is_pending(&self) -> bool;
}

/// Scheduler that only records requests; the owner pumps frames by hand.
///
/// At most one request is pending at a time.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total accepted requests
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if self.pending {
            log::warn!("Frame already pending, ignoring request");
            return;
        }
        self.pending = true;
        self.requests += 1;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Owns the session: state, surface, and the shared input cell
pub struct GameLoop<S, K> {
    settings: Settings,
    scheduler: K,
    input: InputHandle,
    state: Option<GameState>,
    surface: Option<S>,
}

impl<S: Surface, K: Scheduler> GameLoop<S, K> {
    pub fn new(settings: Settings, scheduler: K) -> Self {
        Self {
            settings,
            scheduler,
            input: InputHandle::default(),
            state: None,
            surface: None,
        }
    }

    /// Start a fresh session on `field`. Any previous bricks are dropped.
    pub fn init(&mut self, field: Field) {
        log::info!(
            "Session init: field {}x{} at ({}, {})",
            field.width,
            field.height,
            field.left_offset,
            field.top_offset
        );
        self.state = Some(GameState::new(field, &self.settings));
        self.input.set(Default::default());
    }

    /// Attach the drawing surface, returning the previous one
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        self.surface.replace(surface)
    }

    /// Turn page-space rects into bricks and paint them. Returns the brick count.
    pub fn deploy(&mut self, targets: &[Rect]) -> Result<usize> {
        let state = self.state.as_mut().ok_or(BoosterError::NotInitialized)?;
        let surface = self.surface.as_mut().ok_or(BoosterError::SurfaceNotReady)?;

        let bricks = deploy_bricks(&state.field, targets, surface, self.settings.color);
        let count = bricks.len();
        state.set_bricks(bricks);

        log::info!("Deployed {} bricks", count);
        Ok(count)
    }

    /// Check preconditions and request the first frame
    pub fn start(&mut self) -> Result<()> {
        let state = self.state.as_ref().ok_or(BoosterError::NotInitialized)?;
        if self.surface.is_none() {
            return Err(BoosterError::SurfaceNotReady);
        }
        state.bricks()?;

        if state.phase.is_terminal() {
            log::debug!("Session already ended ({:?}), not starting", state.phase);
            return Ok(());
        }
        if self.scheduler.is_pending() {
            log::debug!("Already running, frame pending");
            return Ok(());
        }
        self.scheduler.request_frame();
        Ok(())
    }

    /// Repaint, tick once, and request the next frame while running.
    ///
    /// Events hold only what this frame's tick emitted; drain them before the
    /// next frame. After the session ends this is a no-op that returns the
    /// terminal phase.
    pub fn frame(&mut self) -> Result<GamePhase> {
        let state = self.state.as_mut().ok_or(BoosterError::NotInitialized)?;
        if state.phase.is_terminal() {
            log::debug!("Frame after session end ({:?}), halting", state.phase);
            return Ok(state.phase);
        }
        let surface = self.surface.as_mut().ok_or(BoosterError::SurfaceNotReady)?;

        state.events.clear();
        renderer::draw_scene(state, surface, self.settings.color)?;
        let phase = sim::tick(state, self.input.get(), &self.settings)?;

        if phase.is_terminal() {
            log::info!(
                "Session ended: {:?} after {} ticks, {} bricks left",
                phase,
                state.time_ticks,
                state.intact_count()
            );
        } else {
            self.scheduler.request_frame();
        }
        Ok(phase)
    }

    /// Handle for keyboard callbacks; they touch nothing else
    pub fn input_handle(&self) -> InputHandle {
        self.input.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|s| s.phase)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut K {
        &mut self.scheduler
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state
            .as_mut()
            .map(GameState::drain_events)
            .unwrap_or_default()
    }
}

impl<S: Surface> GameLoop<S, ManualScheduler> {
    /// Run pending frames until none is requested or `max_frames` have run
    pub fn pump(&mut self, max_frames: u64) -> Result<Option<GamePhase>> {
        let mut phase = None;
        for _ in 0..max_frames {
            if !self.scheduler.take_pending() {
                break;
            }
            phase = Some(self.frame()?);
        }
        Ok(phase)
    }
}
