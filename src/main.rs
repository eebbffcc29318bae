//! Brick Booster entry point
//!
//! The game runs in the browser via `startBrickBooster` (see `platform::web`).
//! The native binary plays a headless session with a simple autopilot and
//! logs how it went, which is handy for tuning settings.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Booster (native, headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| brick_booster::Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => brick_booster::Settings::default(),
    };

    match headless::run(settings) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            log::error!("Session failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is startBrickBooster, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brick_booster::renderer::RecordingSurface;
    use brick_booster::sim::{Direction, Field, GameEvent, InputController, Rect};
    use brick_booster::{GameLoop, ManualScheduler, Result, Settings};

    const MAX_FRAMES: u64 = 20_000;

    /// A 480x320 container with three rows of "elements"
    fn demo_targets() -> Vec<Rect> {
        (0..3)
            .flat_map(|row| {
                (0..6).map(move |col| {
                    Rect::new(
                        20.0 + col as f32 * 75.0,
                        30.0 + row as f32 * 30.0,
                        65.0,
                        20.0,
                    )
                })
            })
            .collect()
    }

    pub fn run(settings: Settings) -> Result<String> {
        let container = Rect::new(0.0, 0.0, 480.0, 320.0);
        let field = Field::from_container(&container, settings.lane_space);

        let mut game: GameLoop<RecordingSurface, ManualScheduler> =
            GameLoop::new(settings, ManualScheduler::new());
        game.init(field);
        game.attach_surface(RecordingSurface::new());
        let total = game.deploy(&demo_targets())?;
        let input = game.input_handle();
        game.start()?;

        let mut frames = 0;
        let mut bounces = 0;
        while frames < MAX_FRAMES && game.scheduler_mut().take_pending() {
            if let Some(state) = game.state() {
                // Chase the ball with the paddle center
                let center = state.paddle.x + state.paddle.width / 2.0;
                let gap = state.ball.pos.x - center;
                let dir = if gap > state.paddle.width / 4.0 {
                    Some(Direction::Right)
                } else if gap < -state.paddle.width / 4.0 {
                    Some(Direction::Left)
                } else {
                    None
                };
                let held = InputController::default();
                input.set(dir.map_or(held, |d| held.press(d)));
            }

            game.frame()?;
            frames += 1;
            // Keep the recording from growing without bound
            if game.surface().is_some_and(|s| s.commands.len() > 4096) {
                game.attach_surface(RecordingSurface::new());
            }
            bounces += game
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::PaddleBounce)
                .count();
        }

        let state = game.state().ok_or(brick_booster::BoosterError::NotInitialized)?;
        Ok(format!(
            "phase={:?} frames={} paddle_bounces={} bricks_left={}/{}",
            state.phase,
            frames,
            bounces,
            state.intact_count(),
            total
        ))
    }
}
