//! Fixed-step simulation tick
//!
//! One tick: brick pass, wall/paddle pass, integration, paddle movement.
//! Rendering and scheduling belong to the caller (see `GameLoop::frame`).

use glam::Vec2;

use super::collision::{classify, deflect};
use super::input::InputController;
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::Result;
use crate::settings::{BrickHitPolicy, Settings};

/// Advance the session by one tick.
///
/// Terminal sessions are left untouched. Fails with `BricksNotDeployed` if no
/// brick set has been installed; nothing is mutated in that case.
pub fn tick(
    state: &mut GameState,
    input: InputController,
    settings: &Settings,
) -> Result<GamePhase> {
    if state.phase.is_terminal() {
        return Ok(state.phase);
    }
    state.bricks()?;

    state.time_ticks += 1;

    let hits = resolve_brick_hits(state, settings.brick_hit_policy)?;
    if hits > 0 && settings.end_on_clear && all_cleared(state)? {
        log::info!("All bricks cleared after {} ticks", state.time_ticks);
        state.phase = GamePhase::Cleared;
        state.events.push(GameEvent::Cleared);
    }

    resolve_walls_and_paddle(state);

    state.ball.pos += state.ball.vel;

    let field_width = state.field.size().x;
    state
        .paddle
        .shift(input.paddle_delta(settings.paddle_step), field_width);

    Ok(state.phase)
}

/// Break intact bricks the ball overlaps and deflect it. Returns the hit count.
fn resolve_brick_hits(state: &mut GameState, policy: BrickHitPolicy) -> Result<usize> {
    let center = state.ball.pos;
    let radius = state.ball.radius;
    let mut vel = state.ball.vel;
    let mut hits = Vec::new();

    for (index, brick) in state.bricks_mut()?.iter_mut().enumerate() {
        if !brick.is_intact() {
            continue;
        }
        let Some(kind) = classify(&brick.rect(), center, radius) else {
            continue;
        };

        vel = deflect(vel, kind);
        brick.destroy();
        hits.push((index, kind));

        if policy == BrickHitPolicy::FirstHit {
            break;
        }
    }

    state.ball.vel = vel;
    for &(index, kind) in &hits {
        log::debug!("Brick {} destroyed ({:?})", index, kind);
        state.events.push(GameEvent::BrickDestroyed { index });
    }
    Ok(hits.len())
}

/// A non-empty brick set with nothing left standing
fn all_cleared(state: &GameState) -> Result<bool> {
    let bricks = state.bricks()?;
    Ok(!bricks.is_empty() && bricks.iter().all(|b| !b.is_intact()))
}

/// Side walls, ceiling, and the bottom edge (paddle or miss)
fn resolve_walls_and_paddle(state: &mut GameState) {
    let size = state.field.size();
    let ball = &mut state.ball;
    let r = ball.radius;
    let next: Vec2 = ball.pos + ball.vel;

    if next.x > size.x - r || next.x < r {
        ball.vel.x = -ball.vel.x;
    }

    if next.y < r {
        ball.vel.y = -ball.vel.y;
    } else if next.y > size.y - r {
        if state.paddle.covers(ball.pos.x) {
            ball.vel.y = -ball.vel.y;
            state.events.push(GameEvent::PaddleBounce);
        } else if state.phase == GamePhase::Running {
            log::info!(
                "Ball missed paddle at x={:.1} (paddle {:.1}..{:.1})",
                ball.pos.x,
                state.paddle.x,
                state.paddle.x + state.paddle.width
            );
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        }
    }
}
