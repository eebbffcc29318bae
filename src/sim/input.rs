//! Held-key state for paddle movement
//!
//! Written by keyboard handlers, read once per tick. Both run on the same
//! thread, so the loop shares it through a `Cell` rather than a lock.

use std::cell::Cell;
use std::rc::Rc;

/// Paddle direction a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value; other keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Right" | "ArrowRight" => Some(Direction::Right),
            "Left" | "ArrowLeft" => Some(Direction::Left),
            _ => None,
        }
    }
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputController {
    pub left: bool,
    pub right: bool,
}

impl InputController {
    #[must_use]
    pub fn press(self, dir: Direction) -> Self {
        self.with(dir, true)
    }

    #[must_use]
    pub fn release(self, dir: Direction) -> Self {
        self.with(dir, false)
    }

    fn with(mut self, dir: Direction, held: bool) -> Self {
        match dir {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
        self
    }

    /// Signed paddle step; right wins when both are held
    pub fn paddle_delta(&self, step: f32) -> f32 {
        if self.right {
            step
        } else if self.left {
            -step
        } else {
            0.0
        }
    }
}

/// Shared handle between input callbacks and the loop
pub type InputHandle = Rc<Cell<InputController>>;

/// Apply a key-down to the shared state. Returns whether the key was relevant.
pub fn key_down(input: &InputHandle, key: &str) -> bool {
    match Direction::from_key(key) {
        Some(dir) => {
            input.set(input.get().press(dir));
            true
        }
        None => false,
    }
}

/// Apply a key-up to the shared state. Returns whether the key was relevant.
pub fn key_up(input: &InputHandle, key: &str) -> bool {
    match Direction::from_key(key) {
        Some(dir) => {
            input.set(input.get().release(dir));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Right"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("Left"), Some(Direction::Left));
        assert_eq!(Direction::from_key("a"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_press_release() {
        let input = InputController::default()
            .press(Direction::Left)
            .press(Direction::Right);
        assert!(input.left && input.right);
        assert_eq!(input.paddle_delta(7.0), 7.0);

        let input = input.release(Direction::Right);
        assert_eq!(input.paddle_delta(7.0), -7.0);
        assert_eq!(input.release(Direction::Left), InputController::default());
    }

    #[test]
    fn test_shared_handle_ignores_other_keys() {
        let handle = InputHandle::default();
        assert!(!key_down(&handle, "Enter"));
        assert_eq!(handle.get(), InputController::default());

        assert!(key_down(&handle, "ArrowLeft"));
        assert!(handle.get().left);
        assert!(key_up(&handle, "Left"));
        assert!(!handle.get().left);
    }
}
