//! Input mapping
//!
//! Keyboard keys and on-screen buttons both end up as held directions in an
//! [`InputIntent`]; the simulation samples that once per tick.

use crate::sim::InputIntent;

/// A horizontal control direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Direction bound to a `KeyboardEvent.key` value
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Press or release a direction
pub fn set_direction(intent: &mut InputIntent, direction: Direction, pressed: bool) {
    match direction {
        Direction::Left => intent.left = pressed,
        Direction::Right => intent.right = pressed,
    }
}

/// Apply a key down/up event. Returns true if the key was a game control.
pub fn apply_key(intent: &mut InputIntent, key: &str, pressed: bool) -> bool {
    match direction_for_key(key) {
        Some(direction) => {
            set_direction(intent, direction, pressed);
            true
        }
        None => false,
    }
}
