//! Arrow-key nudges
//!
//! - arrow: move the ruler
//! - ctrl/cmd + arrow: expand the edge the arrow points at
//! - ctrl/cmd + alt + arrow: shrink from the opposite edge
//! - shift: 10px steps instead of 1px

use super::{Key, Modifiers};

pub const STEP: i32 = 1;
pub const SHIFT_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeAction {
    Move,
    Expand,
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nudge {
    pub direction: Direction,
    pub action: NudgeAction,
    pub step: i32,
}

/// Translate a key press into a nudge, or `None` if the key isn't ours
pub fn handle_key_event(key: Key, modifiers: Modifiers) -> Option<Nudge> {
    let direction = match key {
        Key::ArrowUp => Direction::Up,
        Key::ArrowDown => Direction::Down,
        Key::ArrowLeft => Direction::Left,
        Key::ArrowRight => Direction::Right,
        _ => return None,
    };

    let step = if modifiers.shift { SHIFT_STEP } else { STEP };

    let action = if modifiers.command() {
        if modifiers.alt {
            NudgeAction::Shrink
        } else {
            NudgeAction::Expand
        }
    } else {
        NudgeAction::Move
    };

    Some(Nudge {
        direction,
        action,
        step,
    })
}
