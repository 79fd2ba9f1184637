//! Raw input events delivered by the host

pub mod keyboard;

use serde::{Deserialize, Serialize};

use crate::domain::{Point, ResizeHandle};
use crate::widget::toolbar::ToolbarEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Character(char),
}

/// Modifier keys held during a key press
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Everything the overlay reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key {
        key: Key,
        #[serde(flatten)]
        modifiers: Modifiers,
    },
    /// `handle` is set when the host already knows which handle was pressed
    PointerDown {
        x: i32,
        y: i32,
        #[serde(default)]
        handle: Option<ResizeHandle>,
    },
    PointerMove {
        x: i32,
        y: i32,
    },
    PointerUp {
        x: i32,
        y: i32,
    },
    PageResize {
        width: i32,
        height: i32,
    },
    /// Page origin offset from body margins
    PageOffset {
        x: i32,
        y: i32,
    },
    Toolbar {
        event: ToolbarEvent,
    },
}

impl InputEvent {
    /// Pointer position carried by pointer events
    pub fn pointer(&self) -> Option<Point> {
        match *self {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y }
            | InputEvent::PointerUp { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}
