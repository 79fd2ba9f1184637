//! Resize handles around the ruler and the edges they drive

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which edges a drag is allowed to move
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl ActiveEdges {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Named handle on the ruler border
///
/// Deserialised through [`FromStr`] so hosts may send either word order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Handle id as used by the host, e.g. `top-left`
    pub fn id(self) -> &'static str {
        match self {
            ResizeHandle::Top => "top",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::Left => "left",
            ResizeHandle::Right => "right",
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }

    /// Edges a drag on this handle moves
    pub fn edges(self) -> ActiveEdges {
        let mut edges = ActiveEdges::none();
        for part in self.id().split('-') {
            match part {
                "top" => edges.top = true,
                "bottom" => edges.bottom = true,
                "left" => edges.left = true,
                "right" => edges.right = true,
                _ => {}
            }
        }
        edges
    }
}

/// Error returned for handle ids that name no handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHandle(pub String);

impl fmt::Display for UnknownHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resize handle: {}", self.0)
    }
}

impl std::error::Error for UnknownHandle {}

impl FromStr for ResizeHandle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept either word order, "left-top" is the same corner as "top-left"
        let mut edges = ActiveEdges::none();
        for part in s.split('-') {
            match part {
                "top" if !edges.bottom => edges.top = true,
                "bottom" if !edges.top => edges.bottom = true,
                "left" if !edges.right => edges.left = true,
                "right" if !edges.left => edges.right = true,
                _ => return Err(UnknownHandle(s.to_string())),
            }
        }
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle.edges() == edges)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

impl TryFrom<String> for ResizeHandle {
    type Error = UnknownHandle;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        id.parse()
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Handle(ResizeHandle),
    /// Inside the ruler, away from its border
    Body,
    /// Anywhere else on the page
    Page,
}
