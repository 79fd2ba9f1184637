//! Pointer drag sessions: resize by handle, move by body, draw a new ruler

use crate::domain::{ActiveEdges, HitTarget, Point, Rect, ResizeHandle};

use super::Ruler;

const EDGE_GRAB_THICKNESS: i32 = 8;
const CORNER_DIAMETER: i32 = 16;

/// Find what part of the ruler sits under `point`
///
/// Corners win over edges, edges win over the body.
pub fn hit_test(rect: Rect, point: Point) -> HitTarget {
    if rect.is_empty() {
        return HitTarget::Page;
    }

    let radius = CORNER_DIAMETER / 2;
    let corner = |x: i32, y: i32| {
        Rect::new(
            x.saturating_sub(radius),
            y.saturating_sub(radius),
            x.saturating_add(radius),
            y.saturating_add(radius),
        )
    };
    let corners = [
        (corner(rect.left, rect.top), ResizeHandle::TopLeft),
        (corner(rect.right, rect.top), ResizeHandle::TopRight),
        (corner(rect.left, rect.bottom), ResizeHandle::BottomLeft),
        (corner(rect.right, rect.bottom), ResizeHandle::BottomRight),
    ];

    let half = EDGE_GRAB_THICKNESS / 2;
    let edges = [
        (
            Rect::new(
                rect.left,
                rect.top.saturating_sub(half),
                rect.right,
                rect.top.saturating_add(half),
            ),
            ResizeHandle::Top,
        ),
        (
            Rect::new(
                rect.left,
                rect.bottom.saturating_sub(half),
                rect.right,
                rect.bottom.saturating_add(half),
            ),
            ResizeHandle::Bottom,
        ),
        (
            Rect::new(
                rect.left.saturating_sub(half),
                rect.top,
                rect.left.saturating_add(half),
                rect.bottom,
            ),
            ResizeHandle::Left,
        ),
        (
            Rect::new(
                rect.right.saturating_sub(half),
                rect.top,
                rect.right.saturating_add(half),
                rect.bottom,
            ),
            ResizeHandle::Right,
        ),
    ];

    corners
        .into_iter()
        .chain(edges)
        .find(|(area, _)| area.contains_point(point.x, point.y))
        .map(|(_, handle)| HitTarget::Handle(handle))
        .unwrap_or_else(|| {
            if rect.contains_point(point.x, point.y) {
                HitTarget::Body
            } else {
                HitTarget::Page
            }
        })
}

/// Pointer-to-edge distances captured at pointer-down
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOffsets {
    pub left: i32,
    pub top: i32,
    pub bottom: i32,
    pub right: i32,
}

/// State that lives between pointer-down and pointer-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSession {
    Resize {
        handle: ResizeHandle,
        edges: ActiveEdges,
        offsets: EdgeOffsets,
    },
    Move {
        grab: Point,
    },
    Draw {
        anchor: Point,
    },
}

impl DragSession {
    /// Start resizing from a named handle
    pub fn resize(ruler: &Ruler, handle: ResizeHandle, pointer: Point) -> Self {
        let edges = handle.edges();
        let mut offsets = EdgeOffsets::default();
        if edges.left {
            offsets.left = pointer.x.saturating_sub(ruler.left());
        }
        if edges.top {
            offsets.top = pointer.y.saturating_sub(ruler.top());
        }
        if edges.bottom {
            offsets.bottom = ruler.bottom().saturating_sub(pointer.y);
        }
        if edges.right {
            offsets.right = ruler.right().saturating_sub(pointer.x);
        }
        DragSession::Resize {
            handle,
            edges,
            offsets,
        }
    }

    /// Start the session matching whatever lies under the pointer
    pub fn begin(ruler: &Ruler, pointer: Point) -> Self {
        match hit_test(ruler.rect(), pointer) {
            HitTarget::Handle(handle) => Self::resize(ruler, handle, pointer),
            HitTarget::Body => DragSession::Move {
                grab: Point::new(
                    pointer.x.saturating_sub(ruler.left()),
                    pointer.y.saturating_sub(ruler.top()),
                ),
            },
            HitTarget::Page => DragSession::Draw { anchor: pointer },
        }
    }

    /// Apply a pointer move to the ruler
    pub fn update(&self, ruler: &mut Ruler, pointer: Point) -> bool {
        match *self {
            DragSession::Resize { edges, offsets, .. } => {
                let mut changed = false;
                if edges.left {
                    changed |= ruler.set_left(pointer.x.saturating_sub(offsets.left));
                }
                if edges.top {
                    changed |= ruler.set_top(pointer.y.saturating_sub(offsets.top));
                }
                if edges.bottom {
                    changed |= ruler.set_bottom(pointer.y.saturating_add(offsets.bottom));
                }
                if edges.right {
                    changed |= ruler.set_right(pointer.x.saturating_add(offsets.right));
                }
                changed
            }
            DragSession::Move { grab } => ruler.move_to(
                pointer.x.saturating_sub(grab.x),
                pointer.y.saturating_sub(grab.y),
            ),
            DragSession::Draw { anchor } => ruler.set_rect(Rect::from_points(anchor, pointer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageBounds;

    fn ruler() -> Ruler {
        let mut ruler = Ruler::new(PageBounds::new(800, 600));
        ruler.set_rect(Rect::new(100, 100, 300, 200));
        ruler
    }

    #[test]
    fn test_hit_test_regions() {
        let rect = Rect::new(100, 100, 300, 200);
        assert_eq!(
            hit_test(rect, Point::new(102, 98)),
            HitTarget::Handle(ResizeHandle::TopLeft)
        );
        assert_eq!(
            hit_test(rect, Point::new(305, 205)),
            HitTarget::Handle(ResizeHandle::BottomRight)
        );
        assert_eq!(
            hit_test(rect, Point::new(200, 101)),
            HitTarget::Handle(ResizeHandle::Top)
        );
        assert_eq!(
            hit_test(rect, Point::new(298, 150)),
            HitTarget::Handle(ResizeHandle::Right)
        );
        assert_eq!(hit_test(rect, Point::new(200, 150)), HitTarget::Body);
        assert_eq!(hit_test(rect, Point::new(500, 500)), HitTarget::Page);
    }

    #[test]
    fn test_hit_test_empty_ruler_draws() {
        assert_eq!(hit_test(Rect::default(), Point::new(0, 0)), HitTarget::Page);
    }

    #[test]
    fn test_resize_keeps_pointer_offset() {
        let mut ruler = ruler();
        // Grab the bottom-right corner 3px inside it
        let session = DragSession::resize(&ruler, ResizeHandle::BottomRight, Point::new(297, 197));

        session.update(&mut ruler, Point::new(397, 247));
        assert_eq!(ruler.rect(), Rect::new(100, 100, 400, 250));
    }

    #[test]
    fn test_resize_only_moves_active_edges() {
        let mut ruler = ruler();
        let session = DragSession::resize(&ruler, ResizeHandle::Left, Point::new(100, 150));

        session.update(&mut ruler, Point::new(50, 10));
        assert_eq!(ruler.rect(), Rect::new(50, 100, 300, 200));
    }

    #[test]
    fn test_resize_cannot_cross_opposite_edge() {
        let mut ruler = ruler();
        let session = DragSession::resize(&ruler, ResizeHandle::Top, Point::new(200, 100));

        session.update(&mut ruler, Point::new(200, 450));
        assert_eq!(ruler.rect(), Rect::new(100, 200, 300, 200));
        assert_eq!(ruler.rect().height(), 0);
    }

    #[test]
    fn test_move_session_preserves_size() {
        let mut ruler = ruler();
        let session = DragSession::begin(&ruler, Point::new(150, 150));
        assert!(matches!(session, DragSession::Move { .. }));

        session.update(&mut ruler, Point::new(850, 50));
        assert_eq!(ruler.rect(), Rect::new(600, 0, 800, 100));
    }

    #[test]
    fn test_draw_session_spans_anchor_and_pointer() {
        let mut ruler = ruler();
        let session = DragSession::begin(&ruler, Point::new(500, 400));
        assert!(matches!(session, DragSession::Draw { .. }));

        session.update(&mut ruler, Point::new(450, 420));
        assert_eq!(ruler.rect(), Rect::new(450, 400, 500, 420));

        session.update(&mut ruler, Point::new(900, -30));
        assert_eq!(ruler.rect(), Rect::new(500, 0, 800, 400));
    }

    #[test]
    fn test_sessions_saturate_on_extreme_pointers() {
        let mut ruler = ruler();
        let session = DragSession::resize(&ruler, ResizeHandle::Right, Point::new(i32::MIN, 0));
        session.update(&mut ruler, Point::new(i32::MIN, 0));
        assert_eq!(ruler.rect(), Rect::new(100, 100, 100, 200));
        session.update(&mut ruler, Point::new(i32::MAX, 0));
        assert_eq!(ruler.rect(), Rect::new(100, 100, 800, 200));

        let mut moved = self::ruler();
        let session = DragSession::begin(&moved, Point::new(150, 150));
        session.update(&mut moved, Point::new(i32::MIN, i32::MAX));
        assert_eq!(moved.rect(), Rect::new(0, 500, 200, 600));

        let corner = Rect::new(0, 0, i32::MAX, i32::MAX);
        assert_eq!(
            hit_test(corner, Point::new(i32::MAX - 1, i32::MAX - 1)),
            HitTarget::Handle(ResizeHandle::BottomRight)
        );
    }
}
