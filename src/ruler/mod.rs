//! The ruler rectangle and every way it can be mutated
//!
//! All mutations go through the setters below. Each one clamps against the
//! current page bounds and publishes a [`Geometry`] snapshot when the
//! rectangle actually changed.

pub mod drag;

use crossbeam_channel::Receiver;

use crate::domain::{Geometry, PageBounds, Rect};
use crate::input::keyboard::{Direction, Nudge, NudgeAction};
use crate::sync::{self, Broadcaster};

pub use drag::DragSession;

pub struct Ruler {
    rect: Rect,
    page: PageBounds,
    page_updates: Option<Receiver<PageBounds>>,
    changes: Broadcaster<Geometry>,
}

impl Ruler {
    /// Create an empty ruler at the page origin
    pub fn new(page: PageBounds) -> Self {
        Self {
            rect: Rect::default(),
            page,
            page_updates: None,
            changes: Broadcaster::new(),
        }
    }

    /// Follow page-resize notifications from `rx`
    pub fn with_page_updates(mut self, rx: Receiver<PageBounds>) -> Self {
        self.page_updates = Some(rx);
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            rect: self.rect,
            page: self.page,
        }
    }

    pub fn top(&self) -> i32 {
        self.rect.top
    }

    pub fn left(&self) -> i32 {
        self.rect.left
    }

    pub fn bottom(&self) -> i32 {
        self.rect.bottom
    }

    pub fn right(&self) -> i32 {
        self.rect.right
    }

    /// Register for geometry change notifications
    pub fn subscribe(&mut self) -> Receiver<Geometry> {
        self.changes.subscribe()
    }

    pub fn set_left(&mut self, left: i32) -> bool {
        let rect = Rect {
            left: left.clamp(0, self.rect.right),
            ..self.rect
        };
        self.commit(rect)
    }

    pub fn set_right(&mut self, right: i32) -> bool {
        let rect = Rect {
            right: right.clamp(self.rect.left, self.page.width),
            ..self.rect
        };
        self.commit(rect)
    }

    pub fn set_top(&mut self, top: i32) -> bool {
        let rect = Rect {
            top: top.clamp(0, self.rect.bottom),
            ..self.rect
        };
        self.commit(rect)
    }

    pub fn set_bottom(&mut self, bottom: i32) -> bool {
        let rect = Rect {
            bottom: bottom.clamp(self.rect.top, self.page.height),
            ..self.rect
        };
        self.commit(rect)
    }

    /// Resize horizontally, anchored on the left edge
    pub fn set_width(&mut self, width: i32) -> bool {
        let right = self.rect.left.saturating_add(width.max(0));
        self.set_right(right)
    }

    /// Resize vertically, anchored on the top edge
    pub fn set_height(&mut self, height: i32) -> bool {
        let bottom = self.rect.top.saturating_add(height.max(0));
        self.set_bottom(bottom)
    }

    /// Move the top-left corner to `(x, y)` keeping the size
    pub fn move_to(&mut self, x: i32, y: i32) -> bool {
        let width = self.rect.width();
        let height = self.rect.height();
        let left = x.clamp(0, (self.page.width - width).max(0));
        let top = y.clamp(0, (self.page.height - height).max(0));
        self.commit(Rect::new(left, top, left + width, top + height))
    }

    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        self.move_to(
            self.rect.left.saturating_add(dx),
            self.rect.top.saturating_add(dy),
        )
    }

    /// Replace the whole rectangle
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        self.commit(rect.clamp_to(self.page))
    }

    /// Apply a keyboard nudge
    pub fn apply_nudge(&mut self, nudge: Nudge) -> bool {
        let step = nudge.step;
        let back = step.saturating_neg();
        let Rect {
            left,
            top,
            right,
            bottom,
        } = self.rect;
        match (nudge.action, nudge.direction) {
            (NudgeAction::Move, Direction::Up) => self.translate(0, back),
            (NudgeAction::Move, Direction::Down) => self.translate(0, step),
            (NudgeAction::Move, Direction::Left) => self.translate(back, 0),
            (NudgeAction::Move, Direction::Right) => self.translate(step, 0),
            (NudgeAction::Expand, Direction::Up) => self.set_top(top.saturating_add(back)),
            (NudgeAction::Expand, Direction::Down) => self.set_bottom(bottom.saturating_add(step)),
            (NudgeAction::Expand, Direction::Left) => self.set_left(left.saturating_add(back)),
            (NudgeAction::Expand, Direction::Right) => self.set_right(right.saturating_add(step)),
            // Shrinking pulls in the edge opposite the arrow
            (NudgeAction::Shrink, Direction::Up) => self.set_bottom(bottom.saturating_add(back)),
            (NudgeAction::Shrink, Direction::Down) => self.set_top(top.saturating_add(step)),
            (NudgeAction::Shrink, Direction::Left) => self.set_right(right.saturating_add(back)),
            (NudgeAction::Shrink, Direction::Right) => self.set_left(left.saturating_add(step)),
        }
    }

    /// Adopt new page bounds, pulling the rectangle back inside if needed
    pub fn resize_page(&mut self, page: PageBounds) -> bool {
        let page_changed = self.page != page;
        self.page = page;
        let rect_changed = self.commit(self.rect.clamp_to(page));
        if page_changed && !rect_changed {
            // Guides still depend on the page size
            self.changes.publish(self.geometry());
        }
        page_changed || rect_changed
    }

    /// Apply any pending page-resize notification
    pub fn sync_page(&mut self) -> bool {
        let Some(page) = self.page_updates.as_ref().and_then(sync::latest) else {
            return false;
        };
        self.resize_page(page)
    }

    fn commit(&mut self, rect: Rect) -> bool {
        if rect == self.rect {
            return false;
        }
        debug_assert!(rect.fits(self.page), "{rect:?} escapes {:?}", self.page);
        self.rect = rect;
        self.changes.publish(self.geometry());
        true
    }
}
