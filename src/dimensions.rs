//! Page dimensions and resize notifications

use crossbeam_channel::Receiver;

use crate::domain::{PageBounds, Point};
use crate::sync::Broadcaster;

/// Allowable page area for the ruler plus its resize subscribers
#[derive(Default)]
pub struct Dimensions {
    bounds: PageBounds,
    /// Amount the page origin is pushed by body margins and the docked toolbar
    offset: Point,
    updates: Broadcaster<PageBounds>,
}

impl Dimensions {
    pub fn new(bounds: PageBounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> PageBounds {
        self.bounds
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Translate a viewport pointer position into page coordinates
    pub fn to_page(&self, point: Point) -> Point {
        Point::new(
            point.x.saturating_sub(self.offset.x),
            point.y.saturating_sub(self.offset.y),
        )
    }

    /// Register for page-resize notifications
    pub fn add_update_callback(&mut self) -> Receiver<PageBounds> {
        self.updates.subscribe()
    }

    /// Store the new page size and notify every subscriber
    pub fn update(&mut self, width: i32, height: i32) {
        self.bounds = PageBounds::new(width, height);
        log::debug!("Page resized to {}x{}", self.bounds.width, self.bounds.height);
        self.updates.publish(self.bounds);
    }

    /// Forget every resize subscriber
    pub fn remove_update_callbacks(&mut self) {
        self.updates.clear();
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.updates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_notifies_subscribers() {
        let mut dimensions = Dimensions::new(PageBounds::new(800, 600));
        let rx = dimensions.add_update_callback();

        dimensions.update(1024, 2000);

        assert_eq!(dimensions.bounds(), PageBounds::new(1024, 2000));
        assert_eq!(rx.try_recv(), Ok(PageBounds::new(1024, 2000)));
    }

    #[test]
    fn test_remove_update_callbacks() {
        let mut dimensions = Dimensions::default();
        let rx = dimensions.add_update_callback();
        dimensions.remove_update_callbacks();
        assert_eq!(dimensions.subscriber_count(), 0);

        dimensions.update(10, 10);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_to_page_applies_offset() {
        let mut dimensions = Dimensions::default();
        dimensions.set_offset(Point::new(8, 38));
        assert_eq!(dimensions.to_page(Point::new(100, 100)), Point::new(92, 62));
        assert_eq!(
            dimensions.to_page(Point::new(i32::MIN, i32::MIN)),
            Point::new(i32::MIN, i32::MIN)
        );
    }
}
