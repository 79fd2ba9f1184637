//! Guide lines running from the ruler corners to the page edges

use crossbeam_channel::Receiver;
use serde::Serialize;

use crate::config::RulerColor;
use crate::domain::{Geometry, PageBounds, Size};
use crate::settings::Request;
use crate::sync;

/// Sizes of the four corner guides
///
/// Every length gets one extra pixel so the guide overlaps the ruler border
/// and runs flush with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuideSizes {
    pub top_left: Size,
    pub top_right: Size,
    pub bottom_left: Size,
    pub bottom_right: Size,
}

impl GuideSizes {
    pub fn compute(geometry: Geometry) -> Self {
        let Geometry { rect, page } = geometry;
        let left_width = rect.left + 1;
        let right_width = (page.width - rect.right + 1).max(0);
        let top_height = rect.top + 1;
        let bottom_height = (page.height - rect.bottom + 1).max(0);

        Self {
            top_left: Size::new(left_width, top_height),
            top_right: Size::new(right_width, top_height),
            bottom_left: Size::new(left_width, bottom_height),
            bottom_right: Size::new(right_width, bottom_height),
        }
    }
}

/// What the host draws for the guides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLayout {
    pub shown: bool,
    pub container: Size,
    pub sizes: GuideSizes,
    pub color: String,
}

pub struct Guides {
    /// User preference
    visible: bool,
    /// Guides only make sense once a non-empty ruler exists
    has_ruler: bool,
    container: Size,
    sizes: GuideSizes,
    color: RulerColor,
    geometry_rx: Receiver<Geometry>,
    page_rx: Receiver<PageBounds>,
}

impl Guides {
    /// Guides start hidden until there is a ruler to hang them on
    pub fn new(
        page: PageBounds,
        geometry_rx: Receiver<Geometry>,
        page_rx: Receiver<PageBounds>,
    ) -> Self {
        Self {
            visible: true,
            has_ruler: false,
            container: page.size(),
            sizes: GuideSizes::default(),
            color: RulerColor::default(),
            geometry_rx,
            page_rx,
        }
    }

    /// Catch up with page and ruler changes
    pub fn sync(&mut self) -> bool {
        let mut changed = false;
        if let Some(page) = sync::latest(&self.page_rx) {
            self.container = page.size();
            changed = true;
        }
        if let Some(geometry) = sync::latest(&self.geometry_rx) {
            self.set_sizes(geometry);
            changed = true;
        }
        changed
    }

    /// Line the guides up with the ruler
    pub fn set_sizes(&mut self, geometry: Geometry) {
        self.container = geometry.page.size();
        self.sizes = GuideSizes::compute(geometry);
        self.has_ruler = !geometry.rect.is_empty();
    }

    /// Change the preference, returning the request that saves it when asked to
    pub fn set_visible(&mut self, visible: bool, save: bool) -> Option<Request> {
        self.visible = visible;
        save.then_some(Request::SetGuides { visible })
    }

    pub fn set_color(&mut self, color: RulerColor) {
        self.color = color;
    }

    pub fn layout(&self) -> GuideLayout {
        GuideLayout {
            shown: self.visible && self.has_ruler,
            container: self.container,
            sizes: self.sizes,
            color: self.color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rect;
    use crate::ruler::Ruler;

    fn geometry(rect: Rect) -> Geometry {
        Geometry {
            rect,
            page: PageBounds::new(800, 600),
        }
    }

    #[test]
    fn test_sizes_overlap_the_border() {
        let sizes = GuideSizes::compute(geometry(Rect::new(100, 50, 300, 200)));
        assert_eq!(sizes.top_left, Size::new(101, 51));
        assert_eq!(sizes.top_right, Size::new(501, 51));
        assert_eq!(sizes.bottom_left, Size::new(101, 401));
        assert_eq!(sizes.bottom_right, Size::new(501, 401));
    }

    #[test]
    fn test_sizes_never_negative() {
        let sizes = GuideSizes::compute(Geometry {
            rect: Rect::new(0, 0, 900, 700),
            page: PageBounds::new(800, 600),
        });
        assert_eq!(sizes.bottom_right, Size::new(0, 0));
    }

    #[test]
    fn test_guides_follow_ruler_changes() {
        let page = PageBounds::new(800, 600);
        let mut ruler = Ruler::new(page);
        let mut dimensions = crate::dimensions::Dimensions::new(page);
        let mut guides = Guides::new(page, ruler.subscribe(), dimensions.add_update_callback());
        assert!(!guides.layout().shown);

        ruler.set_rect(Rect::new(10, 10, 20, 20));
        assert!(guides.sync());
        assert!(guides.layout().shown);
        assert_eq!(guides.layout().sizes.top_left, Size::new(11, 11));

        dimensions.update(1000, 1000);
        assert!(guides.sync());
        assert_eq!(guides.layout().container, Size::new(1000, 1000));
        assert!(!guides.sync());
    }

    #[test]
    fn test_hidden_preference_survives_resizes() {
        let mut ruler = Ruler::new(PageBounds::new(800, 600));
        let (_tx, page_rx) = crossbeam_channel::unbounded();
        let mut guides = Guides::new(PageBounds::new(800, 600), ruler.subscribe(), page_rx);

        assert_eq!(
            guides.set_visible(false, true),
            Some(Request::SetGuides { visible: false })
        );
        ruler.set_rect(Rect::new(10, 10, 20, 20));
        guides.sync();
        assert!(!guides.layout().shown);

        assert_eq!(guides.set_visible(true, false), None);
        assert!(guides.layout().shown);
    }

    #[test]
    fn test_enabling_without_a_ruler_keeps_guides_hidden() {
        let mut ruler = Ruler::new(PageBounds::new(800, 600));
        let (_tx, page_rx) = crossbeam_channel::unbounded();
        let mut guides = Guides::new(PageBounds::new(800, 600), ruler.subscribe(), page_rx);

        guides.set_visible(false, false);
        guides.set_visible(true, false);
        assert!(!guides.layout().shown);

        ruler.set_rect(Rect::new(10, 10, 20, 20));
        guides.sync();
        assert!(guides.layout().shown);
    }
}
