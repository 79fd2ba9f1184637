//! The overlay controller
//!
//! Owns every piece of ruler state for one page: the ruler, its guides, the
//! toolbar, the current drag and replies still expected from the settings
//! host. Input handlers get it by `&mut` instead of reaching for globals.

use serde::Serialize;

use crate::config::RulerColor;
use crate::dimensions::Dimensions;
use crate::domain::{Geometry, PageBounds, Point};
use crate::input::keyboard::handle_key_event;
use crate::input::{InputEvent, Key};
use crate::ruler::{DragSession, Ruler};
use crate::settings::{PendingReply, ReplyState, Request, Response, SettingsClient};
use crate::widget::guides::{GuideLayout, Guides};
use crate::widget::toolbar::{Field, PageShift, Toolbar, ToolbarAction, ToolbarView};

/// Elements that only exist while the overlay is active
struct Elements {
    ruler: Ruler,
    guides: Guides,
    toolbar: Toolbar,
}

/// Everything the host needs to draw the overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub active: bool,
    pub key_moving: bool,
    pub dragging: Option<String>,
    pub geometry: Option<Geometry>,
    pub guides: Option<GuideLayout>,
    pub toolbar: Option<ToolbarView>,
    pub color: String,
}

pub struct Overlay {
    settings: SettingsClient,
    dimensions: Dimensions,
    elements: Option<Elements>,
    session: Option<DragSession>,
    /// Arrow keys nudge the ruler unless a toolbar input has focus
    key_moving: bool,
    color: RulerColor,
    pending: Vec<PendingReply>,
}

impl Overlay {
    pub fn new(settings: SettingsClient, page: PageBounds) -> Self {
        Self {
            settings,
            dimensions: Dimensions::new(page),
            elements: None,
            session: None,
            key_moving: false,
            color: RulerColor::default(),
            pending: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.elements.is_some()
    }

    /// Create the ruler, guides and toolbar and ask for stored settings
    pub fn enable(&mut self) {
        if self.is_active() {
            return;
        }

        let page = self.dimensions.bounds();
        let mut ruler = Ruler::new(page).with_page_updates(self.dimensions.add_update_callback());
        let guides = Guides::new(
            page,
            ruler.subscribe(),
            self.dimensions.add_update_callback(),
        );
        let mut toolbar = Toolbar::new(ruler.subscribe());
        toolbar.set_color(self.color);
        toolbar.shift_page();

        self.elements = Some(Elements {
            ruler,
            guides,
            toolbar,
        });

        for request in [Request::GetDockPosition, Request::GetGuides, Request::GetColor] {
            if let Some(pending) = self.settings.request(request) {
                self.pending.push(pending);
            }
        }

        self.key_moving = true;
        log::info!("Ruler enabled on {}x{} page", page.width, page.height);
    }

    /// Tear everything down and put the page back
    pub fn disable(&mut self) {
        let Some(mut elements) = self.elements.take() else {
            return;
        };
        elements.toolbar.unshift_page();
        self.session = None;
        self.dimensions.remove_update_callbacks();
        self.pending.clear();
        self.key_moving = false;
        log::info!("Ruler disabled");
    }

    /// Dispatch one input event; returns whether the overlay consumed it
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PageResize { width, height } => {
                self.dimensions.update(width, height);
                if let Some(elements) = self.elements.as_mut() {
                    elements.ruler.sync_page();
                }
                return true;
            }
            InputEvent::PageOffset { x, y } => {
                self.dimensions.set_offset(Point::new(x, y));
                return true;
            }
            _ => {}
        }

        let page_point = event.pointer().map(|point| self.page_point(point));
        let Some(elements) = self.elements.as_mut() else {
            return false;
        };

        match event {
            InputEvent::Key { key, modifiers } => {
                if key == Key::Escape && self.session.take().is_some() {
                    return true;
                }
                if !self.key_moving {
                    return false;
                }
                match handle_key_event(key, modifiers) {
                    Some(nudge) => {
                        elements.ruler.apply_nudge(nudge);
                        true
                    }
                    None => false,
                }
            }
            InputEvent::PointerDown { handle, .. } => {
                let Some(point) = page_point else {
                    return false;
                };
                let session = match handle {
                    Some(handle) => DragSession::resize(&elements.ruler, handle, point),
                    None => DragSession::begin(&elements.ruler, point),
                };
                log::trace!("Drag started: {:?}", session);
                self.session = Some(session);
                true
            }
            InputEvent::PointerMove { .. } => match (self.session, page_point) {
                (Some(session), Some(point)) => {
                    session.update(&mut elements.ruler, point);
                    true
                }
                _ => false,
            },
            InputEvent::PointerUp { .. } => self.session.take().is_some(),
            InputEvent::Toolbar { event } => {
                let actions = elements.toolbar.handle(event);
                for action in actions {
                    self.apply(action);
                }
                true
            }
            InputEvent::PageResize { .. } | InputEvent::PageOffset { .. } => true,
        }
    }

    fn apply(&mut self, action: ToolbarAction) {
        let Some(elements) = self.elements.as_mut() else {
            return;
        };
        match action {
            ToolbarAction::SetField { field, value } => {
                let ruler = &mut elements.ruler;
                match field {
                    Field::Width => ruler.set_width(value),
                    Field::Height => ruler.set_height(value),
                    Field::Left => ruler.set_left(value),
                    Field::Top => ruler.set_top(value),
                    Field::Right => ruler.set_right(value),
                    Field::Bottom => ruler.set_bottom(value),
                };
            }
            ToolbarAction::KeyMoving(enabled) => self.key_moving = enabled,
            ToolbarAction::SetColor(color) => self.set_color(color, true),
            ToolbarAction::SetGuides(visible) => {
                if let Some(request) = elements.guides.set_visible(visible, true) {
                    self.settings.send(request);
                }
            }
            ToolbarAction::Send(request) => self.settings.send(request),
        }
    }

    /// Recolour the ruler, guides and toolbar
    pub fn set_color(&mut self, color: RulerColor, save: bool) {
        self.color = color;
        if let Some(elements) = self.elements.as_mut() {
            elements.guides.set_color(color);
            elements.toolbar.set_color(color);
        }
        if save {
            self.settings.send(Request::SetColor { color });
        }
    }

    /// Pointer positions arrive in viewport space; the page may be offset by
    /// its margins and pushed down by a top-docked toolbar
    fn page_point(&self, point: Point) -> Point {
        let point = self.dimensions.to_page(point);
        match self.elements.as_ref().map(|elements| elements.toolbar.page_shift()) {
            Some(PageShift::TranslateY(height)) => {
                Point::new(point.x, point.y.saturating_sub(height))
            }
            _ => point,
        }
    }

    /// Apply settled replies and broadcasts, then describe the overlay
    pub fn sync(&mut self) -> Frame {
        let mut settled = Vec::new();
        self.pending.retain_mut(|pending| match pending.poll() {
            ReplyState::Pending => true,
            ReplyState::Ready(response) => {
                settled.push(response);
                false
            }
            ReplyState::Lost => {
                log::warn!("No reply to {:?}", pending.request());
                false
            }
        });
        for response in settled {
            self.apply_response(response);
        }

        if let Some(elements) = self.elements.as_mut() {
            elements.ruler.sync_page();
            elements.guides.sync();
            elements.toolbar.sync();
        }

        self.frame()
    }

    fn apply_response(&mut self, response: Response) {
        match response {
            Response::Color(color) => self.set_color(color, false),
            Response::DockPosition(position) => {
                if let Some(elements) = self.elements.as_mut() {
                    elements.toolbar.set_dock_position(position, false);
                }
            }
            Response::Guides(visible) => {
                if let Some(elements) = self.elements.as_mut() {
                    elements.guides.set_visible(visible, false);
                    elements.toolbar.set_guides_checked(visible);
                }
            }
            Response::Ack => {}
        }
    }

    pub fn frame(&self) -> Frame {
        let dragging = self.session.map(|session| match session {
            DragSession::Resize { handle, .. } => handle.id().to_string(),
            DragSession::Move { .. } => "move".to_string(),
            DragSession::Draw { .. } => "draw".to_string(),
        });
        Frame {
            active: self.is_active(),
            key_moving: self.key_moving,
            dragging,
            geometry: self.elements.as_ref().map(|e| e.ruler.geometry()),
            guides: self.elements.as_ref().map(|e| e.guides.layout()),
            toolbar: self.elements.as_ref().map(|e| e.toolbar.view()),
            color: self.color.to_string(),
        }
    }
}
