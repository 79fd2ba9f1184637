//! Toolbar: dock position, pixel readouts/inputs, colour and guide toggles

use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

use crate::config::{DockPosition, RulerColor};
use crate::domain::{Geometry, Rect};
use crate::fl;
use crate::input::Key;
use crate::settings::Request;
use crate::sync;

/// Height of the docked toolbar in pixels
pub const TOOLBAR_HEIGHT: i32 = 30;

/// Height of the element toolbar shown below the main one in element mode
pub const ELEMENT_TOOLBAR_HEIGHT: i32 = 30;

/// Step applied by shift+up/down inside a pixel input
const INPUT_SHIFT_STEP: i32 = 10;

/// How the page is pushed out of the toolbar's way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "px", rename_all = "snake_case")]
pub enum PageShift {
    None,
    /// Toolbar docked on top: translate the page down
    TranslateY(i32),
    /// Toolbar docked at the bottom: add a bottom margin
    MarginBottom(i32),
}

/// Numeric toolbar fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Width,
    Height,
    Left,
    Top,
    Right,
    Bottom,
}

impl Field {
    /// Display order on the toolbar
    pub const ALL: [Field; 6] = [
        Field::Width,
        Field::Height,
        Field::Left,
        Field::Top,
        Field::Right,
        Field::Bottom,
    ];

    pub fn label(self) -> String {
        match self {
            Field::Width => fl!("toolbar-width"),
            Field::Height => fl!("toolbar-height"),
            Field::Left => fl!("toolbar-left"),
            Field::Top => fl!("toolbar-top"),
            Field::Right => fl!("toolbar-right"),
            Field::Bottom => fl!("toolbar-bottom"),
        }
    }

    /// Analytics label, independent of the UI language
    pub fn track_label(self) -> &'static str {
        match self {
            Field::Width => "Width",
            Field::Height => "Height",
            Field::Left => "Left",
            Field::Top => "Top",
            Field::Right => "Right",
            Field::Bottom => "Bottom",
        }
    }

    /// Current value of this field for `rect`
    pub fn read(self, rect: Rect) -> i32 {
        match self {
            Field::Width => rect.width(),
            Field::Height => rect.height(),
            Field::Left => rect.left,
            Field::Top => rect.top,
            Field::Right => rect.right,
            Field::Bottom => rect.bottom,
        }
    }
}

/// Toolbar interactions reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ToolbarEvent {
    Focus {
        field: Field,
    },
    Blur {
        field: Field,
    },
    /// The text in a pixel input changed without being committed
    Input {
        field: Field,
        value: String,
    },
    KeyDown {
        field: Field,
        key: Key,
        #[serde(default)]
        shift: bool,
    },
    /// The input lost focus with a new value, or the host committed it
    Change {
        field: Field,
    },
    Color {
        value: String,
    },
    Guides {
        visible: bool,
    },
    Dock,
    /// Toggle inspecting page elements
    ElementMode,
    Close,
    Help,
}

/// What the overlay must do in response to a toolbar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Apply a committed field value to the ruler
    SetField { field: Field, value: i32 },
    /// Enable or disable arrow-key nudging
    KeyMoving(bool),
    SetColor(RulerColor),
    SetGuides(bool),
    /// Forward straight to the settings host
    Send(Request),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PixelInput {
    field: Field,
    text: String,
    focused: bool,
}

impl PixelInput {
    fn new(field: Field) -> Self {
        Self {
            field,
            text: "0".to_string(),
            focused: false,
        }
    }

    /// Leading integer of the text, so `12px` reads as 12
    fn value(&self) -> Option<i32> {
        let text = self.text.trim_start();
        let end = text
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && matches!(c, '-' | '+'))))
            .map_or(text.len(), |(i, _)| i);
        text[..end].parse().ok()
    }
}

/// One pixel input as the host renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputView {
    pub field: Field,
    pub label: String,
    pub value: String,
}

/// Toolbar state as the host renders it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarView {
    pub dock: DockPosition,
    pub dock_title: String,
    pub page_shift: PageShift,
    pub inputs: Vec<InputView>,
    pub color: String,
    pub guides_checked: bool,
    pub element_mode: bool,
    pub element_mode_label: String,
}

pub struct Toolbar {
    position: DockPosition,
    height: i32,
    shifted: bool,
    element_mode: bool,
    inputs: Vec<PixelInput>,
    color: RulerColor,
    guides_checked: bool,
    geometry_rx: Receiver<Geometry>,
}

impl Toolbar {
    pub fn new(geometry_rx: Receiver<Geometry>) -> Self {
        Self {
            position: DockPosition::Top,
            height: TOOLBAR_HEIGHT,
            shifted: false,
            element_mode: false,
            inputs: Field::ALL.into_iter().map(PixelInput::new).collect(),
            color: RulerColor::default(),
            guides_checked: true,
            geometry_rx,
        }
    }

    /// Mirror the latest ruler geometry into the readouts
    pub fn sync(&mut self) -> bool {
        match sync::latest(&self.geometry_rx) {
            Some(geometry) => {
                self.set_readouts(geometry.rect);
                true
            }
            None => false,
        }
    }

    /// Overwrite every readout the user isn't editing
    pub fn set_readouts(&mut self, rect: Rect) {
        for input in self.inputs.iter_mut().filter(|input| !input.focused) {
            input.text = input.field.read(rect).to_string();
        }
    }

    /// Move the toolbar; returns the request that saves it when asked to
    pub fn set_dock_position(&mut self, position: DockPosition, save: bool) -> Option<Request> {
        self.position = position;
        self.shift_page();
        save.then_some(Request::SetDockPosition { position })
    }

    pub fn shift_page(&mut self) {
        self.shifted = true;
    }

    /// Put the page back where it was
    pub fn unshift_page(&mut self) {
        self.shifted = false;
    }

    pub fn page_shift(&self) -> PageShift {
        if !self.shifted {
            return PageShift::None;
        }
        let mut height = self.height;
        if self.element_mode {
            height += ELEMENT_TOOLBAR_HEIGHT;
        }
        match self.position {
            DockPosition::Top => PageShift::TranslateY(height),
            DockPosition::Bottom => PageShift::MarginBottom(height),
        }
    }

    /// Show or hide the element toolbar
    pub fn set_element_mode(&mut self, enabled: bool) {
        self.element_mode = enabled;
        log::debug!("Element mode {}", if enabled { "on" } else { "off" });
    }

    /// The toggle's label offers the opposite of the current mode
    pub fn element_mode_label(&self) -> String {
        if self.element_mode {
            fl!("toolbar-element-mode-disable")
        } else {
            fl!("toolbar-element-mode-enable")
        }
    }

    pub fn set_color(&mut self, color: RulerColor) {
        self.color = color;
    }

    pub fn set_guides_checked(&mut self, checked: bool) {
        self.guides_checked = checked;
    }

    /// Title of the dock button names where it will move the toolbar
    pub fn dock_title(&self) -> String {
        match self.position.flipped() {
            DockPosition::Top => fl!("toolbar-dock-top"),
            DockPosition::Bottom => fl!("toolbar-dock-bottom"),
        }
    }

    pub fn handle(&mut self, event: ToolbarEvent) -> Vec<ToolbarAction> {
        match event {
            ToolbarEvent::Focus { field } => {
                self.input_mut(field).focused = true;
                vec![ToolbarAction::KeyMoving(false)]
            }
            ToolbarEvent::Blur { field } => {
                self.input_mut(field).focused = false;
                vec![ToolbarAction::KeyMoving(true)]
            }
            ToolbarEvent::Input { field, value } => {
                self.input_mut(field).text = value;
                Vec::new()
            }
            ToolbarEvent::KeyDown { field, key, shift } => match key {
                Key::ArrowUp | Key::ArrowDown if shift => {
                    let delta = if key == Key::ArrowUp {
                        INPUT_SHIFT_STEP
                    } else {
                        -INPUT_SHIFT_STEP
                    };
                    let input = self.input_mut(field);
                    if let Some(value) = input.value() {
                        input.text = value.saturating_add(delta).to_string();
                    }
                    self.commit(field)
                }
                Key::Enter => self.commit(field),
                _ => Vec::new(),
            },
            ToolbarEvent::Change { field } => self.commit(field),
            ToolbarEvent::Color { value } => match value.parse::<RulerColor>() {
                Ok(color) => {
                    self.color = color;
                    vec![ToolbarAction::SetColor(color)]
                }
                Err(err) => {
                    log::debug!("Ignoring colour input: {err}");
                    Vec::new()
                }
            },
            ToolbarEvent::Guides { visible } => {
                self.guides_checked = visible;
                vec![ToolbarAction::SetGuides(visible)]
            }
            ToolbarEvent::Dock => {
                let request = self.set_dock_position(self.position.flipped(), true);
                request.map(ToolbarAction::Send).into_iter().collect()
            }
            ToolbarEvent::ElementMode => {
                self.set_element_mode(!self.element_mode);
                Vec::new()
            }
            ToolbarEvent::Close => vec![ToolbarAction::Send(Request::Disable)],
            ToolbarEvent::Help => vec![ToolbarAction::Send(Request::OpenHelp)],
        }
    }

    fn commit(&mut self, field: Field) -> Vec<ToolbarAction> {
        match self.input_mut(field).value() {
            Some(value) => vec![
                ToolbarAction::SetField { field, value },
                ToolbarAction::Send(Request::track(
                    "Action",
                    "Ruler Change",
                    field.track_label(),
                )),
            ],
            None => {
                log::debug!("Ignoring non-numeric {:?} input", field);
                Vec::new()
            }
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut PixelInput {
        let index = Field::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default();
        &mut self.inputs[index]
    }

    pub fn view(&self) -> ToolbarView {
        ToolbarView {
            dock: self.position,
            dock_title: self.dock_title(),
            page_shift: self.page_shift(),
            inputs: self
                .inputs
                .iter()
                .map(|input| InputView {
                    field: input.field,
                    label: input.field.label(),
                    value: input.text.clone(),
                })
                .collect(),
            color: self.color.to_string(),
            guides_checked: self.guides_checked,
            element_mode: self.element_mode,
            element_mode_label: self.element_mode_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolbar() -> (Toolbar, crossbeam_channel::Sender<Geometry>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Toolbar::new(rx), tx)
    }

    fn value_of(toolbar: &Toolbar, field: Field) -> String {
        toolbar
            .view()
            .inputs
            .into_iter()
            .find(|input| input.field == field)
            .map(|input| input.value)
            .unwrap()
    }

    #[test]
    fn test_readouts_follow_geometry() {
        let (mut toolbar, tx) = toolbar();
        tx.send(Geometry {
            rect: Rect::new(10, 20, 110, 70),
            ..Default::default()
        })
        .unwrap();

        assert!(toolbar.sync());
        assert_eq!(value_of(&toolbar, Field::Width), "100");
        assert_eq!(value_of(&toolbar, Field::Height), "50");
        assert_eq!(value_of(&toolbar, Field::Right), "110");
    }

    #[test]
    fn test_focused_input_keeps_user_text() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.handle(ToolbarEvent::Focus { field: Field::Left });
        toolbar.handle(ToolbarEvent::Input {
            field: Field::Left,
            value: "4".to_string(),
        });
        toolbar.set_readouts(Rect::new(9, 9, 19, 19));
        assert_eq!(value_of(&toolbar, Field::Left), "4");
        assert_eq!(value_of(&toolbar, Field::Top), "9");
    }

    #[test]
    fn test_focus_toggles_key_moving() {
        let (mut toolbar, _tx) = toolbar();
        assert_eq!(
            toolbar.handle(ToolbarEvent::Focus { field: Field::Width }),
            vec![ToolbarAction::KeyMoving(false)]
        );
        assert_eq!(
            toolbar.handle(ToolbarEvent::Blur { field: Field::Width }),
            vec![ToolbarAction::KeyMoving(true)]
        );
    }

    #[test]
    fn test_shift_arrow_steps_and_commits() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.handle(ToolbarEvent::Input {
            field: Field::Height,
            value: "25".to_string(),
        });
        let actions = toolbar.handle(ToolbarEvent::KeyDown {
            field: Field::Height,
            key: Key::ArrowDown,
            shift: true,
        });
        assert_eq!(
            actions,
            vec![
                ToolbarAction::SetField {
                    field: Field::Height,
                    value: 15
                },
                ToolbarAction::Send(Request::track("Action", "Ruler Change", "Height")),
            ]
        );

        // Without shift the host's native spinner handles the key
        assert!(toolbar
            .handle(ToolbarEvent::KeyDown {
                field: Field::Height,
                key: Key::ArrowDown,
                shift: false,
            })
            .is_empty());
    }

    #[test]
    fn test_non_numeric_input_is_ignored() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.handle(ToolbarEvent::Input {
            field: Field::Top,
            value: "abc".to_string(),
        });
        assert!(toolbar.handle(ToolbarEvent::Change { field: Field::Top }).is_empty());
        assert!(toolbar
            .handle(ToolbarEvent::KeyDown {
                field: Field::Top,
                key: Key::Enter,
                shift: false,
            })
            .is_empty());
    }

    #[test]
    fn test_dock_toggle_shifts_page_and_saves() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.set_dock_position(DockPosition::Top, false);
        assert_eq!(toolbar.page_shift(), PageShift::TranslateY(TOOLBAR_HEIGHT));
        assert_eq!(toolbar.dock_title(), "Dock to bottom");

        let actions = toolbar.handle(ToolbarEvent::Dock);
        assert_eq!(
            actions,
            vec![ToolbarAction::Send(Request::SetDockPosition {
                position: DockPosition::Bottom
            })]
        );
        assert_eq!(toolbar.page_shift(), PageShift::MarginBottom(TOOLBAR_HEIGHT));
        assert_eq!(toolbar.dock_title(), "Dock to top");

        toolbar.unshift_page();
        assert_eq!(toolbar.page_shift(), PageShift::None);
    }

    #[test]
    fn test_color_input() {
        let (mut toolbar, _tx) = toolbar();
        assert_eq!(
            toolbar.handle(ToolbarEvent::Color {
                value: "#00ff00".to_string()
            }),
            vec![ToolbarAction::SetColor(RulerColor { r: 0, g: 255, b: 0 })]
        );
        assert!(toolbar
            .handle(ToolbarEvent::Color {
                value: "green".to_string()
            })
            .is_empty());
        assert_eq!(toolbar.view().color, "#00ff00");
    }

    #[test]
    fn test_close_and_help_go_to_host() {
        let (mut toolbar, _tx) = toolbar();
        assert_eq!(
            toolbar.handle(ToolbarEvent::Close),
            vec![ToolbarAction::Send(Request::Disable)]
        );
        assert_eq!(
            toolbar.handle(ToolbarEvent::Help),
            vec![ToolbarAction::Send(Request::OpenHelp)]
        );
    }

    #[test]
    fn test_shift_arrow_saturates_at_integer_limits() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.handle(ToolbarEvent::Input {
            field: Field::Width,
            value: i32::MAX.to_string(),
        });
        let actions = toolbar.handle(ToolbarEvent::KeyDown {
            field: Field::Width,
            key: Key::ArrowUp,
            shift: true,
        });
        assert_eq!(
            actions[0],
            ToolbarAction::SetField {
                field: Field::Width,
                value: i32::MAX
            }
        );
        assert_eq!(value_of(&toolbar, Field::Width), i32::MAX.to_string());
    }

    #[test]
    fn test_inputs_read_leading_integer() {
        let (mut toolbar, _tx) = toolbar();
        for (text, expected) in [("12px", Some(12)), (" -4 ", Some(-4)), ("+7", Some(7))] {
            toolbar.handle(ToolbarEvent::Input {
                field: Field::Left,
                value: text.to_string(),
            });
            assert_eq!(toolbar.input_mut(Field::Left).value(), expected, "{text}");
        }
        for text in ["px12", "-", ""] {
            toolbar.handle(ToolbarEvent::Input {
                field: Field::Left,
                value: text.to_string(),
            });
            assert_eq!(toolbar.input_mut(Field::Left).value(), None, "{text}");
        }
    }

    #[test]
    fn test_element_mode_grows_page_shift() {
        let (mut toolbar, _tx) = toolbar();
        toolbar.shift_page();
        assert_eq!(toolbar.view().element_mode_label, "Enable element mode");

        assert!(toolbar.handle(ToolbarEvent::ElementMode).is_empty());
        let view = toolbar.view();
        assert!(view.element_mode);
        assert_eq!(view.element_mode_label, "Disable element mode");
        assert_eq!(
            view.page_shift,
            PageShift::TranslateY(TOOLBAR_HEIGHT + ELEMENT_TOOLBAR_HEIGHT)
        );

        toolbar.set_dock_position(DockPosition::Bottom, false);
        assert_eq!(
            toolbar.page_shift(),
            PageShift::MarginBottom(TOOLBAR_HEIGHT + ELEMENT_TOOLBAR_HEIGHT)
        );

        toolbar.handle(ToolbarEvent::ElementMode);
        assert_eq!(toolbar.page_shift(), PageShift::MarginBottom(TOOLBAR_HEIGHT));
    }

    #[test]
    fn test_labels_are_localized() {
        let (toolbar, _tx) = toolbar();
        let view = toolbar.view();
        assert_eq!(view.inputs[0].label, "Width");
        assert_eq!(view.inputs.len(), Field::ALL.len());
    }
}
