//! Message types exchanged with the settings host

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::config::{DockPosition, RulerColor};

/// Requests understood by the settings host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetDockPosition,
    SetDockPosition { position: DockPosition },
    GetGuides,
    SetGuides { visible: bool },
    GetColor,
    SetColor { color: RulerColor },
    /// Analytics event: category, action, label
    TrackEvent { args: (String, String, String) },
    OpenHelp,
    Disable,
}

impl Request {
    /// Convenience constructor for analytics events
    pub fn track(category: &str, action: &str, label: &str) -> Self {
        Request::TrackEvent {
            args: (category.to_string(), action.to_string(), label.to_string()),
        }
    }
}

/// Replies sent back by the settings host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    DockPosition(DockPosition),
    Guides(bool),
    Color(RulerColor),
    Ack,
}

/// A request plus the channel its reply should go to
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    pub reply: Option<oneshot::Sender<Response>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_event_wire_format() {
        let json =
            serde_json::to_string(&Request::track("Action", "Ruler Change", "Width")).unwrap();
        assert_eq!(
            json,
            r#"{"action":"trackEvent","args":["Action","Ruler Change","Width"]}"#
        );
    }

    #[test]
    fn test_set_dock_position_wire_format() {
        let request: Request =
            serde_json::from_str(r#"{"action":"setDockPosition","position":"bottom"}"#).unwrap();
        assert_eq!(
            request,
            Request::SetDockPosition {
                position: DockPosition::Bottom
            }
        );
    }
}
