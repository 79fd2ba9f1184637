//! Settings host: owns the persisted configuration and answers requests

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::mpsc;

use super::messages::{Envelope, Request, Response};
use crate::config::RulerConfig;

/// Analytics events kept in memory
const TRACKED_EVENT_LIMIT: usize = 100;

/// Requests the host forwards to whoever embeds the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// The close button was pressed
    Disable,
    /// The help button was pressed
    OpenHelp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent {
    pub at: DateTime<Local>,
    pub category: String,
    pub action: String,
    pub label: String,
}

pub struct SettingsHost {
    config: RulerConfig,
    /// `None` keeps the configuration in memory only
    path: Option<PathBuf>,
    tracked: VecDeque<TrackedEvent>,
    notices: Option<mpsc::UnboundedSender<Notice>>,
}

impl SettingsHost {
    /// Host backed by the settings file at `path`
    pub fn load(path: PathBuf) -> Self {
        let config = RulerConfig::load_from(&path);
        Self {
            config,
            path: Some(path),
            tracked: VecDeque::new(),
            notices: None,
        }
    }

    /// Host that never touches the disk
    pub fn in_memory(config: RulerConfig) -> Self {
        Self {
            config,
            path: None,
            tracked: VecDeque::new(),
            notices: None,
        }
    }

    /// Forward close/help requests to `tx`
    pub fn with_notices(mut self, tx: mpsc::UnboundedSender<Notice>) -> Self {
        self.notices = Some(tx);
        self
    }

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    pub fn tracked(&self) -> impl Iterator<Item = &TrackedEvent> {
        self.tracked.iter()
    }

    /// Serve requests until every client is dropped
    pub async fn run(mut self, mut rx: mpsc::Receiver<Envelope>) -> Self {
        while let Some(envelope) = rx.recv().await {
            let response = self.handle(envelope.request);
            if let Some(reply) = envelope.reply {
                // The overlay may have been torn down while we worked
                if reply.send(response).is_err() {
                    log::debug!("Settings reply receiver went away");
                }
            }
        }
        log::debug!("Settings host stopped");
        self
    }

    /// Apply one request to the store
    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::GetDockPosition => Response::DockPosition(self.config.dock_position),
            Request::GetGuides => Response::Guides(self.config.guides_visible),
            Request::GetColor => Response::Color(self.config.color),
            Request::SetDockPosition { position } => {
                log::debug!("Dock position set to {}", position.as_str());
                self.config.dock_position = position;
                self.persist();
                Response::Ack
            }
            Request::SetGuides { visible } => {
                log::debug!("Guides visible: {visible}");
                self.config.guides_visible = visible;
                self.persist();
                Response::Ack
            }
            Request::SetColor { color } => {
                log::debug!("Ruler colour set to {color}");
                self.config.color = color;
                self.persist();
                Response::Ack
            }
            Request::TrackEvent {
                args: (category, action, label),
            } => {
                log::info!("Tracked event: {category} / {action} / {label}");
                if self.tracked.len() == TRACKED_EVENT_LIMIT {
                    self.tracked.pop_front();
                }
                self.tracked.push_back(TrackedEvent {
                    at: Local::now(),
                    category,
                    action,
                    label,
                });
                Response::Ack
            }
            Request::OpenHelp => {
                self.notify(Notice::OpenHelp);
                Response::Ack
            }
            Request::Disable => {
                self.notify(Notice::Disable);
                Response::Ack
            }
        }
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            self.config.save(path);
        }
    }

    fn notify(&self, notice: Notice) {
        match &self.notices {
            Some(tx) => {
                if tx.send(notice).is_err() {
                    log::warn!("Nobody is listening for {:?}", notice);
                }
            }
            None => log::debug!("Dropping {:?}, no notice listener", notice),
        }
    }
}
