//! Headless driver: input events in on stdin, frames out on stdout
//!
//! One JSON object per line in each direction. Besides the overlay's
//! [`InputEvent`]s the driver understands `{"type":"enable"}` and
//! `{"type":"disable"}`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::overlay::{Frame, Overlay};
use crate::config::RulerConfig;
use crate::domain::PageBounds;
use crate::input::InputEvent;
use crate::settings::{Notice, SettingsClient, SettingsHost};

/// Overrides where settings are stored
const CONFIG_ENV: &str = "PAGERULER_CONFIG";

/// One parsed stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Enable,
    Disable,
    Input(InputEvent),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(line).context("Invalid JSON")?;
        match value.get("type").and_then(|t| t.as_str()) {
            Some("enable") => Ok(Command::Enable),
            Some("disable") => Ok(Command::Disable),
            _ => serde_json::from_value(value)
                .map(Command::Input)
                .context("Unknown input event"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Output<'a> {
    Frame(&'a Frame),
    Notice(Notice),
}

fn settings_host() -> SettingsHost {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(RulerConfig::default_path);
    match path {
        Some(path) => {
            log::info!("Using settings at {}", path.display());
            SettingsHost::load(path)
        }
        None => {
            log::warn!("No config directory, settings will not persist");
            SettingsHost::in_memory(RulerConfig::default())
        }
    }
}

/// Apply a command; returns whether a frame should be emitted
pub fn apply(overlay: &mut Overlay, command: Command) -> bool {
    match command {
        Command::Enable => overlay.enable(),
        Command::Disable => overlay.disable(),
        Command::Input(event) => {
            if !overlay.handle(event) {
                return false;
            }
        }
    }
    true
}

async fn emit<W: AsyncWrite + Unpin>(out: &mut W, output: &Output<'_>) -> Result<()> {
    let mut line = serde_json::to_vec(output)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await.context("Failed to flush output")
}

pub async fn run() -> Result<()> {
    let (client, rx) = SettingsClient::channel();
    let (notice_tx, mut notice_rx) = mpsc::unbounded_channel();
    let host = tokio::spawn(settings_host().with_notices(notice_tx).run(rx));

    let mut overlay = Overlay::new(client, PageBounds::default());
    overlay.enable();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let changed = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(command) => apply(&mut overlay, command),
                    Err(err) => {
                        log::warn!("Skipping input line: {err:#}");
                        false
                    }
                }
            }
            Some(notice) = notice_rx.recv() => {
                if notice == Notice::Disable {
                    overlay.disable();
                }
                emit(&mut stdout, &Output::Notice(notice)).await?;
                true
            }
        };

        // Give the settings host a turn so its replies land in this frame
        tokio::task::yield_now().await;
        let frame = overlay.sync();
        if changed {
            emit(&mut stdout, &Output::Frame(&frame)).await?;
        }
    }

    drop(overlay);
    let host = host.await.context("Settings host panicked")?;
    log::debug!(
        "Exiting with dock position {} after {} tracked events",
        host.config().dock_position.as_str(),
        host.tracked().count()
    );
    Ok(())
}
