//! Configuration persistence for ruler settings

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Toolbar dock position on the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockPosition {
    #[default]
    Top,
    Bottom,
}

impl DockPosition {
    /// The other dock position
    pub fn flipped(self) -> Self {
        match self {
            DockPosition::Top => DockPosition::Bottom,
            DockPosition::Bottom => DockPosition::Top,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DockPosition::Top => "top",
            DockPosition::Bottom => "bottom",
        }
    }
}

impl FromStr for DockPosition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(DockPosition::Top),
            "bottom" => Ok(DockPosition::Bottom),
            other => anyhow::bail!("invalid dock position: {other}"),
        }
    }
}

/// Ruler border colour, stored as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for RulerColor {
    fn default() -> Self {
        // Light blue
        Self {
            r: 0x33,
            g: 0xb5,
            b: 0xe5,
        }
    }
}

impl fmt::Display for RulerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for RulerColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .with_context(|| format!("colour {s:?} must start with '#'"))?;
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("colour {s:?} must be #rrggbb");
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).with_context(|| format!("bad hex in {s:?}"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl Serialize for RulerColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RulerColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Settings persisted between activations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerConfig {
    /// Where the toolbar is docked
    pub dock_position: DockPosition,
    /// Whether guides are drawn from the ruler corners
    pub guides_visible: bool,
    /// Ruler and guide colour
    pub color: RulerColor,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            dock_position: DockPosition::Top,
            guides_visible: true,
            color: RulerColor::default(),
        }
    }
}

impl RulerConfig {
    /// Directory name under the user config dir
    pub const ID: &'static str = "pageruler";

    /// Default location of the settings file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("settings.json"))
    }

    /// Load configuration from `path`, or return defaults if unavailable
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                if path.exists() {
                    log::warn!("Error loading config, using defaults: {:?}", err);
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                }
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Save configuration, logging instead of failing
    pub fn save(&self, path: &Path) {
        if let Err(err) = self.save_to(path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }
}
