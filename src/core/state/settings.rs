use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const APP_DIR_NAME: &str = "ModInstaller";
const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_API_BASE: &str = "https://api.modrinth.com";

/// Settings that shape how the installer talks to the registry.
///
/// Read from `<config_dir>/ModInstaller/settings.json` when present. Missing
/// fields fall back to their defaults so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerSettings {
    pub api_base_url: String,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            user_agent: format!("ModInstaller/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
        }
    }
}

impl InstallerSettings {
    /// Load settings from an explicit file, or the default location when
    /// `explicit` is `None`. Any problem falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => match load_settings_from_disk(path) {
                Ok(Some(settings)) => settings,
                Ok(None) => {
                    warn!("Settings file {:?} does not exist, using defaults", path);
                    Self::default()
                }
                Err(reason) => {
                    warn!("Ignoring settings file {:?}: {}", path, reason);
                    Self::default()
                }
            },
            None => {
                let path = default_settings_path();
                match load_settings_from_disk(&path) {
                    Ok(Some(settings)) => settings,
                    Ok(None) => Self::default(),
                    Err(reason) => {
                        warn!("Ignoring settings file {:?}: {}", path, reason);
                        Self::default()
                    }
                }
            }
        }
    }

    pub fn with_api_base(mut self, api_base_url: Option<String>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

fn load_settings_from_disk(path: &Path) -> Result<Option<InstallerSettings>, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    debug!("Loaded settings from {:?}", path);
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| e.to_string())
}

fn default_base_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_settings_path() -> PathBuf {
    default_base_dir().join(APP_DIR_NAME).join(SETTINGS_FILE)
}
