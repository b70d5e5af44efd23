use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::catalog::PageSize;

const APP_DIR: &str = "catalog-browser";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub browse: BrowseConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Ticks a liked/disliked row stays highlighted.
    pub pulse_ticks: u16,
}

/// Data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
    /// JSON catalog to browse. The built-in sample catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Save selection and likes/dislikes between runs.
    pub persist_state: bool,
}

/// Browsing defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Initial page size; one of 4, 8, 12 or 16.
    pub items_per_page: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            pulse_ticks: 6,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog_path: None,
            persist_state: true,
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            items_per_page: PageSize::default().get(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/catalog-browser/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Configured page size, falling back to the default for values outside
    /// the offered options.
    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.browse.items_per_page).unwrap_or_else(|e| {
            log::warn!("{e}; using {}", PageSize::default());
            PageSize::default()
        })
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Where UI state is persisted, if persistence is enabled.
    pub fn state_path(&self) -> Option<PathBuf> {
        self.data
            .persist_state
            .then(|| self.data_dir().join("ui_state.json"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
