//! Portal configuration
//!
//! A small TOML bootstrap file tunes the list screens and logging. Every field
//! has a compiled default, so an absent file is a normal, zero-config start.
//!
//! **Priority order for locating the file:**
//! 1. Path given on the command line
//! 2. `FOP_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/fieldops/config.toml` on Linux)
//! 4. Compiled defaults (no file)
//!
//! ```toml
//! max_items = 40
//!
//! [logging]
//! level = "debug"
//!
//! [screens.review-queue]
//! total_scope = "partitioned"
//! max_items = 100
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::bus::VIEW_STATE_SLOT_KEY;
use crate::classify::CategoryLabel;
use crate::pipeline::{ListPipeline, TotalScope, DEFAULT_MAX_ITEMS};
use crate::screens::Screen;
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "FOP_CONFIG";

/// Top-level portal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Display cap applied to every screen without an override
    pub max_items: usize,

    pub logging: LoggingConfig,

    pub bus: BusConfig,

    /// Per-screen overrides keyed by screen name ("review-queue", ...)
    pub screens: HashMap<String, ScreenOverrides>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            logging: LoggingConfig::default(),
            bus: BusConfig::default(),
            screens: HashMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// View-state bus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Slot key; the change notification name is derived from it
    pub slot_key: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            slot_key: VIEW_STATE_SLOT_KEY.to_string(),
        }
    }
}

/// Overrides for a single screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenOverrides {
    pub max_items: Option<usize>,
    pub total_scope: Option<TotalScope>,
}

impl PortalConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PortalConfig =
            toml::from_str(text).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_items == 0 {
            return Err(Error::Config("max_items must be at least 1".to_string()));
        }
        let mut seen: HashMap<Screen, &str> = HashMap::new();
        for (name, overrides) in &self.screens {
            let screen: Screen = name
                .parse()
                .map_err(|_| Error::Config(format!("Unknown screen in [screens]: {}", name)))?;
            if let Some(first) = seen.insert(screen, name) {
                return Err(Error::Config(format!(
                    "[screens] names {} twice ('{}' and '{}')",
                    screen, first, name
                )));
            }
            if overrides.max_items == Some(0) {
                return Err(Error::Config(format!(
                    "screens.{}.max_items must be at least 1",
                    screen
                )));
            }
        }
        if self.bus.slot_key.trim().is_empty() {
            return Err(Error::Config("bus.slot_key must not be empty".to_string()));
        }
        Ok(())
    }

    fn overrides(&self, screen: Screen) -> Option<&ScreenOverrides> {
        self.screens
            .iter()
            .find(|(name, _)| name.parse::<Screen>().ok() == Some(screen))
            .map(|(_, overrides)| overrides)
    }

    /// Display cap for `screen`
    pub fn max_items_for(&self, screen: Screen) -> usize {
        self.overrides(screen)
            .and_then(|o| o.max_items)
            .unwrap_or(self.max_items)
    }

    /// Configured counting scope for `screen`, if overridden
    pub fn total_scope_for(&self, screen: Screen) -> Option<TotalScope> {
        self.overrides(screen).and_then(|o| o.total_scope)
    }

    /// Apply this configuration to a screen's preset pipeline
    pub fn tune<L: CategoryLabel>(
        &self,
        screen: Screen,
        pipeline: ListPipeline<L>,
    ) -> ListPipeline<L> {
        let pipeline = pipeline.max_items(self.max_items_for(screen));
        match self.total_scope_for(screen) {
            Some(scope) => pipeline.total_scope(scope),
            None => pipeline,
        }
    }
}

/// Locates and loads the portal configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<&Path>) -> Self {
        Self {
            cli_path: cli_path.map(Path::to_path_buf),
        }
    }

    /// Path to read, following the priority order; `None` means defaults only
    pub fn config_path(&self) -> Option<PathBuf> {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        // Priority 2: Environment variable
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(path));
        }

        // Priority 3: Platform config directory
        default_config_path()
    }

    /// Load the configuration
    ///
    /// A missing file falls back to defaults with a warning. A file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(&self) -> Result<PortalConfig> {
        match self.config_path() {
            Some(path) => load_from_path(&path),
            None => {
                info!("No config directory available, using defaults");
                Ok(PortalConfig::default())
            }
        }
    }
}

/// `<config_dir>/fieldops/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fieldops").join("config.toml"))
}

/// Load from a specific path with graceful degradation for a missing file
pub fn load_from_path(path: &Path) -> Result<PortalConfig> {
    if !path.exists() {
        warn!("Config file not found at {}, using defaults", path.display());
        return Ok(PortalConfig::default());
    }

    let text = std::fs::read_to_string(path)?;
    let config = PortalConfig::from_toml_str(&text)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
