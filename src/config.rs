use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::host::HostOptions;
use crate::store::ConfigSnapshot;

/// Main cellhost settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: LogLevel,
    pub host: HostSettings,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Construction inputs for the host, as read from the settings file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HostSettings {
    /// Cell type to start on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_selection: Option<String>,
    /// Starting cell config; the built-in seed is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_config: Option<IndexMap<String, Value>>,
    /// Other cells shown to the active cell
    pub peers: Vec<String>,
    /// Data of the other cells
    pub peer_index: IndexMap<String, Value>,
}

impl HostSettings {
    pub fn to_options(&self) -> HostOptions {
        HostOptions {
            initial_selection: self.initial_selection.clone(),
            initial_config: self.initial_config.clone().map(ConfigSnapshot::new),
            peers: self.peers.clone(),
            peer_index: self.peer_index.clone(),
        }
    }
}

impl Settings {
    /// Load settings with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let path = Self::expand_path(path);
            return Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check CELLHOST_CONFIG env var
        if let Ok(env_path) = std::env::var("CELLHOST_CONFIG") {
            let path = Self::expand_path(Path::new(&env_path));
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(settings) => return Ok(settings),
                    Err(e) => {
                        log::warn!("Failed to load config from CELLHOST_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try CELLHOST_DIR/cellhost.yaml, then ~/.config/cellhost/cellhost.yaml
        let dir_env = std::env::var("CELLHOST_DIR").ok();
        for path in Self::candidate_paths(dir_env.as_deref(), dirs::config_dir()) {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(settings) => return Ok(settings),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }

        // Try ./cellhost.yaml (for development)
        let local_config = PathBuf::from("cellhost.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(settings) => return Ok(settings),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Settings files to try, in order: `$CELLHOST_DIR`, then the user config dir
    fn candidate_paths(dir_env: Option<&str>, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dir_env {
            paths.push(Self::expand_path(Path::new(dir)).join("cellhost.yaml"));
        }
        if let Some(dir) = config_dir {
            paths.push(dir.join("cellhost").join("cellhost.yaml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let settings: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(settings)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
