//! Configuration loading for the launch dashboard.
//! Reads launchdash.toml from the current directory or the path in LAUNCHDASH_CONFIG.
//! LAUNCHDASH_BIND and LAUNCHDASH_DATA override the bind address and dataset path.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{DashError, Result};

pub const CONFIG_ENV: &str = "LAUNCHDASH_CONFIG";
pub const BIND_ENV: &str = "LAUNCHDASH_BIND";
pub const DATA_ENV: &str = "LAUNCHDASH_DATA";
pub const DEFAULT_CONFIG_FILE: &str = "launchdash.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// ── Server ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8052".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

// ── Data ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Launch records CSV, loaded once at startup
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_data_path() -> String { "spacex_launch_dash.csv".to_string() }

impl Default for DataConfig {
    fn default() -> Self {
        Self { path: default_data_path() }
    }
}

// ── Dashboard ─────────────────────────────────────────────────────────────────

/// What the scatter chart colors its points by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScatterColor {
    #[default]
    BoosterCategory,
    Outcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Payload range selector granularity (kg)
    #[serde(default = "default_slider_step")]
    pub slider_step: u32,

    /// Spacing of labelled marks on the payload range selector (kg)
    #[serde(default = "default_mark_interval")]
    pub mark_interval: u32,

    #[serde(default)]
    pub scatter_color: ScatterColor,
}

fn default_title()         -> String { "SpaceX Launch Records Dashboard".to_string() }
fn default_slider_step()   -> u32 { 100 }
fn default_mark_interval() -> u32 { 500 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            slider_step: default_slider_step(),
            mark_interval: default_mark_interval(),
            scatter_color: ScatterColor::default(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl DashConfig {
    /// Load configuration, falling back to defaults when no config file exists.
    /// Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut config = if Path::new(&path).exists() {
            info!("Loading configuration from {}", path);
            Self::from_file(&path)?
        } else {
            warn!("Config file not found: {path}, using defaults");
            Self::default()
        };

        config.apply_overrides(std::env::var(BIND_ENV).ok(), std::env::var(DATA_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| {
            DashError::Config(format!("{}: {}", path.as_ref().display(), e))
        })
    }

    pub fn apply_overrides(&mut self, bind: Option<String>, data_path: Option<String>) {
        if let Some(bind) = bind.filter(|b| !b.is_empty()) {
            self.server.bind = bind;
        }
        if let Some(path) = data_path.filter(|p| !p.is_empty()) {
            self.data.path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dashboard.slider_step == 0 {
            return Err(DashError::Config("dashboard.slider_step must be positive".into()));
        }
        if self.dashboard.mark_interval == 0 {
            return Err(DashError::Config("dashboard.mark_interval must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_source_dashboard() {
        let config = DashConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:8052");
        assert_eq!(config.data.path, "spacex_launch_dash.csv");
        assert_eq!(config.dashboard.slider_step, 100);
        assert_eq!(config.dashboard.mark_interval, 500);
        assert_eq!(config.dashboard.scatter_color, ScatterColor::BoosterCategory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\nscatter_color = \"outcome\"\nslider_step = 250").unwrap();

        let config = DashConfig::from_file(file.path()).unwrap();
        assert_eq!(config.dashboard.scatter_color, ScatterColor::Outcome);
        assert_eq!(config.dashboard.slider_step, 250);
        assert_eq!(config.dashboard.mark_interval, 500);
        assert_eq!(config.server.bind, "127.0.0.1:8052");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = ").unwrap();

        let err = DashConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut config = DashConfig::default();
        config.apply_overrides(Some("0.0.0.0:9000".into()), Some(String::new()));
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.data.path, "spacex_launch_dash.csv");
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut config = DashConfig::default();
        config.dashboard.slider_step = 0;
        assert!(config.validate().is_err());
    }
}
