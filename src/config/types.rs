//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::harden::Pacing;
use crate::catalog::labels::{NORDVPN, PROTONVPN};
use crate::error::ArchsecureResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

const NORDVPN_OVPN_URL: &str = "https://downloads.nordcdn.com/configs/archives/servers/ovpn.zip";

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub animation: AnimationMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            animation: AnimationMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Animation output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Run pacing and acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Progress indicator redraw interval
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Cosmetic indicator frames shown before each action call
    #[serde(default = "default_spinner_ticks")]
    pub spinner_ticks: usize,

    /// Display pause after a skipped option
    #[serde(default = "default_skip_pause_ms")]
    pub skip_pause_ms: u64,

    /// Hold for a key press after the summary
    #[serde(default = "default_true")]
    pub acknowledge: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            spinner_ticks: default_spinner_ticks(),
            skip_pause_ms: default_skip_pause_ms(),
            acknowledge: true,
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when neither RUST_LOG nor -v is given
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

/// Option catalog settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Custom option tree replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Leaf labels checked when the menu opens
    #[serde(default)]
    pub preselect: Vec<String>,
}

/// VPN provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpnConfig {
    /// Provider name -> OpenVPN configuration archive URL
    #[serde(default)]
    pub ovpn_urls: BTreeMap<String, String>,

    /// Provider name -> DNS servers
    #[serde(default)]
    pub dns: BTreeMap<String, Vec<String>>,

    /// Where downloaded archives are stored
    #[serde(default = "default_ovpn_dir")]
    pub ovpn_dir: PathBuf,
}

impl Default for VpnConfig {
    fn default() -> Self {
        Self {
            ovpn_urls: BTreeMap::new(),
            dns: BTreeMap::new(),
            ovpn_dir: default_ovpn_dir(),
        }
    }
}

impl VpnConfig {
    /// Configured archive URL, else the built-in one
    pub fn ovpn_url(&self, provider: &str) -> Option<&str> {
        self.ovpn_urls
            .get(provider)
            .map(String::as_str)
            .or(match provider {
                NORDVPN => Some(NORDVPN_OVPN_URL),
                _ => None,
            })
    }

    /// Configured DNS servers, else the built-in ones
    pub fn dns_servers(&self, provider: &str) -> Vec<String> {
        if let Some(servers) = self.dns.get(provider) {
            return servers.clone();
        }
        let builtin: &[&str] = match provider {
            NORDVPN => &["103.86.96.100", "103.86.99.100"],
            PROTONVPN => &["10.2.0.1"],
            _ => &[],
        };
        builtin.iter().map(|s| s.to_string()).collect()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub vpn: VpnConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ArchsecureResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ArchsecureResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from `explicit`, the user config, the system config, or defaults
    pub fn discover(explicit: Option<&Path>) -> ArchsecureResult<LoadedConfig> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (ARCHSECURE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Indicator timing for interactive runs
    pub fn pacing(&self) -> Pacing {
        Pacing {
            tick: Duration::from_millis(self.run.tick_ms),
            spinner_ticks: self.run.spinner_ticks,
            skip_pause: Duration::from_millis(self.run.skip_pause_ms),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    100
}

fn default_spinner_ticks() -> usize {
    8
}

fn default_skip_pause_ms() -> u64 {
    150
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ovpn_dir() -> PathBuf {
    PathBuf::from("/etc/openvpn/client")
}
