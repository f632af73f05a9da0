//! Configuration module for archsecure
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (ARCHSECURE_*)
//! 3. `--config <path>`, else user config (~/.config/archsecure/config.toml),
//!    else system config (/etc/archsecure/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{default_paths, ConfigWarning, LoadedConfig};
pub use types::{
    AnimationMode, CatalogConfig, ColorMode, Config, LogConfig, OutputConfig, RunConfig,
    VpnConfig,
};
