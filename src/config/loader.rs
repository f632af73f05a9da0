//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ArchsecureError, ArchsecureResult};

use super::types::{ColorMode, Config};

const SYSTEM_CONFIG: &str = "/etc/archsecure/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Configuration plus where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when only defaults apply
    pub source: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ArchsecureResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ArchsecureError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Candidate config files in lookup order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs_config_dir() {
        paths.push(dir.join("archsecure/config.toml"));
    }
    paths.push(PathBuf::from(SYSTEM_CONFIG));
    paths
}

/// Load `explicit` (which must exist), else the first existing default path,
/// else defaults. Environment overrides are applied in every case.
pub fn discover(explicit: Option<&Path>) -> ArchsecureResult<LoadedConfig> {
    let source = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_paths().into_iter().find(|p| p.is_file()),
    };

    let Some(path) = source else {
        return Ok(LoadedConfig {
            config: with_env_overrides(Config::default()),
            ..LoadedConfig::default()
        });
    };

    let (config, warnings) = load_with_warnings(&path)?;
    Ok(LoadedConfig {
        config: with_env_overrides(config),
        warnings,
        source: Some(path),
    })
}

/// Apply environment variable overrides (ARCHSECURE_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // ARCHSECURE_COLOR
    if let Ok(color) = std::env::var("ARCHSECURE_COLOR") {
        if let Some(mode) = ColorMode::parse(&color) {
            config.output.color = mode;
        }
    }

    // ARCHSECURE_TICK_MS
    if let Some(tick_ms) = env_number("ARCHSECURE_TICK_MS") {
        config.run.tick_ms = tick_ms;
    }

    // ARCHSECURE_SPINNER_TICKS
    if let Some(ticks) = env_number("ARCHSECURE_SPINNER_TICKS") {
        config.run.spinner_ticks = ticks as usize;
    }

    // ARCHSECURE_LOG_DIR
    if let Ok(dir) = std::env::var("ARCHSECURE_LOG_DIR") {
        if !dir.is_empty() {
            config.log.dir = Some(PathBuf::from(dir));
        }
    }

    // ARCHSECURE_CATALOG
    if let Ok(path) = std::env::var("ARCHSECURE_CATALOG") {
        if !path.is_empty() {
            config.catalog.path = Some(PathBuf::from(path));
        }
    }

    config
}

fn env_number(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "output",
        "color",
        "animation",
        "unicode",
        "run",
        "tick_ms",
        "spinner_ticks",
        "skip_pause_ms",
        "acknowledge",
        "log",
        "level",
        "dir",
        "catalog",
        "path",
        "preselect",
        "vpn",
        "ovpn_urls",
        "ovpn_dir",
        "dns",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
