//! Log file setup
//!
//! The terminal belongs to the menu, so log output goes to a per-run file.

use std::fs;
use std::path::{Path, PathBuf};

use archsecure::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter directive: RUST_LOG, then -v count, then the configured level
fn filter_directive(rust_log: Option<String>, verbose: u8, config_level: &str) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    match verbose {
        0 => config_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn log_dir(config: &LogConfig) -> Option<PathBuf> {
    config.dir.clone().or_else(|| {
        dirs::state_dir()
            .or_else(dirs::cache_dir)
            .map(|dir| dir.join("archsecure").join("logs"))
    })
}

fn file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("archsecure.{}.log", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Install the file subscriber. Keep the guard alive until exit.
///
/// Returns `None` (after a warning on stderr) when no log file can be opened.
pub fn init(config: &LogConfig, verbose: u8) -> Option<WorkerGuard> {
    let Some(dir) = log_dir(config) else {
        eprintln!("warning: no log directory available; continuing without a log file");
        return None;
    };
    match open(&dir, config, verbose) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!(
                "warning: cannot write logs to {}: {}; continuing without a log file",
                dir.display(),
                err
            );
            None
        }
    }
}

fn open(dir: &Path, config: &LogConfig, verbose: u8) -> std::io::Result<WorkerGuard> {
    fs::create_dir_all(dir)?;
    let file = fs::File::create(dir.join(file_name(chrono::Local::now())))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    let directive = filter_directive(std::env::var("RUST_LOG").ok(), verbose, &config.level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rust_log_wins_over_verbosity() {
        assert_eq!(
            filter_directive(Some("archsecure=trace".into()), 1, "warn"),
            "archsecure=trace"
        );
    }

    #[test]
    fn verbosity_wins_over_config() {
        assert_eq!(filter_directive(None, 1, "warn"), "debug");
        assert_eq!(filter_directive(None, 3, "warn"), "trace");
        assert_eq!(filter_directive(Some("  ".into()), 0, "warn"), "warn");
    }

    #[test]
    fn file_name_is_timestamped() {
        let at = chrono::Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .unwrap();
        assert_eq!(file_name(at), "archsecure.2024-03-09-07-05-01.log");
    }

    #[test]
    fn configured_dir_is_used() {
        let config = LogConfig {
            level: "info".into(),
            dir: Some(PathBuf::from("/tmp/x")),
        };
        assert_eq!(log_dir(&config), Some(PathBuf::from("/tmp/x")));
    }
}
