//! Logging setup.
//!
//! Human-readable logs go to stderr. When a log directory can be resolved,
//! JSON lines are also written to a daily-rotated file there.
//!
//! Log file location, first match wins:
//! 1. `LEXFOG_LOG_PATH` (exact file; rotation uses its directory and name)
//! 2. `LEXFOG_LOG_DIR`
//! 3. `log_dir` from the configuration
//! 4. The platform data directory, e.g. `~/.local/share/lexfog/logs`

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "LEXFOG_LOG_PATH";
const LOG_DIR_ENV: &str = "LEXFOG_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "lexfog.jsonl";

/// Where log files go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Directory holding the rotated files.
    pub log_dir: Option<PathBuf>,
    /// File name prefix for the rotated files.
    pub file_name: String,
}

impl ObservabilityConfig {
    /// Resolve from the environment, falling back to `config_log_dir` and
    /// then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
            default_log_dir(),
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = log_path
            && let Some(name) = path.file_name()
        {
            return Self {
                log_dir: Some(
                    path.parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
                ),
                file_name: name.to_string_lossy().into_owned(),
            };
        }
        Self {
            log_dir: env_dir.or(config_dir).or(platform_dir),
            file_name: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

fn default_log_dir() -> Option<PathBuf> {
    lexfog_core::config::user_data_local_dir().map(|dir| dir.into_std_path_buf().join("logs"))
}

/// Build the log filter: `RUST_LOG` wins, then `-q`/`-v`, then the
/// configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(cli_level(quiet, verbose, config_level))
}

fn cli_level(quiet: bool, verbose: u8, config_level: &str) -> &str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => config_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    }
}

/// Keeps the file writer flushing until dropped.
#[derive(Debug, Default)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// A log directory that cannot be created only disables the file layer.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let mut skipped_dir = None;
    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) if std::fs::create_dir_all(dir).is_ok() => {
            let appender = tracing_appender::rolling::daily(dir, &config.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(false);
            (Some(layer), Some(guard))
        }
        Some(dir) => {
            skipped_dir = Some(dir.to_path_buf());
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    if let Some(dir) = skipped_dir {
        tracing::debug!(dir = %dir.display(), "log directory unavailable; file logging disabled");
    }

    Ok(ObservabilityGuard { _file: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_path_wins() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/var/log/lexfog/run.jsonl")),
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            None,
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/var/log/lexfog")));
        assert_eq!(cfg.file_name, "run.jsonl");
    }

    #[test]
    fn bare_file_name_logs_to_cwd() {
        let cfg = ObservabilityConfig::resolve(Some(PathBuf::from("x.jsonl")), None, None, None);
        assert_eq!(cfg.log_dir, Some(PathBuf::from(".")));
    }

    #[test]
    fn directory_precedence() {
        let env = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/env")),
            Some(PathBuf::from("/config")),
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(env.log_dir, Some(PathBuf::from("/env")));
        assert_eq!(env.file_name, DEFAULT_LOG_FILE);

        let config = ObservabilityConfig::resolve(
            None,
            None,
            Some(PathBuf::from("/config")),
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(config.log_dir, Some(PathBuf::from("/config")));

        let none = ObservabilityConfig::resolve(None, None, None, None);
        assert!(none.log_dir.is_none());
    }

    #[test]
    fn platform_log_dir_lives_under_data_dir() {
        let Some(data) = lexfog_core::config::user_data_local_dir() else {
            return;
        };
        assert_eq!(default_log_dir(), Some(data.as_std_path().join("logs")));
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(cli_level(true, 3, "info"), "error");
        assert_eq!(cli_level(false, 0, "warn"), "warn");
        assert_eq!(cli_level(false, 1, "info"), "debug");
        assert_eq!(cli_level(false, 2, "info"), "trace");
    }
}
