//! Application configuration management.
//!
//! Handles config directory resolution (CLI flag / env > `XDG_CONFIG_HOME` >
//! platform default) and loading `config.toml`. The file is optional: every
//! field has a default, and command-line flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// User-configurable application settings.
///
/// All fields have sensible defaults. Users can override any subset via
/// `config.toml` in the config directory -- missing fields use defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Name or path of the WARP control binary.
    pub binary: String,
    /// UI refresh rate in milliseconds.
    pub tick_rate: u64,
    /// Sleep between poll cycles in milliseconds.
    pub poll_interval_ms: u64,
    /// Timeout for `status` / `settings list` in seconds.
    pub query_timeout_secs: u64,
    /// Timeout for connect, disconnect, mode and port changes in seconds.
    pub mutation_timeout_secs: u64,
    /// Minimum log level shown in the activity log (`"debug"`, `"info"`, `"warning"`, `"error"`).
    pub log_level: String,
    /// Maximum number of log entries kept in memory.
    pub max_log_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            binary: constants::DEFAULT_BINARY.to_string(),
            tick_rate: constants::DEFAULT_TICK_RATE,
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
            query_timeout_secs: constants::DEFAULT_QUERY_TIMEOUT_SECS,
            mutation_timeout_secs: constants::DEFAULT_MUTATION_TIMEOUT_SECS,
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            max_log_entries: constants::DEFAULT_MAX_LOG_ENTRIES,
        }
    }
}

impl AppConfig {
    /// Poll interval, floored so a zero value can't spin `warp-cli`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(constants::MIN_POLL_INTERVAL_MS))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs.max(constants::MIN_TIMEOUT_SECS))
    }

    pub fn mutation_timeout(&self) -> Duration {
        Duration::from_secs(self.mutation_timeout_secs.max(constants::MIN_TIMEOUT_SECS))
    }

    /// Apply command-line overrides on top of file values.
    pub fn apply_overrides(&mut self, interval_ms: Option<u64>, binary: Option<&str>) {
        if let Some(ms) = interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(binary) = binary {
            self.binary = binary.to_string();
        }
    }
}

/// Resolves the config directory path.
///
/// Precedence: CLI flag / `WARP_TUI_CONFIG_DIR` > `XDG_CONFIG_HOME` > platform default.
/// The directory is not created; a missing directory simply means defaults.
///
/// # Errors
///
/// Returns an error if no config directory can be determined.
pub fn resolve_config_dir(cli_override: Option<&PathBuf>) -> std::io::Result<PathBuf> {
    if let Some(dir) = cli_override {
        // Resolve relative paths to absolute so the config dir is stable
        // regardless of the working directory.
        return if dir.is_relative() {
            Ok(std::env::current_dir()?.join(dir))
        } else {
            Ok(dir.clone())
        };
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let xdg_path = PathBuf::from(xdg);
        if xdg_path.is_absolute() {
            return Ok(xdg_path.join(constants::APP_NAME));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(constants::APP_NAME))
        .ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Config directory not found")
        })
}

/// Loads `AppConfig` from `config.toml` in the given directory.
///
/// Returns defaults if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(config_dir: &Path) -> Result<AppConfig, String> {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {e}", config_path.display()))?;

    toml::from_str(&content)
        .map_err(|e| format!("Invalid config at {}: {e}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("warp_tui_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.binary, "warp-cli");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.mutation_timeout(), Duration::from_secs(10));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = scratch_dir("no_config");
        assert_eq!(load_config(&dir).unwrap(), AppConfig::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_partial() {
        let dir = scratch_dir("partial_config");
        std::fs::write(dir.join("config.toml"), "poll_interval_ms = 1000\n").unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.query_timeout_secs, 5); // default preserved

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_full_toml() {
        let dir = scratch_dir("full_config");
        let toml_content = r#"
binary = "/opt/warp/bin/warp-cli"
tick_rate = 100
poll_interval_ms = 250
query_timeout_secs = 2
mutation_timeout_secs = 20
log_level = "debug"
max_log_entries = 50
"#;
        std::fs::write(dir.join("config.toml"), toml_content).unwrap();

        let config = load_config(&dir).unwrap();
        assert_eq!(config.binary, "/opt/warp/bin/warp-cli");
        assert_eq!(config.tick_rate, 100);
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.query_timeout_secs, 2);
        assert_eq!(config.mutation_timeout_secs, 20);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_log_entries, 50);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = scratch_dir("bad_config");
        std::fs::write(dir.join("config.toml"), "tick_rate = [invalid\n").unwrap();

        let err = load_config(&dir).unwrap_err();
        assert!(err.starts_with("Invalid config at"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_config_unknown_field() {
        let dir = scratch_dir("unknown_field");
        std::fs::write(dir.join("config.toml"), "nonexistent_field = true\n").unwrap();

        assert!(load_config(&dir).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some(2000), Some("my-warp"));
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.binary, "my-warp");

        let mut untouched = AppConfig::default();
        untouched.apply_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_zero_interval_and_timeouts_are_floored() {
        let mut config: AppConfig = toml::from_str(
            "poll_interval_ms = 0\nquery_timeout_secs = 0\nmutation_timeout_secs = 0\n",
        )
        .unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.query_timeout(), Duration::from_secs(1));
        assert_eq!(config.mutation_timeout(), Duration::from_secs(1));

        config.apply_overrides(Some(0), None);
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        config.apply_overrides(Some(250), None);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_resolve_config_dir_with_absolute_override() {
        let custom = std::env::temp_dir().join("warp_tui_resolve_override");
        let result = resolve_config_dir(Some(&custom)).unwrap();
        assert_eq!(result, custom);
    }

    #[test]
    fn test_resolve_config_dir_with_relative_override() {
        let result = resolve_config_dir(Some(&PathBuf::from("relative-cfg"))).unwrap();
        assert!(result.is_absolute());
        assert!(result.ends_with("relative-cfg"));
    }
}
