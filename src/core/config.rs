//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.otp-input/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolution run before the file logger exists, so anything
//! worth reporting is collected as [`Diagnostic`]s and logged by the caller
//! once the logger is up.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::code::{CodeValue, DEFAULT_VALUE_LENGTH};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OtpConfig {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WidgetConfig {
    pub value_length: Option<usize>,
    pub initial_value: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

/// Values given on the command line. `None` = flag not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub value_length: Option<usize>,
    pub initial_value: Option<String>,
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Upper bound on the number of cells; wider codes don't fit a terminal row.
pub const MAX_VALUE_LENGTH: usize = 12;
pub const DEFAULT_LOG_FILE: &str = "otp-input.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub value_length: usize,
    pub initial_value: CodeValue,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Fallbacks taken while resolving.
    pub diagnostics: Vec<Diagnostic>,
}

// ============================================================================
// Diagnostics
// ============================================================================

/// A log record held back until the logger is initialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warn,
            message: message.into(),
        }
    }

    pub fn emit(&self) {
        log::log!(self.level, "{}", self.message);
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.otp-input/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".otp-input").join("config.toml"))
}

/// Load config from `~/.otp-input/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `OtpConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(diagnostics: &mut Vec<Diagnostic>) -> Result<OtpConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            diagnostics.push(Diagnostic::warn(
                "Could not determine home directory, using default config",
            ));
            return Ok(OtpConfig::default());
        }
    };

    if !path.exists() {
        diagnostics.push(Diagnostic::info(format!(
            "No config file found, generating default at {}",
            path.display()
        )));
        if let Err(e) = generate_default_config(&path) {
            diagnostics.push(Diagnostic::warn(format!(
                "Failed to write default config: {e}"
            )));
        }
        return Ok(OtpConfig::default());
    }

    let config = load_config_from(&path)?;
    diagnostics.push(Diagnostic::info(format!(
        "Loaded config from {}",
        path.display()
    )));
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<OtpConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# otp-input configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [widget]
# value_length = 4                   # Number of cells (1-12), or OTP_VALUE_LENGTH env var
# initial_value = ""                 # Pre-filled code, non-digits become empty cells

# [logging]
# level = "info"                     # "off", "error", "warn", "info", "debug", "trace"
# file = "otp-input.log"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &OtpConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with environment lookups routed through `env`.
pub fn resolve_with(
    config: &OtpConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut diagnostics = Vec::new();

    // Value length: CLI → env → config → default
    let requested_length = cli
        .value_length
        .or_else(|| env("OTP_VALUE_LENGTH").and_then(|s| s.trim().parse().ok()))
        .or(config.widget.value_length);
    let value_length = match requested_length {
        Some(n) if (1..=MAX_VALUE_LENGTH).contains(&n) => n,
        Some(n) => {
            diagnostics.push(Diagnostic::warn(format!(
                "value_length {n} out of range 1..={MAX_VALUE_LENGTH}, using {DEFAULT_VALUE_LENGTH}"
            )));
            DEFAULT_VALUE_LENGTH
        }
        None => DEFAULT_VALUE_LENGTH,
    };

    // Initial value: CLI → config → empty
    let initial_value = cli
        .initial_value
        .as_deref()
        .or(config.widget.initial_value.as_deref())
        .map(CodeValue::parse)
        .unwrap_or_default()
        .truncated(value_length);

    // Log level: env → config → default
    let log_level = env("OTP_LOG_LEVEL")
        .or_else(|| config.logging.level.clone())
        .and_then(|s| match LevelFilter::from_str(s.trim()) {
            Ok(level) => Some(level),
            Err(_) => {
                diagnostics.push(Diagnostic::warn(format!(
                    "Unknown log level {s:?}, using {DEFAULT_LOG_LEVEL}"
                )));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: CLI → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        value_length,
        initial_value,
        log_level,
        log_file,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&OtpConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.value_length, DEFAULT_VALUE_LENGTH);
        assert!(resolved.initial_value.is_empty());
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = OtpConfig {
            widget: WidgetConfig {
                value_length: Some(6),
                initial_value: Some("12".to_string()),
            },
            logging: LoggingConfig {
                level: Some("debug".to_string()),
                file: Some("custom.log".to_string()),
            },
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.value_length, 6);
        assert_eq!(resolved.initial_value.to_string(), "12");
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("custom.log"));
    }

    #[test]
    fn test_resolve_env_beats_config_and_cli_beats_env() {
        let config = OtpConfig {
            widget: WidgetConfig {
                value_length: Some(6),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "OTP_VALUE_LENGTH").then(|| "5".to_string());

        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.value_length, 5);

        let cli = CliOverrides {
            value_length: Some(8),
            ..Default::default()
        };
        let resolved = resolve_with(&config, &cli, env);
        assert_eq!(resolved.value_length, 8);
    }

    #[test]
    fn test_resolve_rejects_out_of_range_length() {
        for n in [0, MAX_VALUE_LENGTH + 1] {
            let cli = CliOverrides {
                value_length: Some(n),
                ..Default::default()
            };
            let resolved = resolve_with(&OtpConfig::default(), &cli, no_env);
            assert_eq!(resolved.value_length, DEFAULT_VALUE_LENGTH);
            assert_eq!(resolved.diagnostics.len(), 1);
            assert_eq!(resolved.diagnostics[0].level, Level::Warn);
            assert!(
                resolved.diagnostics[0].message.contains("out of range 1..=12"),
                "{:?}",
                resolved.diagnostics
            );
        }
    }

    #[test]
    fn test_resolve_truncates_initial_value() {
        let cli = CliOverrides {
            initial_value: Some("123456".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with(&OtpConfig::default(), &cli, no_env);
        assert_eq!(resolved.initial_value.to_string(), "1234");
    }

    #[test]
    fn test_resolve_bad_log_level_falls_back() {
        let env = |key: &str| (key == "OTP_LOG_LEVEL").then(|| "chatty".to_string());
        let resolved = resolve_with(&OtpConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(
            resolved.diagnostics,
            vec![Diagnostic::warn("Unknown log level \"chatty\", using INFO")]
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[widget]
value_length = 6
"#;
        let config: OtpConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.widget.value_length, Some(6));
        assert!(config.widget.initial_value.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[widget]
value_length = 5
initial_value = "12"

[logging]
level = "trace"
file = "/tmp/otp.log"
"#;
        let config: OtpConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.widget.initial_value.as_deref(), Some("12"));
        assert_eq!(config.logging.level.as_deref(), Some("trace"));
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/otp.log"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("otp-input-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[widget]\nvalue_length = \"four\"\n").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let missing = load_config_from(&dir.join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        fs::remove_dir_all(&dir).ok();
    }
}
