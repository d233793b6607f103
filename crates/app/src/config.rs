//! Application configuration loaded from environment variables.

use std::str::FromStr;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Forum configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `DOMAIN_EVENTS_ENABLED`: deliver domain events to subscribers (default: `true`)
/// - `METRICS_ENABLED`: install the Prometheus recorder (default: `true`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub domain_events_enabled: bool,
    pub metrics_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_format),
            domain_events_enabled: lookup("DOMAIN_EVENTS_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.domain_events_enabled),
            metrics_enabled: lookup("METRICS_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            domain_events_enabled: true,
            metrics_enabled: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.domain_events_enabled);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config_from(&[
            ("RUST_LOG", "debug,persistence=trace"),
            ("LOG_FORMAT", "JSON"),
            ("DOMAIN_EVENTS_ENABLED", "false"),
            ("METRICS_ENABLED", "0"),
        ]);

        assert_eq!(config.log_level, "debug,persistence=trace");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.domain_events_enabled);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("LOG_FORMAT", "xml"), ("METRICS_ENABLED", "maybe")]);

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.metrics_enabled);
    }
}
