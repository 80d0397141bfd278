use std::time::Duration;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Editor configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Buffered channel changes per subscriber before it lags (default: `64`).
    pub channel_capacity: usize,
    /// How long a resolved signed media URL may be reused (default: 55 min).
    pub media_url_ttl: Duration,
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            media_url_ttl: Duration::from_secs(3300),
            log_filter: "genscape_editor=info,genscape_events=info".into(),
            log_format: LogFormat::Text,
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                                  |
    /// |--------------------------------|------------------------------------------|
    /// | `GENSCAPE_CHANNEL_CAPACITY`    | `64`                                     |
    /// | `GENSCAPE_MEDIA_URL_TTL_SECS`  | `3300`                                   |
    /// | `GENSCAPE_LOG`                 | `genscape_editor=info,genscape_events=info` |
    /// | `GENSCAPE_LOG_FORMAT`          | `text` (`text` or `json`)                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let channel_capacity = match lookup("GENSCAPE_CHANNEL_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "GENSCAPE_CHANNEL_CAPACITY",
                        value: raw,
                        expected: "a positive integer",
                    })
                }
            },
            None => defaults.channel_capacity,
        };

        let media_url_ttl = match lookup("GENSCAPE_MEDIA_URL_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid {
                    var: "GENSCAPE_MEDIA_URL_TTL_SECS",
                    value: raw,
                    expected: "a whole number of seconds",
                })?,
            None => defaults.media_url_ttl,
        };

        let log_filter = lookup("GENSCAPE_LOG").unwrap_or(defaults.log_filter);

        let log_format = match lookup("GENSCAPE_LOG_FORMAT") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "GENSCAPE_LOG_FORMAT",
                        value: raw,
                        expected: "'text' or 'json'",
                    })
                }
            },
            None => defaults.log_format,
        };

        Ok(Self {
            channel_capacity,
            media_url_ttl,
            log_filter,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<EditorConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EditorConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.media_url_ttl, Duration::from_secs(3300));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("GENSCAPE_CHANNEL_CAPACITY", "8"),
            ("GENSCAPE_MEDIA_URL_TTL_SECS", "60"),
            ("GENSCAPE_LOG", "debug"),
            ("GENSCAPE_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.media_url_ttl, Duration::from_secs(60));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = load(&[("GENSCAPE_CHANNEL_CAPACITY", "0")]).unwrap_err();
        assert!(err.to_string().contains("GENSCAPE_CHANNEL_CAPACITY"));
    }

    #[test]
    fn rejects_non_numeric_ttl() {
        let err = load(&[("GENSCAPE_MEDIA_URL_TTL_SECS", "soon")]).unwrap_err();
        assert_matches!(
            err,
            ConfigError::Invalid { var: "GENSCAPE_MEDIA_URL_TTL_SECS", ref value, .. } if value == "soon"
        );
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(load(&[("GENSCAPE_LOG_FORMAT", "xml")]).is_err());
    }
}
