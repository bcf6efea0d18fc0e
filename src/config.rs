//! Configuration module for the trace cleaner
//!
//! Options are fixed at construction. They can be built in code or loaded
//! from a JSON document; every field has a default.

use serde::Deserialize;

use crate::error::ConfigError;

/// Construction-time options for a [`LineCleaner`](crate::LineCleaner)
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CleanerConfig {
    /// Keep request headers and `*` comment lines
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Text spliced once after the first comment line past the header/body
    /// boundary (verbose only)
    #[serde(default)]
    pub insertion: Option<String>,

    /// Emit structured telemetry events through `log`
    #[serde(default = "default_log_events")]
    pub log_events: bool,
}

fn default_verbose() -> bool {
    false
}

fn default_log_events() -> bool {
    true
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            insertion: None,
            log_events: default_log_events(),
        }
    }
}

impl CleanerConfig {
    /// Parse configuration from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config_str = std::str::from_utf8(bytes)?;
        config_str.parse()
    }
}

impl std::str::FromStr for CleanerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanerConfig::default();
        assert!(!config.verbose);
        assert!(config.insertion.is_none());
        assert!(config.log_events);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{"verbose": true, "insertion": "--- body ---"}"#;
        let config = CleanerConfig::from_bytes(json.as_bytes()).unwrap();
        assert!(config.verbose);
        assert_eq!(config.insertion.as_deref(), Some("--- body ---"));
        assert!(config.log_events);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: CleanerConfig = "{}".parse().unwrap();
        assert_eq!(config, CleanerConfig::default());
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            CleanerConfig::from_bytes(&[0xff, 0xfe]),
            Err(ConfigError::InvalidUtf8(_))
        ));
        assert!(matches!(
            CleanerConfig::from_bytes(b"{\"verbose\": "),
            Err(ConfigError::InvalidJson(_))
        ));
    }
}
