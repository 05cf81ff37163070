//! Server configuration: YAML file, strict parsing, validated defaults.
//!
//! The config path comes from the `PULSE_CONFIG` env var, falling back to
//! `pulse.yaml` in the working directory, falling back to built-in defaults
//! when no file exists.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// Root server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PulseConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub endpoint: EndpointSection,
}

/// Registration of the monitoring endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointSection {
    /// When false the monitoring route is not registered at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Path segment under `/monitoring/`.
    #[serde(default = "default_endpoint_id")]
    pub id: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            endpoint: EndpointSection::default(),
        }
    }
}

impl Default for EndpointSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            id: default_endpoint_id(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint_id() -> String {
    "engine".to_string()
}

impl PulseConfig {
    /// Load from a YAML file and validate.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        let config: PulseConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config path and load it, or fall back to defaults when no
    /// file is present.
    pub fn load() -> Result<Self> {
        let path = std::env::var("PULSE_CONFIG").unwrap_or_else(|_| "pulse.yaml".to_string());
        let path = Path::new(&path);
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.endpoint.id.is_empty() || self.endpoint.id.contains('/') {
            bail!(
                "endpoint.id must be a single non-empty path segment, got {:?}",
                self.endpoint.id
            );
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .with_context(|| format!("listen must be a valid socket address, got {:?}", self.listen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PulseConfig::default();
        config.validate().unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert!(config.endpoint.enabled);
        assert_eq!(config.endpoint.id, "engine");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
listen: "127.0.0.1:9999"
endpoint:
  enabled: false
  id: "camunda"
"#;
        let config: PulseConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.listen, "127.0.0.1:9999");
        assert!(!config.endpoint.enabled);
        assert_eq!(config.endpoint.id, "camunda");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let yaml = "endpoint:\n  id: \"bpm\"\n";
        let config: PulseConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert!(config.endpoint.enabled);
        assert_eq!(config.endpoint.id, "bpm");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "listen: \"0.0.0.0:8080\"\nbogus: true\n";
        let result: std::result::Result<PulseConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_listen_rejected() {
        let config = PulseConfig {
            listen: "not-an-addr".to_string(),
            endpoint: EndpointSection::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_id_must_be_single_segment() {
        let config = PulseConfig {
            listen: default_listen(),
            endpoint: EndpointSection {
                enabled: true,
                id: "a/b".to_string(),
            },
        };
        assert!(config.validate().is_err());

        let empty = PulseConfig {
            listen: default_listen(),
            endpoint: EndpointSection {
                enabled: true,
                id: String::new(),
            },
        };
        assert!(empty.validate().is_err());
    }
}
