//! Session configuration.
//!
//! Game rules (rank tables, cadences, usage caps) are invariant and live
//! in the type definitions; configuration covers only what a host may
//! legitimately vary: the RNG seed (reproducible scenarios), the
//! affiliation label revealed by the light sensor, and the variety toggle
//! for balanced weakness generation.

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Host-tunable settings for one investigation session.
///
/// All fields have defaults, so a partial config document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// RNG seed. `None` seeds from OS entropy; set it for reproducible
    /// scenarios and tests.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Affiliation label revealed by the light sensor.
    #[serde(default = "default_affiliation")]
    pub affiliation: String,

    /// Whether balanced weakness generation guarantees variety before
    /// duplicating. On by default; turning it off makes every rank draw
    /// plain random weaknesses.
    #[serde(default = "default_ensure_variety")]
    pub ensure_variety: bool,
}

fn default_affiliation() -> String {
    String::from("Crimson Meridian")
}

const fn default_ensure_variety() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            affiliation: default_affiliation(),
            ensure_variety: default_ensure_variety(),
        }
    }
}

impl SessionConfig {
    /// Parse a config from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] when the document does not parse.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SessionConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.affiliation, "Crimson Meridian");
        assert!(config.ensure_variety);
    }

    #[test]
    fn full_yaml_document_parses() {
        let parsed = SessionConfig::from_yaml_str(
            "seed: 42\naffiliation: Obsidian Chorus\nensure_variety: false\n",
        );
        assert_eq!(
            parsed.ok(),
            Some(SessionConfig {
                seed: Some(42),
                affiliation: String::from("Obsidian Chorus"),
                ensure_variety: false,
            })
        );
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let parsed = SessionConfig::from_yaml_str("seed: 7\n");
        assert_eq!(
            parsed.ok(),
            Some(SessionConfig {
                seed: Some(7),
                ..SessionConfig::default()
            })
        );
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let parsed = SessionConfig::from_yaml_str("seed: [not a number");
        assert!(parsed.is_err());
    }
}
