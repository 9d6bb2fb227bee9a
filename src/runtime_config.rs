//! # Runtime Configuration Module
//!
//! Configuration for the route collector, loaded from environment variables or a
//! YAML file.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_DETECT_DUPLICATES`
//!
//! Whether the collector rejects routes whose path and methods collide with an
//! earlier route. Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`
//! (case-insensitive). Anything else keeps the default.
//!
//! Default: `true`
//!
//! ## YAML
//!
//! [`CollectorConfig`] deserializes on its own or embedded in a larger service
//! config:
//!
//! ```yaml
//! detect_duplicates: false
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use brrtroutes::runtime_config::CollectorConfig;
//!
//! let config = CollectorConfig::from_env();
//! println!("Duplicate detection: {}", config.detect_duplicates);
//! ```

use std::env;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable toggling duplicate detection
pub const DETECT_DUPLICATES_ENV: &str = "BRRTR_DETECT_DUPLICATES";

/// Collector configuration.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Reject routes sharing a path with overlapping methods (default: true)
    pub detect_duplicates: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            detect_duplicates: true,
        }
    }
}

impl CollectorConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let detect_duplicates = env::var(DETECT_DUPLICATES_ENV)
            .ok()
            .and_then(|val| parse_flag(&val))
            .unwrap_or(defaults.detect_duplicates);
        CollectorConfig { detect_duplicates }
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// The file cannot be read or is not valid YAML for this struct.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read collector config {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("invalid collector config {}", path.display()))
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// The text is not valid YAML for this struct.
    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
