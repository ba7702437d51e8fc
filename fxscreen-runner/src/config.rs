//! Serializable screen configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier for a screen (content-addressable hash).
pub type ScreenId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse screen config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Sort order applied to matched brokers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Overall review score, best first.
    #[default]
    Score,
    /// Minimum deposit, lowest first; brokers without one sort last.
    MinDeposit,
    /// EUR/USD spread, tightest first.
    Spread,
    /// Maximum leverage, highest first.
    Leverage,
}

/// One screening request: which features, where, how to order.
///
/// Feature keys are carried raw and normalized at evaluation time, so a
/// config written as `features = ["Copy Trading"]` behaves the same as
/// the canonical slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenConfig {
    /// Requested feature keys; a broker must match every one.
    pub features: Vec<String>,

    /// Restrict candidates to brokers available in this country.
    pub country: Option<String>,

    pub sort: SortKey,

    /// Keep at most this many brokers after sorting.
    pub limit: Option<usize>,
}

impl ScreenConfig {
    /// Computes a deterministic hash id for this configuration.
    ///
    /// Two identical configs share a ScreenId, so exported artifacts are
    /// content-addressed and re-runs overwrite rather than accumulate.
    pub fn screen_id(&self) -> ScreenId {
        let json = serde_json::to_string(self).expect("ScreenConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}
