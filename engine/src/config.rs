//! Engine configuration.
//!
//! Every field has a default, so an empty TOML file is a valid configuration:
//!
//! ```toml
//! graph_threshold = 500
//! batch_size = 100
//! start_n = 4
//! # stop_after = 100000
//! compact_on_finish = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::divisors::MIN_N;
use crate::error::EngineError;
use crate::graph::DEFAULT_GRAPH_THRESHOLD;

/// Default number of records per committed batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Graphs are built only for `n` below this value.
    pub graph_threshold: u64,
    /// Records per committed batch.
    pub batch_size: usize,
    /// First `n` when the store is empty.
    pub start_n: u64,
    /// Inclusive upper bound on `n`; `None` runs until cancelled.
    pub stop_after: Option<u64>,
    /// Compact the store once the run ends.
    pub compact_on_finish: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            graph_threshold: DEFAULT_GRAPH_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
            start_n: MIN_N,
            stop_after: None,
            compact_on_finish: false,
        }
    }
}

/// Error loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not valid configuration TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks the values the writer relies on.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when `batch_size` is zero,
    /// `start_n` is below 4, or `stop_after` precedes `start_n`.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.batch_size == 0 {
            return Err(EngineError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.start_n < MIN_N {
            return Err(EngineError::InvalidConfig(format!(
                "start_n must be at least {}, got {}",
                MIN_N, self.start_n
            )));
        }
        if let Some(stop) = self.stop_after {
            if stop < self.start_n {
                return Err(EngineError::InvalidConfig(format!(
                    "stop_after ({}) is below start_n ({})",
                    stop, self.start_n
                )));
            }
        }
        Ok(())
    }
}
