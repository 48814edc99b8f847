//! Configuration options for the equity simulator.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::simulator::SHARE_UNITS;

/// Largest trial count whose per-player share totals fit in a `u64`.
pub const MAX_TRIALS: u64 = u64::MAX / SHARE_UNITS;

/// Configuration for the equity simulator.
///
/// # Example
/// ```
/// use holdem_equity::equity::SimulatorConfig;
///
/// let config = SimulatorConfig::default().with_trials(10_000).with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Number of random board completions per estimate, at most [`MAX_TRIALS`].
    ///
    /// Fixed before the run starts; the estimate's standard error shrinks
    /// as 1/sqrt(trials).
    pub trials: u64,

    /// Number of worker threads.
    ///
    /// `None` runs on the global rayon pool; `Some(n)` builds a dedicated
    /// pool of `n` threads for each run.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// With a seed, the result of a run is identical regardless of thread
    /// count. Without one, a seed is drawn from entropy per run.
    pub seed: Option<u64>,

    /// Trials per work unit. Each unit owns its own RNG and card pool.
    pub chunk_size: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            trials: 100_000,
            num_threads: None,
            seed: None,
            chunk_size: 4096,
        }
    }
}

impl SimulatorConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A low trial count for quick interactive estimates.
    pub fn fast() -> Self {
        Self {
            trials: 10_000,
            ..Default::default()
        }
    }

    /// Builder method: set the number of trials.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set trials per work unit.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.trials > MAX_TRIALS {
            return Err(ConfigError::TooManyTrials(self.trials));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur when loading or validating simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    IoError(String),
    /// The config file is not valid JSON for this struct.
    ParseError(String),
    /// Trial count is zero.
    ZeroTrials,
    /// Trial count would overflow the share accumulators.
    TooManyTrials(u64),
    /// Chunk size is zero.
    ZeroChunkSize,
    /// Thread count is zero.
    ZeroThreads,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::ZeroTrials => write!(f, "Trial count must be at least 1"),
            Self::TooManyTrials(n) => {
                write!(f, "Trial count {} exceeds the maximum of {}", n, MAX_TRIALS)
            }
            Self::ZeroChunkSize => write!(f, "Chunk size must be at least 1"),
            Self::ZeroThreads => write!(f, "Thread count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
