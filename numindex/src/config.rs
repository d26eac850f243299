//! Sampling configuration.
//!
//! This module loads the tunables of index sampling from environment
//! variables.
//!
//! # Environment Variables
//!
//! - `NUMINDEX_SAMPLE_SIZE_LIMIT`: Number of distinct values the sampler
//!   buffers before folding them into its running count (default: `1000000`)
//!
//! The reader never reads the environment itself: `NumberIndexReader::new`
//! uses [`SamplingConfig::default`]. To honor the variables below, load them
//! with [`SamplingConfig::from_env`] and pass the result to
//! `NumberIndexReader::with_sampling_config`.
//!
//! # Invariants
//!
//! - `sample_size_limit` is always at least 1

use std::num::NonZeroUsize;

/// Name of the environment variable holding the sample size limit.
pub const SAMPLE_SIZE_LIMIT_VAR: &str = "NUMINDEX_SAMPLE_SIZE_LIMIT";

/// Sampling configuration.
///
/// # Post-conditions
///
/// - `sample_size_limit` is positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Distinct values held in memory at once while sampling.
    /// Larger limits make the unique-value count more accurate.
    pub sample_size_limit: NonZeroUsize,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SamplingConfig {
    /// Default distinct-value buffer size.
    pub const DEFAULT_SAMPLE_SIZE_LIMIT: NonZeroUsize = match NonZeroUsize::new(1_000_000) {
        Some(limit) => limit,
        None => unreachable!(),
    };

    #[must_use]
    pub const fn new(sample_size_limit: NonZeroUsize) -> Self {
        Self { sample_size_limit }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `NUMINDEX_SAMPLE_SIZE_LIMIT` is set but is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let sample_size_limit = Self::parse_sample_size_limit(
            std::env::var(SAMPLE_SIZE_LIMIT_VAR).ok().as_deref(),
        )?;
        Ok(Self { sample_size_limit })
    }

    /// Parse the sample size limit from an optional raw value.
    fn parse_sample_size_limit(raw: Option<&str>) -> Result<NonZeroUsize, ConfigError> {
        let Some(value) = raw else {
            return Ok(Self::DEFAULT_SAMPLE_SIZE_LIMIT);
        };
        value
            .trim()
            .parse::<NonZeroUsize>()
            .map_err(|_| ConfigError::InvalidValue {
                name: SAMPLE_SIZE_LIMIT_VAR.to_string(),
                message: format!("'{value}' is not a positive integer"),
            })
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_SIZE_LIMIT)
    }
}
