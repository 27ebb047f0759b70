//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline constants (load address, cycle cap).
//! 2. **Structures:** General, memory and pipeline sections.
//! 3. **Loading:** JSON deserialization and validation.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with
//! `Config::default()`. Every field is optional in JSON.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants::WORD_BYTES;
use crate::common::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Byte address where the first instruction is loaded.
    pub const LOAD_ADDRESS: u32 = 96;

    /// Upper bound on simulated cycles before a run is abandoned.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Keep cycling the back end after the halt word is fetched.
    pub const DRAIN_ON_HALT: bool = true;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.load_address, 96);
/// assert!(config.pipeline.drain_on_halt);
/// ```
///
/// Deserializing a partial document keeps defaults for the missing fields:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::from_json_str(r#"{ "memory": { "load_address": 256 } }"#).unwrap();
/// assert_eq!(config.memory.load_address, 256);
/// assert_eq!(config.general.max_cycles, 10_000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Memory image layout
    pub memory: MemoryConfig,
    /// Pipeline orchestration settings
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the load address is not word
    /// aligned or the cycle cap is zero.
    pub fn validate(&self) -> Result<()> {
        if self.memory.load_address % WORD_BYTES != 0 {
            return Err(SimError::InvalidConfig(format!(
                "load_address {} is not a multiple of {WORD_BYTES}",
                self.memory.load_address
            )));
        }
        if self.general.max_cycles == 0 {
            return Err(SimError::InvalidConfig(
                "max_cycles must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Emit a `tracing` debug event for every stage outcome.
    pub trace_stages: bool,

    /// Maximum number of cycles to simulate before giving up.
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_stages: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Memory image layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Byte address of the first instruction word.
    pub load_address: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            load_address: defaults::LOAD_ADDRESS,
        }
    }
}

/// Pipeline orchestration settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// After Fetch sees the halt word, keep running WriteBack, Execute, Memory
    /// and Issue until a cycle makes no progress. When false the run ends on
    /// the halt cycle itself.
    pub drain_on_halt: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            drain_on_halt: defaults::DRAIN_ON_HALT,
        }
    }
}
