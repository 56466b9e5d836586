//! Top-level configuration.
//!
//! A configuration file is JSON; every field is optional and falls back to
//! its default:
//!
//! ```json
//! {
//!   "training": { "seed": 7, "real_samples": 4000 },
//!   "cascade": { "real_threshold": 4.5, "edit_distance_policy": "sampled" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detector::CascadeConfig;
use crate::error::Result;
use crate::training::TrainingConfig;

/// Settings for training and detection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexGuardConfig {
    pub training: TrainingConfig,
    pub cascade: CascadeConfig,
}

impl LexGuardConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: LexGuardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.cascade.validate()
    }
}
