//! JSON exporter for downstream analysis and plotting.
//!
//! Writes one run (config, seed, full diagnostic series and snapshots) as a
//! single pretty-printed JSON document.

use crate::config::WalkConfig;
use crate::result::SimulationResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunExport {
    /// Preset name (or "custom")
    pub preset: String,

    /// Seed used
    pub seed: u64,

    /// Parameters of the run
    pub config: WalkConfig,

    /// Diagnostics and snapshots
    pub result: SimulationResult,
}

impl RunExport {
    /// Creates a new export container.
    pub fn new(preset: &str, config: WalkConfig, result: SimulationResult) -> Self {
        Self {
            preset: preset.to_string(),
            seed: config.seed,
            config,
            result,
        }
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
