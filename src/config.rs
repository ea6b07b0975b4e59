//! Pad configuration
//!
//! Line wiring and settle delay, persisted as JSON:
//!
//! ```json
//! {
//!   "binding": { "select": 2, "up": 3, "down": 4, "left": 5, "right": 6, "b": 7, "c": 8 },
//!   "settle_delay_us": 20
//! }
//! ```
//!
//! `settle_delay_us` may be omitted. The binding may not: every line has to
//! be named.

use crate::hal::DigitalIo;
use crate::pad::{GenesisPad, LineBinding, DEFAULT_SETTLE_DELAY_US};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_settle_delay() -> u32 {
    DEFAULT_SETTLE_DELAY_US
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadConfig {
    pub binding: LineBinding,
    #[serde(default = "default_settle_delay")]
    pub settle_delay_us: u32,
}

impl PadConfig {
    pub fn new(binding: LineBinding) -> Self {
        Self {
            binding,
            settle_delay_us: DEFAULT_SETTLE_DELAY_US,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid pad config: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize pad config: {}", e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read pad config {}: {}", path.display(), e))?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded pad config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write pad config {}: {}", path.display(), e))
    }

    /// Configure `io` and create a poller from this configuration.
    pub fn build<IO: DigitalIo>(&self, io: IO) -> GenesisPad<IO> {
        GenesisPad::with_settle_delay(io, self.binding, self.settle_delay_us)
    }
}
