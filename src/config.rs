use std::path::PathBuf;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use toml::Value;

use crate::error::{Result, SimError};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimConfig {
    /// Path to the serialized vertex dataset.
    pub vertices: PathBuf,
    /// Round budget; exhausting it is a normal termination path.
    pub max_rounds: usize,
    /// Optional path for the full JSON report.
    pub report: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vertices: PathBuf::new(),
            max_rounds: 50,
            report: None,
        }
    }
}

/// Knobs of the modeled on-chip buffer and its processing lanes.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct BufferConfig {
    /// Working-set capacity in vertices.
    pub buffer_cap: usize,
    /// Eviction threshold: a vertex whose remaining degree falls to this
    /// value or below is evicted even if a dangling edge remains.
    pub gamma: u32,
    /// Number of edges the aggregation lanes consume per cycle.
    pub lane_width: u64,
    /// Bytes moved per off-chip access, for the data-volume estimate.
    pub word_size_bytes: u64,
    /// Seed value of the off-chip access counter, modeling the cost of the
    /// initial working-set load.
    pub initial_fetch_cost: u64,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            buffer_cap: 1024,
            gamma: 0,
            lane_width: 256,
            word_size_bytes: 128,
            initial_fetch_cost: 4096,
        }
    }
}

impl BufferConfig {
    pub fn validate(&self) -> Result<()> {
        if self.buffer_cap == 0 {
            return Err(SimError::InvalidConfiguration(
                "buffer_cap must be at least 1".into(),
            ));
        }
        if self.lane_width == 0 {
            return Err(SimError::InvalidConfiguration(
                "lane_width must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Self {
        match section {
            Some(value) => value.clone().try_into().expect("cannot deserialize config"),
            None => {
                warn!("config section not found");
                Self::default()
            }
        }
    }
}

impl Config for SimConfig {}
impl Config for BufferConfig {}
