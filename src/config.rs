use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tuning knobs for the block extraction pipeline.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PipelineConfig {
    /// L2 distance in lat/lon space under which nodes are merged.
    pub merge_threshold: f64,
    /// Maximum path length (in nodes) for the ring search.
    pub max_ring_len: usize,
    /// Flip the pixel y axis so that (0, 0) is the top-left corner, the
    /// usual display convention.
    pub flip_y: bool,
    /// Fail fast if more road nodes than this reach the O(n^2) merge stage.
    pub max_nodes: Option<usize>,
    /// Fail fast if more candidate blocks than this reach the O(b^2)
    /// encompass filter.
    pub max_blocks: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merge_threshold: 1e-4,
            max_ring_len: 7,
            flip_y: true,
            max_nodes: None,
            max_blocks: None,
        }
    }
}

impl PipelineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: PipelineConfig =
            toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
