use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SplitConfig;

/// Record of a completed split run, written to the output directory after
/// every shard has been written. An aborted run leaves no manifest behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub input_path: String,
    pub output_dir: String,
    pub shard_count: usize,
    pub total_rows: usize,
    pub shards: Vec<ShardManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShardManifest {
    pub index: usize,
    pub path: String,
    pub rows: usize,
}

impl Manifest {
    pub fn new(config: &SplitConfig, total_rows: usize, shards: Vec<ShardManifest>) -> Self {
        Self {
            name: config.name.clone(),
            input_path: config.input.path.clone(),
            output_dir: config.output.dir.clone(),
            shard_count: config.shards,
            total_rows,
            shards,
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}
