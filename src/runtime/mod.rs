use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::SplitConfig;
use crate::io;
use crate::split;

mod manifest;
pub use manifest::{Manifest, ShardManifest};

/// Load the input file, cut it into shards, and write the shards out one at
/// a time in index order. Strictly sequential; a failed shard write aborts
/// the run and leaves the earlier shards on disk.
pub fn run_split(config: &SplitConfig) -> Result<()> {
    println!("Running split: {}", config.name);

    // Read input
    println!("  Reading input from: {}", config.input.path);
    let dataset = io::read_parquet(Path::new(&config.input.path))?;
    println!(
        "  Read {} rows in {} batches",
        dataset.num_rows(),
        dataset.batches().len()
    );

    let partitions = split::split_dataset(&dataset, config.shards)?;

    // Create output directory
    let out_dir = Path::new(&config.output.dir);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    // Create progress bar
    let pb = ProgressBar::new(config.shards as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} shards ({percent}%)",
            )
            .unwrap(),
    );

    // Write shards sequentially to keep index order
    let mut shard_manifests = Vec::with_capacity(partitions.len());
    for partition in &partitions {
        let path = shard_path(out_dir, config.output.pattern(), partition.index);
        io::write_parquet(dataset.schema(), &partition.batches, &path)
            .with_context(|| format!("Failed to write shard {}", partition.index))?;

        pb.println(format!(
            "  [{}] {} rows -> {}",
            partition.index,
            partition.rows,
            path.display()
        ));
        pb.inc(1);

        shard_manifests.push(ShardManifest {
            index: partition.index,
            path: path.to_string_lossy().to_string(),
            rows: partition.rows,
        });
    }
    pb.finish_with_message("All shards written");

    println!(
        "  ✓ Wrote {} shard files ({} rows total)",
        partitions.len(),
        dataset.num_rows()
    );

    // Write manifest last; it only exists for a fully completed run
    let manifest = Manifest::new(config, dataset.num_rows(), shard_manifests);
    let manifest_path = out_dir.join("manifest.json");
    manifest.write_to_file(&manifest_path)?;
    println!("  ✓ Manifest written to: {}", manifest_path.display());

    println!("\n✓ Split completed successfully!");
    Ok(())
}

/// Expand the shard name pattern for one shard index and join it onto the
/// output directory. Supports `{index}` and zero-padded forms like
/// `{index:05}`.
fn shard_path(dir: &Path, pattern: &str, index: usize) -> PathBuf {
    let re = regex::Regex::new(r"\{index(?::(\d+))?\}").unwrap();
    let name = re.replace_all(pattern, |caps: &regex::Captures| match caps.get(1) {
        Some(m) => {
            let width = m.as_str().parse::<usize>().unwrap_or(0);
            format!("{:0width$}", index, width = width)
        }
        None => index.to_string(),
    });
    dir.join(name.as_ref())
}
