//! Cluster command - coordinates to clusters and medoids

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::{OutputArgs, PipelineArgs};
use crate::processing::Pipeline;
use crate::storage;
use crate::ui;

pub fn run(input: &Path, output: &OutputArgs, args: &PipelineArgs) -> Result<()> {
	let start = Instant::now();
	let config = args.to_config(true);

	ui::debug(&format!(
		"Starting clustering: affinity={:?}, clusters={:?}, seed={}",
		config.affinity, config.clusters, config.seed
	));

	let coords = storage::read_coordinates(input)
		.with_context(|| format!("Failed to read coordinates from {}", input.display()))?;
	ui::info(&format!("Loaded {} terms in {}D", coords.len(), coords.dims()));

	let report = Pipeline::new(config).cluster_coordinates(&coords)?;
	super::finish(&report, &output.output, output.export.as_deref())?;

	eprintln!("{}", format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed());
	Ok(())
}
