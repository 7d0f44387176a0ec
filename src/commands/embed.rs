//! Embed command - similarity table to MDS coordinates

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::config::PipelineConfig;
use crate::processing::Pipeline;
use crate::storage::{self, is_stdout};
use crate::ui;

pub fn run(input: &Path, output: &Path, seed: u64) -> Result<()> {
	let start = Instant::now();

	let records = storage::read_similarities(input)
		.with_context(|| format!("Failed to read similarities from {}", input.display()))?;
	ui::info(&format!("Loaded {} similarity records", records.len()));

	let pipeline = Pipeline::new(PipelineConfig {
		seed,
		..PipelineConfig::default()
	});
	let matrix = pipeline.distance_matrix(&records)?;
	ui::info(&format!("Embedding {} terms", matrix.len()));

	let coords = pipeline.embed(&matrix)?;
	storage::write_coordinates(&coords, output)
		.with_context(|| format!("Failed to write coordinates to {}", output.display()))?;

	if !is_stdout(output) {
		ui::success(&format!("Saved coordinates to {}", output.display()));
	}
	eprintln!("{}", format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed());
	Ok(())
}
