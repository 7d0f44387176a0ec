//! Run command - the whole pipeline from a similarity table

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::{OutputArgs, PipelineArgs};
use crate::processing::Pipeline;
use crate::storage;
use crate::ui;

pub fn run(input: &Path, no_embed: bool, output: &OutputArgs, args: &PipelineArgs) -> Result<()> {
	let start = Instant::now();
	let pipeline = Pipeline::new(args.to_config(!no_embed));

	let records = storage::read_similarities(input)
		.with_context(|| format!("Failed to read similarities from {}", input.display()))?;
	ui::info(&format!("Loaded {} similarity records", records.len()));

	if no_embed {
		ui::debug("Skipping MDS, clustering on similarity distances");
	}

	let report = pipeline.run(&records)?;
	super::finish(&report, &output.output, output.export.as_deref())?;

	eprintln!("{}", format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed());
	Ok(())
}
