//! # Command Implementations
//!
//! Each submodule handles one CLI command (embed, cluster, run).

pub mod cluster;
pub mod embed;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::core::ClusterReport;
use crate::storage::{self, is_stdout};
use crate::ui;

/// Write the report (and optional JSON export), then summarize it on stderr
pub(crate) fn finish(report: &ClusterReport, output: &Path, export: Option<&Path>) -> Result<()> {
	storage::write_report(report, output)
		.with_context(|| format!("Failed to write cluster report to {}", output.display()))?;
	if !is_stdout(output) {
		ui::success(&format!("Saved cluster report to {}", output.display()));
	}

	if let Some(export_path) = export {
		storage::write_json(report, export_path)
			.with_context(|| format!("Failed to export clusters to {}", export_path.display()))?;
		if !is_stdout(export_path) {
			ui::success(&format!("Exported to {}", export_path.display()));
		}
	}

	print_summary(report);
	Ok(())
}

fn print_summary(report: &ClusterReport) {
	ui::success(&format!(
		"{} clusters over {} terms",
		report.n_clusters,
		report.total_terms()
	));

	let sizes: Vec<usize> = report.clusters.iter().map(|c| c.members.len()).collect();
	if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
		let avg = sizes.iter().sum::<usize>() as f32 / sizes.len() as f32;
		ui::debug(&format!("Cluster sizes: min={}, max={}, avg={:.1}", min, max, avg));
	}

	if !ui::Log::is_verbose() {
		return;
	}
	for cluster in &report.clusters {
		eprintln!(
			"  {} {} ({} terms) {} {}",
			"Cluster".bright_white(),
			cluster.id.to_string().bright_cyan(),
			cluster.members.len(),
			"medoid".dimmed(),
			cluster.medoid.as_str().yellow()
		);
	}
}
