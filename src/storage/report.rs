//! Cluster report and JSON export

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::output::write_atomic;
use crate::config::PipelineConfig;
use crate::core::ClusterReport;
use crate::error::{Error, Result, Stage};

/// `<term>\t<label>\t<True|False>`, one line per term in input order
pub fn render_report<W: Write + ?Sized>(report: &ClusterReport, out: &mut W) -> std::io::Result<()> {
	for (i, term) in report.terms.iter().enumerate() {
		let flag = if report.is_medoid(i) { "True" } else { "False" };
		writeln!(out, "{}\t{}\t{}", term, report.labels[i], flag)?;
	}
	Ok(())
}

pub fn write_report(report: &ClusterReport, path: &Path) -> Result<()> {
	write_atomic(path, |out| render_report(report, out))
}

#[derive(Debug, Serialize)]
struct ClusterExport<'a> {
	version: &'a str,
	timestamp: &'a str,
	params: &'a PipelineConfig,
	total_terms: usize,
	clusters: Vec<ClusterInfo<'a>>,
}

#[derive(Debug, Serialize)]
struct ClusterInfo<'a> {
	id: usize,
	size: usize,
	medoid: &'a str,
	medoid_mean_distance: f64,
	members: Vec<&'a str>,
}

fn export_json(report: &ClusterReport) -> serde_json::Result<String> {
	let clusters = report
		.clusters
		.iter()
		.map(|cluster| ClusterInfo {
			id: cluster.id,
			size: cluster.members.len(),
			medoid: cluster.medoid.as_str(),
			medoid_mean_distance: cluster.medoid_mean_distance,
			members: cluster.members.iter().map(|t| t.as_str()).collect(),
		})
		.collect();

	serde_json::to_string_pretty(&ClusterExport {
		version: &report.version,
		timestamp: &report.timestamp,
		params: &report.params,
		total_terms: report.total_terms(),
		clusters,
	})
}

pub fn write_json(report: &ClusterReport, path: &Path) -> Result<()> {
	let json = export_json(report).map_err(|e| Error::io(Stage::Output, e.into()))?;
	write_atomic(path, |out| writeln!(out, "{}", json))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{ClusterAssignment, Medoid, Term};

	fn report() -> ClusterReport {
		let terms: Vec<Term> = ["GO:1", "GO:2", "GO:3"].iter().map(|&t| Term::from(t)).collect();
		let assignment = ClusterAssignment::new(vec![0, 0, 1]);
		let medoids = [
			Medoid { label: 0, index: 1, mean_distance: 0.1 },
			Medoid { label: 1, index: 2, mean_distance: 0.0 },
		];
		ClusterReport::build(terms, &assignment, &medoids, PipelineConfig::default())
	}

	#[test]
	fn report_lines() {
		let mut out = Vec::new();
		render_report(&report(), &mut out).unwrap();
		assert_eq!(
			String::from_utf8(out).unwrap(),
			"GO:1\t0\tFalse\nGO:2\t0\tTrue\nGO:3\t1\tTrue\n"
		);
	}

	#[test]
	fn export_lists_clusters() {
		let value: serde_json::Value = serde_json::from_str(&export_json(&report()).unwrap()).unwrap();

		assert_eq!(value["total_terms"], 3);
		assert_eq!(value["params"]["affinity"], "local");
		assert_eq!(value["clusters"][0]["size"], 2);
		assert_eq!(value["clusters"][0]["medoid"], "GO:2");
		assert_eq!(value["clusters"][1]["members"], serde_json::json!(["GO:3"]));
	}

	#[test]
	fn export_file_is_valid_json() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("clusters.json");
		write_json(&report(), &path).unwrap();

		let text = std::fs::read_to_string(&path).unwrap();
		let value: serde_json::Value = serde_json::from_str(&text).unwrap();
		assert_eq!(value["clusters"].as_array().unwrap().len(), 2);
	}
}
