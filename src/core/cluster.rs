//! Cluster assignments, medoids and the final report

use serde::{Deserialize, Serialize};

use super::Term;
use crate::config::PipelineConfig;

/// Cluster label per term index. Labels only group terms, they carry no order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAssignment(Vec<usize>);

impl ClusterAssignment {
	pub fn new(labels: Vec<usize>) -> Self {
		Self(labels)
	}

	pub fn labels(&self) -> &[usize] {
		&self.0
	}

	pub fn label(&self, index: usize) -> usize {
		self.0[index]
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Distinct labels in ascending order
	pub fn distinct(&self) -> Vec<usize> {
		let mut labels = self.0.clone();
		labels.sort_unstable();
		labels.dedup();
		labels
	}

	/// Member indices of `label`, ascending
	pub fn members(&self, label: usize) -> Vec<usize> {
		self.0
			.iter()
			.enumerate()
			.filter(|&(_, &l)| l == label)
			.map(|(i, _)| i)
			.collect()
	}
}

/// Representative term index of one cluster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Medoid {
	pub label: usize,
	pub index: usize,
	/// Mean distance to the other members of the cluster
	pub mean_distance: f64,
}

/// One cluster in the report, members in term order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
	pub id: usize,
	pub members: Vec<Term>,
	pub medoid: Term,
	pub medoid_mean_distance: f64,
}

/// Complete clustering result for one similarity table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
	/// gocluster version that created this
	pub version: String,
	/// When clustering was performed
	pub timestamp: String,
	pub params: PipelineConfig,
	/// Cluster count actually used (explicit or estimated)
	pub n_clusters: usize,
	pub terms: Vec<Term>,
	pub labels: Vec<usize>,
	pub medoid_flags: Vec<bool>,
	pub clusters: Vec<Cluster>,
}

impl ClusterReport {
	pub fn build(
		terms: Vec<Term>,
		assignment: &ClusterAssignment,
		medoids: &[Medoid],
		params: PipelineConfig,
	) -> Self {
		let mut medoid_flags = vec![false; terms.len()];
		for medoid in medoids {
			medoid_flags[medoid.index] = true;
		}

		let clusters: Vec<Cluster> = medoids
			.iter()
			.map(|medoid| Cluster {
				id: medoid.label,
				members: assignment
					.members(medoid.label)
					.into_iter()
					.map(|i| terms[i].clone())
					.collect(),
				medoid: terms[medoid.index].clone(),
				medoid_mean_distance: medoid.mean_distance,
			})
			.collect();

		Self {
			version: env!("CARGO_PKG_VERSION").to_string(),
			timestamp: chrono::Utc::now().to_rfc3339(),
			params,
			n_clusters: clusters.len(),
			terms,
			labels: assignment.labels().to_vec(),
			medoid_flags,
			clusters,
		}
	}

	pub fn total_terms(&self) -> usize {
		self.terms.len()
	}

	pub fn is_medoid(&self, index: usize) -> bool {
		self.medoid_flags[index]
	}
}
