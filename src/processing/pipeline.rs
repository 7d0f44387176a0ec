//! End-to-end pipeline: similarities → distances → MDS → affinity → clusters → medoids

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::affinity::AffinityBuilder;
use super::distance::build_distance_matrix;
use super::eigengap::EigengapEstimator;
use super::mds::Embedder;
use super::medoid::find_medoids;
use super::spectral::SpectralClusterer;
use crate::config::PipelineConfig;
use crate::core::{AffinityMatrix, ClusterReport, CoordinateSet, DistanceMatrix, SimilarityRecord, Term};
use crate::error::Result;
use crate::ui;

/// Runs the stages with one configuration.
///
/// Every randomized stage gets its own generator seeded from `config.seed`,
/// so `embed` followed by `cluster_coordinates` matches `run`.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
	config: PipelineConfig,
}

impl Pipeline {
	pub fn new(config: PipelineConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &PipelineConfig {
		&self.config
	}

	fn rng(&self) -> StdRng {
		StdRng::seed_from_u64(self.config.seed)
	}

	pub fn distance_matrix(&self, records: &[SimilarityRecord]) -> Result<DistanceMatrix> {
		let matrix = build_distance_matrix(records)?;
		ui::debug(&format!("Distance matrix over {} terms", matrix.len()));
		Ok(matrix)
	}

	pub fn embed(&self, matrix: &DistanceMatrix) -> Result<CoordinateSet> {
		let start = Instant::now();
		let coords = Embedder::new().embed(matrix, &mut self.rng())?;
		ui::debug(&format!("MDS finished in {:.2}s", start.elapsed().as_secs_f32()));
		Ok(coords)
	}

	fn affinity_builder(&self) -> AffinityBuilder {
		AffinityBuilder::new(self.config.affinity)
			.alpha(self.config.alpha)
			.neighbors(self.config.neighbors)
	}

	/// Cluster count to use: explicit, or estimated from the spectrum
	pub fn cluster_count(&self, affinity: &AffinityMatrix) -> Result<usize> {
		match self.config.clusters {
			Some(k) => Ok(k),
			None => {
				let k = EigengapEstimator::new(self.config.max_k)
					.deadline(self.config.deadline)
					.estimate(affinity)?;
				ui::info(&format!("Eigengap estimate: {} clusters", k));
				Ok(k)
			}
		}
	}

	/// Spectral clustering plus medoid extraction over a finished affinity graph
	pub fn cluster_affinity(&self, terms: Vec<Term>, affinity: &AffinityMatrix) -> Result<ClusterReport> {
		let k = self.cluster_count(affinity)?;

		let start = Instant::now();
		let assignment = SpectralClusterer::new(k)
			.deadline(self.config.deadline)
			.fit(affinity, &mut self.rng())?;
		ui::debug(&format!("Spectral clustering finished in {:.2}s", start.elapsed().as_secs_f32()));

		let medoids = find_medoids(affinity.distances(), &assignment)?;
		Ok(ClusterReport::build(terms, &assignment, &medoids, self.config.clone()))
	}

	/// Cluster terms that already have coordinates
	pub fn cluster_coordinates(&self, coords: &CoordinateSet) -> Result<ClusterReport> {
		let affinity = self.affinity_builder().from_coordinates(coords)?;
		self.cluster_affinity(coords.terms().to_vec(), &affinity)
	}

	/// Cluster directly on semantic distances, global kernel, no embedding
	pub fn cluster_distances(&self, matrix: &DistanceMatrix) -> Result<ClusterReport> {
		let affinity = self.affinity_builder().from_distances(matrix)?;
		self.cluster_affinity(matrix.terms().to_vec(), &affinity)
	}

	/// Full pipeline from similarity records
	pub fn run(&self, records: &[SimilarityRecord]) -> Result<ClusterReport> {
		let matrix = self.distance_matrix(records)?;
		if self.config.embed {
			let coords = self.embed(&matrix)?;
			self.cluster_coordinates(&coords)
		} else {
			self.cluster_distances(&matrix)
		}
	}
}
