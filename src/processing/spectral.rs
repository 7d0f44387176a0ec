//! Spectral clustering of a precomputed affinity graph
//!
//! ```text
//! 1. L_sym = I - D^{-1/2} A D^{-1/2}
//! 2. U = eigenvectors of the k smallest eigenvalues of L_sym (n x k)
//! 3. Normalize rows of U to unit length (Ng, Jordan, Weiss)
//! 4. Seeded k-means on the rows of U
//! ```
//!
//! The affinity is consumed as-is; no kernel is applied to it here.

use std::time::Duration;

use ndarray::Array2;
use rand::rngs::StdRng;

use super::deadline::run_with_deadline;
use super::kmeans::Kmeans;
use super::laplacian;
use crate::config::KMEANS_N_INIT;
use crate::core::{AffinityMatrix, ClusterAssignment};
use crate::error::{Error, Result, Stage};
use crate::ui;

#[derive(Debug, Clone)]
pub struct SpectralClusterer {
	n_clusters: usize,
	n_init: usize,
	deadline: Option<Duration>,
}

impl SpectralClusterer {
	pub fn new(n_clusters: usize) -> Self {
		Self {
			n_clusters,
			n_init: KMEANS_N_INIT,
			deadline: None,
		}
	}

	/// k-means restarts on the embedding
	pub fn n_init(mut self, n: usize) -> Self {
		self.n_init = n.max(1);
		self
	}

	pub fn deadline(mut self, limit: Option<Duration>) -> Self {
		self.deadline = limit;
		self
	}

	/// Exactly `n_clusters` non-empty clusters, labels renumbered by first appearance
	pub fn fit(&self, affinity: &AffinityMatrix, rng: &mut StdRng) -> Result<ClusterAssignment> {
		let n = affinity.len();
		let k = self.n_clusters;
		if k < 1 || k > n {
			return Err(Error::dimension(
				Stage::Spectral,
				format!("cannot create {} clusters from {} terms", k, n),
			));
		}

		if k == 1 {
			return Ok(ClusterAssignment::new(vec![0; n]));
		}

		ui::debug(&format!("Spectral: {} nodes into {} clusters", n, k));

		let laplacian = laplacian::normalized(affinity.values());
		let mut embedding = run_with_deadline(Stage::Spectral, self.deadline, move || {
			laplacian::smallest_eigenvectors(&laplacian, k, Stage::Spectral)
		})?;
		normalize_rows(&mut embedding);

		let result = Kmeans::new(k).n_init(self.n_init).fit(&embedding, rng);
		ui::debug(&format!("Spectral: k-means inertia {:.6}", result.inertia));

		Ok(ClusterAssignment::new(relabel_by_first_appearance(&result.labels)))
	}
}

fn normalize_rows(embedding: &mut Array2<f64>) {
	for mut row in embedding.rows_mut() {
		let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
		if norm > 0.0 {
			row.mapv_inplace(|v| v / norm);
		}
	}
}

/// First term gets label 0, the next unseen label becomes 1, and so on
fn relabel_by_first_appearance(labels: &[usize]) -> Vec<usize> {
	let mut mapping: Vec<Option<usize>> = vec![None; labels.iter().max().map_or(0, |m| m + 1)];
	let mut next = 0;
	labels
		.iter()
		.map(|&label| {
			*mapping[label].get_or_insert_with(|| {
				next += 1;
				next - 1
			})
		})
		.collect()
}
