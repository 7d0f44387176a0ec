//! Cluster count estimation with the eigengap heuristic
//!
//! The spectrum of `L = I - A` is sorted ascending and truncated to the first
//! `k = min(max_k, N)` eigenvalues. A large jump after the j-th eigenvalue
//! suggests j well separated groups. The one-cluster answer is never chosen
//! when N > 1. This is an approximation: noisy or tiny graphs can fool it.

use std::time::Duration;

use super::deadline::run_with_deadline;
use super::laplacian;
use crate::config::DEFAULT_MAX_K;
use crate::core::AffinityMatrix;
use crate::error::{Error, Result, Stage};
use crate::ui;

#[derive(Debug, Clone)]
pub struct EigengapEstimator {
	max_k: usize,
	deadline: Option<Duration>,
}

impl Default for EigengapEstimator {
	fn default() -> Self {
		Self {
			max_k: DEFAULT_MAX_K,
			deadline: None,
		}
	}
}

impl EigengapEstimator {
	pub fn new(max_k: usize) -> Self {
		Self {
			max_k,
			..Self::default()
		}
	}

	pub fn deadline(mut self, limit: Option<Duration>) -> Self {
		self.deadline = limit;
		self
	}

	/// Estimated number of clusters in [1, min(max_k, N)]
	pub fn estimate(&self, affinity: &AffinityMatrix) -> Result<usize> {
		let n = affinity.len();
		if n == 0 {
			return Err(Error::dimension(Stage::Eigengap, "empty affinity matrix"));
		}
		if self.max_k == 0 {
			return Err(Error::dimension(Stage::Eigengap, "max_k must be at least 1"));
		}

		let k = self.max_k.min(n);
		if k == 1 {
			return Ok(1);
		}

		ui::debug(&format!("Eigengap: spectrum of {}x{} Laplacian, k <= {}", n, n, k));

		let laplacian = laplacian::unnormalized(affinity.values());
		let eigenvalues = run_with_deadline(Stage::Eigengap, self.deadline, move || {
			laplacian::symmetric_eigenvalues(&laplacian, Stage::Eigengap)
		})?;

		let count = select_count(&eigenvalues[..k]);
		ui::debug(&format!("Eigengap: selected {} clusters", count));
		Ok(count)
	}
}

/// Pick the count from an ascending, already truncated spectrum.
///
/// With `gap_i = λ_{i+2} - λ_{i+1}` for `i` in `[0, k - 2)` the count is
/// `argmax_i + 2`; the earliest of equal gaps wins.
pub fn select_count(eigenvalues: &[f64]) -> usize {
	let k = eigenvalues.len();
	if k <= 2 {
		return k.max(1);
	}

	let mut best_index = 0;
	let mut best_gap = f64::NEG_INFINITY;
	for i in 0..(k - 2) {
		let gap = eigenvalues[i + 2] - eigenvalues[i + 1];
		if gap > best_gap {
			best_gap = gap;
			best_index = i;
		}
	}

	best_index + 2
}
