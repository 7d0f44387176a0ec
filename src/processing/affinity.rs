//! Exponential-kernel affinity matrices
//!
//! Two kernels are offered:
//!
//! ```text
//! global:  A_ij = exp(-alpha * d_ij)
//! local:   A_ij = exp(-d_ij^2 / (sigma_i * sigma_j))
//! ```
//!
//! For the local (self-tuning) kernel the coordinates are z-scored per axis
//! first, and `sigma_i` is the median distance from point `i` to its `nn`
//! nearest neighbours. Dense regions get small bandwidths, sparse regions
//! large ones.

use ndarray::Array2;

use super::geometry::{median, pairwise_distances, zscore_columns};
use crate::config::{AffinityMode, DEFAULT_ALPHA, DEFAULT_NEIGHBORS, MIN_LOCAL_SCALE};
use crate::core::{AffinityMatrix, CoordinateSet, DistanceMatrix};
use crate::error::{Error, Result, Stage};
use crate::ui;

/// Affinity kernel settings
#[derive(Debug, Clone)]
pub struct AffinityBuilder {
	mode: AffinityMode,
	alpha: f64,
	neighbors: usize,
}

impl Default for AffinityBuilder {
	fn default() -> Self {
		Self {
			mode: AffinityMode::default(),
			alpha: DEFAULT_ALPHA,
			neighbors: DEFAULT_NEIGHBORS,
		}
	}
}

impl AffinityBuilder {
	pub fn new(mode: AffinityMode) -> Self {
		Self {
			mode,
			..Self::default()
		}
	}

	/// Bandwidth of the global kernel
	pub fn alpha(mut self, alpha: f64) -> Self {
		self.alpha = alpha;
		self
	}

	/// Neighbour count for the local scale
	pub fn neighbors(mut self, nn: usize) -> Self {
		self.neighbors = nn;
		self
	}

	pub fn mode(&self) -> AffinityMode {
		self.mode
	}

	/// Affinity over embedded coordinates, with the kernel selected by `mode`
	pub fn from_coordinates(&self, coords: &CoordinateSet) -> Result<AffinityMatrix> {
		if coords.is_empty() {
			return Err(Error::dimension(Stage::Affinity, "no coordinates"));
		}
		ui::debug(&format!(
			"Affinity ({:?}) over {} points in {}D",
			self.mode,
			coords.len(),
			coords.dims()
		));

		match self.mode {
			AffinityMode::Global => {
				self.check_alpha()?;
				let distances = pairwise_distances(coords.points());
				let values = global_kernel(&distances, self.alpha);
				Ok(AffinityMatrix::new(values, distances))
			}
			AffinityMode::Local => {
				let scaled = zscore_columns(coords.points());
				let distances = pairwise_distances(&scaled);
				let sigma = local_scales(&distances, self.neighbors);
				let values = local_kernel(&distances, &sigma);
				Ok(AffinityMatrix::new(values, distances))
			}
		}
	}

	/// Global-scale affinity straight from a semantic distance matrix, skipping the embedding.
	///
	/// The local kernel needs coordinates, so this always uses `exp(-alpha * d)`.
	pub fn from_distances(&self, matrix: &DistanceMatrix) -> Result<AffinityMatrix> {
		if matrix.is_empty() {
			return Err(Error::dimension(Stage::Affinity, "empty distance matrix"));
		}
		if self.mode == AffinityMode::Local {
			ui::debug("Local scaling needs coordinates, using the global kernel on raw distances");
		}
		self.check_alpha()?;

		let distances = matrix.values().clone();
		let values = global_kernel(&distances, self.alpha);
		Ok(AffinityMatrix::new(values, distances))
	}

	fn check_alpha(&self) -> Result<()> {
		if self.alpha.is_finite() && self.alpha > 0.0 {
			Ok(())
		} else {
			Err(Error::degenerate(
				Stage::Affinity,
				format!("kernel bandwidth alpha must be positive, got {}", self.alpha),
			))
		}
	}
}

/// exp(-alpha * d), kept strictly positive
pub fn global_kernel(distances: &Array2<f64>, alpha: f64) -> Array2<f64> {
	distances.mapv(|d| clamp_affinity((-alpha * d).exp()))
}

/// Median distance to the `nn` nearest other points, floored at [`MIN_LOCAL_SCALE`].
///
/// `nn` is clamped to N - 1. A lone point gets scale 1.
pub fn local_scales(distances: &Array2<f64>, nn: usize) -> Vec<f64> {
	let n = distances.nrows();
	let k = nn.clamp(1, n.saturating_sub(1).max(1));

	(0..n)
		.map(|i| {
			if n == 1 {
				return 1.0;
			}
			let mut others: Vec<f64> = (0..n).filter(|&j| j != i).map(|j| distances[[i, j]]).collect();
			others.sort_by(|a, b| a.total_cmp(b));
			others.truncate(k);
			median(&mut others).max(MIN_LOCAL_SCALE)
		})
		.collect()
}

/// exp(-d_ij^2 / (sigma_i * sigma_j)), kept strictly positive
pub fn local_kernel(distances: &Array2<f64>, sigma: &[f64]) -> Array2<f64> {
	let n = distances.nrows();
	Array2::from_shape_fn((n, n), |(i, j)| {
		let d = distances[[i, j]];
		if d == 0.0 {
			return 1.0;
		}
		clamp_affinity((-(d * d) / (sigma[i] * sigma[j])).exp())
	})
}

/// Keep affinities inside (0, 1] when the exponential underflows
fn clamp_affinity(value: f64) -> f64 {
	value.clamp(f64::MIN_POSITIVE, 1.0)
}
