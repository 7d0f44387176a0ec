//! Metric multidimensional scaling (SMACOF stress majorization)

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;

use super::geometry::pairwise_distances;
use crate::config::{MDS_COMPONENTS, MDS_EPS, MDS_MAX_ITER, MDS_N_INIT};
use crate::core::{CoordinateSet, DistanceMatrix};
use crate::error::{Error, Result, Stage};
use crate::ui;

/// Floor for embedded distances in the Guttman transform
const MIN_EMBEDDED_DISTANCE: f64 = 1e-5;

/// SMACOF parameters
#[derive(Debug, Clone)]
pub struct Embedder {
	n_components: usize,
	n_init: usize,
	max_iter: usize,
	eps: f64,
}

impl Default for Embedder {
	fn default() -> Self {
		Self {
			n_components: MDS_COMPONENTS,
			n_init: MDS_N_INIT,
			max_iter: MDS_MAX_ITER,
			eps: MDS_EPS,
		}
	}
}

struct Run {
	points: Array2<f64>,
	stress: f64,
	iterations: usize,
}

impl Embedder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn n_components(mut self, n: usize) -> Self {
		self.n_components = n.max(1);
		self
	}

	pub fn n_init(mut self, n: usize) -> Self {
		self.n_init = n.max(1);
		self
	}

	pub fn max_iter(mut self, n: usize) -> Self {
		self.max_iter = n.max(1);
		self
	}

	pub fn eps(mut self, eps: f64) -> Self {
		self.eps = eps;
		self
	}

	/// Place every term so that embedded distances approximate the matrix.
	///
	/// Each restart draws its initial layout from `rng`; the lowest-stress run wins.
	pub fn embed(&self, matrix: &DistanceMatrix, rng: &mut StdRng) -> Result<CoordinateSet> {
		let dissimilarities = matrix.values();
		crate::core::matrix::ensure_square_symmetric(dissimilarities, Stage::Embedding)?;

		let n = matrix.len();
		if n == 0 {
			return Err(Error::dimension(Stage::Embedding, "cannot embed an empty matrix"));
		}

		ui::debug(&format!(
			"MDS: {} terms into {}D ({} inits, max {} iterations)",
			n, self.n_components, self.n_init, self.max_iter
		));

		if n == 1 {
			let points = Array2::<f64>::zeros((1, self.n_components));
			return CoordinateSet::new(matrix.terms().to_vec(), points);
		}

		let mut best: Option<Run> = None;
		for init in 0..self.n_init {
			let run = self.smacof_single(dissimilarities, rng);
			ui::debug(&format!(
				"MDS init {}: stress {:.6} after {} iterations",
				init + 1,
				run.stress,
				run.iterations
			));

			let better = match &best {
				None => true,
				Some(b) => run.stress < b.stress,
			};
			if better {
				best = Some(run);
			}
		}

		let best = best.ok_or_else(|| Error::degenerate(Stage::Embedding, "no MDS run completed"))?;
		if !best.stress.is_finite() {
			return Err(Error::degenerate(Stage::Embedding, "stress diverged"));
		}

		CoordinateSet::new(matrix.terms().to_vec(), best.points)
	}

	fn smacof_single(&self, dissimilarities: &Array2<f64>, rng: &mut StdRng) -> Run {
		let n = dissimilarities.nrows();
		let dims = self.n_components;

		let mut points = Array2::<f64>::zeros((n, dims));
		for v in points.iter_mut() {
			*v = rng.random_range(0.0..1.0);
		}

		let mut old_stress: Option<f64> = None;
		let mut stress = f64::INFINITY;
		let mut iterations = 0;

		for it in 0..self.max_iter {
			iterations = it + 1;
			let embedded = pairwise_distances(&points);

			stress = embedded
				.iter()
				.zip(dissimilarities.iter())
				.map(|(d, delta)| (d - delta) * (d - delta))
				.sum::<f64>()
				/ 2.0;

			points = guttman_transform(&points, &embedded, dissimilarities);

			let norm: f64 = points
				.rows()
				.into_iter()
				.map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
				.sum();
			if norm == 0.0 {
				break;
			}

			let normalized = stress / norm;
			if let Some(old) = old_stress {
				if old - normalized < self.eps {
					break;
				}
			}
			old_stress = Some(normalized);
		}

		Run {
			points,
			stress,
			iterations,
		}
	}
}

/// X' = B(X) X / n
fn guttman_transform(points: &Array2<f64>, embedded: &Array2<f64>, dissimilarities: &Array2<f64>) -> Array2<f64> {
	let n = points.nrows();
	let dims = points.ncols();

	let rows: Vec<Vec<f64>> = (0..n)
		.into_par_iter()
		.map(|i| {
			let mut row = vec![0.0; dims];
			let mut diagonal = 0.0;
			for j in 0..n {
				if i == j {
					continue;
				}
				let ratio = dissimilarities[[i, j]] / embedded[[i, j]].max(MIN_EMBEDDED_DISTANCE);
				diagonal += ratio;
				for (d, value) in row.iter_mut().enumerate() {
					*value -= ratio * points[[j, d]];
				}
			}
			for (d, value) in row.iter_mut().enumerate() {
				*value = (*value + diagonal * points[[i, d]]) / n as f64;
			}
			row
		})
		.collect();

	let mut updated = Array2::<f64>::zeros((n, dims));
	for (i, row) in rows.into_iter().enumerate() {
		for (d, value) in row.into_iter().enumerate() {
			updated[[i, d]] = value;
		}
	}
	updated
}
