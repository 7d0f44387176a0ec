//! Square matrices and coordinate sets exchanged between pipeline stages

use ndarray::{Array2, ArrayView1};

use super::Term;
use crate::error::{Error, Result, Stage};

/// Absolute tolerance for the symmetry check
const SYMMETRY_TOL: f64 = 1e-9;

/// Length of the condensed (strict upper triangle) form of an n x n matrix
pub fn condensed_len(n: usize) -> usize {
	n * n.saturating_sub(1) / 2
}

/// Symmetric, zero-diagonal matrix of semantic distances over ordered terms
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
	terms: Vec<Term>,
	values: Array2<f64>,
}

impl DistanceMatrix {
	/// Wrap a full matrix, checking that it is square, symmetric and aligned with `terms`
	pub fn new(terms: Vec<Term>, values: Array2<f64>) -> Result<Self> {
		ensure_square_symmetric(&values, Stage::DistanceMatrix)?;
		if values.nrows() != terms.len() {
			return Err(Error::dimension(
				Stage::DistanceMatrix,
				format!("{} terms for a {}x{} matrix", terms.len(), values.nrows(), values.ncols()),
			));
		}
		Ok(Self { terms, values })
	}

	/// Expand a condensed vector (strict upper triangle, row-major) into the full matrix.
	///
	/// Same layout as scipy's `squareform`: both halves are filled and the diagonal is zero.
	pub fn from_condensed(terms: Vec<Term>, condensed: &[f64]) -> Result<Self> {
		let n = terms.len();
		let expected = condensed_len(n);
		if condensed.len() != expected {
			return Err(Error::malformed(
				Stage::DistanceMatrix,
				format!(
					"condensed vector has {} entries, {} terms need {}",
					condensed.len(),
					n,
					expected
				),
			));
		}

		let mut values = Array2::<f64>::zeros((n, n));
		let mut k = 0;
		for i in 0..n {
			for j in (i + 1)..n {
				values[[i, j]] = condensed[k];
				values[[j, i]] = condensed[k];
				k += 1;
			}
		}

		Ok(Self { terms, values })
	}

	/// Strict upper triangle in row-major order
	pub fn to_condensed(&self) -> Vec<f64> {
		upper_triangle(&self.values)
	}

	pub fn terms(&self) -> &[Term] {
		&self.terms
	}

	pub fn values(&self) -> &Array2<f64> {
		&self.values
	}

	pub fn len(&self) -> usize {
		self.terms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}

	pub fn get(&self, i: usize, j: usize) -> f64 {
		self.values[[i, j]]
	}

	pub fn into_parts(self) -> (Vec<Term>, Array2<f64>) {
		(self.terms, self.values)
	}
}

/// 2-D placement of terms, row `i` belongs to term `i`
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSet {
	terms: Vec<Term>,
	points: Array2<f64>,
}

impl CoordinateSet {
	pub fn new(terms: Vec<Term>, points: Array2<f64>) -> Result<Self> {
		if points.nrows() != terms.len() {
			return Err(Error::dimension(
				Stage::Embedding,
				format!("{} terms for {} coordinate rows", terms.len(), points.nrows()),
			));
		}
		if points.iter().any(|v| !v.is_finite()) {
			return Err(Error::degenerate(Stage::Embedding, "coordinates contain non-finite values"));
		}
		Ok(Self { terms, points })
	}

	pub fn terms(&self) -> &[Term] {
		&self.terms
	}

	pub fn points(&self) -> &Array2<f64> {
		&self.points
	}

	pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
		self.points.row(i)
	}

	pub fn dims(&self) -> usize {
		self.points.ncols()
	}

	pub fn len(&self) -> usize {
		self.terms.len()
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}
}

/// Kernel similarities in (0, 1] plus the node distances they were computed from
#[derive(Debug, Clone)]
pub struct AffinityMatrix {
	values: Array2<f64>,
	distances: Array2<f64>,
}

impl AffinityMatrix {
	pub(crate) fn new(values: Array2<f64>, distances: Array2<f64>) -> Self {
		Self { values, distances }
	}

	/// Use an externally computed similarity graph
	pub fn precomputed(values: Array2<f64>, distances: Array2<f64>) -> Result<Self> {
		ensure_square_symmetric(&values, Stage::Affinity)?;
		ensure_square_symmetric(&distances, Stage::Affinity)?;
		if values.nrows() != distances.nrows() {
			return Err(Error::dimension(
				Stage::Affinity,
				format!("affinity is {}x{}, distances are {}x{}", values.nrows(), values.ncols(), distances.nrows(), distances.ncols()),
			));
		}
		Ok(Self { values, distances })
	}

	pub fn values(&self) -> &Array2<f64> {
		&self.values
	}

	/// Node-to-node distances used for medoid selection
	pub fn distances(&self) -> &Array2<f64> {
		&self.distances
	}

	pub fn len(&self) -> usize {
		self.values.nrows()
	}

	pub fn is_empty(&self) -> bool {
		self.values.nrows() == 0
	}
}

pub(crate) fn upper_triangle(values: &Array2<f64>) -> Vec<f64> {
	let n = values.nrows();
	let mut condensed = Vec::with_capacity(condensed_len(n));
	for i in 0..n {
		for j in (i + 1)..n {
			condensed.push(values[[i, j]]);
		}
	}
	condensed
}

/// Reject matrices that are not square, not finite, or not symmetric
pub(crate) fn ensure_square_symmetric(values: &Array2<f64>, stage: Stage) -> Result<()> {
	let (rows, cols) = values.dim();
	if rows != cols {
		return Err(Error::dimension(stage, format!("matrix is {}x{}, expected square", rows, cols)));
	}
	if values.iter().any(|v| !v.is_finite()) {
		return Err(Error::degenerate(stage, "matrix contains non-finite values"));
	}
	for i in 0..rows {
		for j in (i + 1)..cols {
			let (a, b) = (values[[i, j]], values[[j, i]]);
			if (a - b).abs() > SYMMETRY_TOL {
				return Err(Error::dimension(
					stage,
					format!("matrix is not symmetric at ({}, {}): {} vs {}", i, j, a, b),
				));
			}
		}
	}
	Ok(())
}
