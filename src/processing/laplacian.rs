//! Graph Laplacians and the self-adjoint eigensolver behind them

use faer::{Mat, Side};
use ndarray::Array2;

use crate::error::{Error, Result, Stage};

/// L = I - A
pub fn unnormalized(affinity: &Array2<f64>) -> Array2<f64> {
	let n = affinity.nrows();
	Array2::from_shape_fn((n, n), |(i, j)| {
		let identity = if i == j { 1.0 } else { 0.0 };
		identity - affinity[[i, j]]
	})
}

/// L_sym = I - D^{-1/2} A D^{-1/2}, with D the row sums of A
pub fn normalized(affinity: &Array2<f64>) -> Array2<f64> {
	let n = affinity.nrows();
	let inv_sqrt_degree: Vec<f64> = affinity
		.rows()
		.into_iter()
		.map(|row| 1.0 / row.sum().max(f64::MIN_POSITIVE).sqrt())
		.collect();

	Array2::from_shape_fn((n, n), |(i, j)| {
		let identity = if i == j { 1.0 } else { 0.0 };
		identity - inv_sqrt_degree[i] * affinity[[i, j]] * inv_sqrt_degree[j]
	})
}

fn to_faer(values: &Array2<f64>) -> Mat<f64> {
	Mat::from_fn(values.nrows(), values.ncols(), |i, j| values[[i, j]])
}

/// Full spectrum of a symmetric matrix, ascending
pub fn symmetric_eigenvalues(matrix: &Array2<f64>, stage: Stage) -> Result<Vec<f64>> {
	let mut values = to_faer(matrix).selfadjoint_eigenvalues(Side::Lower);
	if values.iter().any(|v| !v.is_finite()) {
		return Err(Error::degenerate(stage, "eigenvalues are not finite"));
	}
	values.sort_by(|a, b| a.total_cmp(b));
	Ok(values)
}

/// Eigenvectors of the `k` smallest eigenvalues as the columns of an n x k matrix
pub fn smallest_eigenvectors(matrix: &Array2<f64>, k: usize, stage: Stage) -> Result<Array2<f64>> {
	let n = matrix.nrows();
	if k > n {
		return Err(Error::dimension(stage, format!("{} eigenvectors requested from a {}x{} matrix", k, n, n)));
	}

	let eig = to_faer(matrix).selfadjoint_eigendecomposition(Side::Lower);
	let s = eig.s().column_vector();
	let u = eig.u();

	let mut order: Vec<usize> = (0..n).collect();
	order.sort_by(|&a, &b| s.read(a).total_cmp(&s.read(b)));

	let vectors = Array2::from_shape_fn((n, k), |(i, c)| u.read(i, order[c]));
	if vectors.iter().any(|v| !v.is_finite()) {
		return Err(Error::degenerate(stage, "eigenvectors are not finite"));
	}
	Ok(vectors)
}
