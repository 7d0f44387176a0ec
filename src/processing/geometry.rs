//! Pairwise distances and per-axis statistics on coordinate rows

use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Full Euclidean distance matrix between the rows of `points`
pub fn pairwise_distances(points: &Array2<f64>) -> Array2<f64> {
	let n = points.nrows();

	let rows: Vec<Vec<f64>> = (0..n)
		.into_par_iter()
		.map(|i| {
			let a = points.row(i);
			(0..n)
				.map(|j| {
					if i == j {
						return 0.0;
					}
					a.iter()
						.zip(points.row(j).iter())
						.map(|(x, y)| (x - y) * (x - y))
						.sum::<f64>()
						.sqrt()
				})
				.collect()
		})
		.collect();

	let mut distances = Array2::<f64>::zeros((n, n));
	for (i, row) in rows.into_iter().enumerate() {
		for (j, d) in row.into_iter().enumerate() {
			distances[[i, j]] = d;
		}
	}
	distances
}

/// Standardize each column to zero mean and unit (population) variance.
///
/// A constant column is only centered.
pub fn zscore_columns(points: &Array2<f64>) -> Array2<f64> {
	let mut scaled = points.clone();
	if points.nrows() == 0 {
		return scaled;
	}

	for mut column in scaled.axis_iter_mut(Axis(1)) {
		let n = column.len() as f64;
		let mean = column.sum() / n;
		let var = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
		let std = var.sqrt();
		let divisor = if std > 0.0 { std } else { 1.0 };
		column.mapv_inplace(|v| (v - mean) / divisor);
	}

	scaled
}

/// Median with the even-length midpoint convention. `values` must be non-empty.
pub fn median(values: &mut [f64]) -> f64 {
	values.sort_by(|a, b| a.total_cmp(b));
	let mid = values.len() / 2;
	if values.len() % 2 == 0 {
		(values[mid - 1] + values[mid]) / 2.0
	} else {
		values[mid]
	}
}
