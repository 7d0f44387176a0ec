//! Seeded k-means used to discretize the spectral embedding

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{KMEANS_MAX_ITER, KMEANS_N_INIT, KMEANS_TOL};

#[derive(Debug, Clone)]
pub struct Kmeans {
	k: usize,
	n_init: usize,
	max_iter: usize,
	tol: f64,
}

/// Labels and within-cluster sum of squares of the best restart
#[derive(Debug, Clone)]
pub struct KmeansResult {
	pub labels: Vec<usize>,
	pub inertia: f64,
}

impl Kmeans {
	pub fn new(k: usize) -> Self {
		Self {
			k,
			n_init: KMEANS_N_INIT,
			max_iter: KMEANS_MAX_ITER,
			tol: KMEANS_TOL,
		}
	}

	pub fn n_init(mut self, n: usize) -> Self {
		self.n_init = n.max(1);
		self
	}

	pub fn max_iter(mut self, n: usize) -> Self {
		self.max_iter = n.max(1);
		self
	}

	/// k-means++ restarts, keeping the lowest inertia. Requires `1 <= k <= rows`.
	///
	/// Every one of the `k` labels is used at least once.
	pub fn fit(&self, points: &Array2<f64>, rng: &mut StdRng) -> KmeansResult {
		let mut best: Option<KmeansResult> = None;
		for _ in 0..self.n_init {
			let run = self.lloyd(points, rng);
			match &best {
				Some(b) if b.inertia <= run.inertia => {}
				_ => best = Some(run),
			}
		}
		best.unwrap_or(KmeansResult {
			labels: vec![0; points.nrows()],
			inertia: 0.0,
		})
	}

	fn lloyd(&self, points: &Array2<f64>, rng: &mut StdRng) -> KmeansResult {
		let n = points.nrows();
		let mut centroids = plus_plus_init(points, self.k, rng);
		let mut labels = vec![0usize; n];

		for _ in 0..self.max_iter {
			assign(points, &centroids, &mut labels);
			fill_empty(points, &centroids, &mut labels, self.k);

			let updated = update_centroids(points, &labels, self.k);
			let shift = (0..self.k)
				.map(|c| squared_distance(centroids.row(c), updated.row(c)))
				.fold(0.0, f64::max);
			centroids = updated;
			if shift <= self.tol {
				break;
			}
		}

		assign(points, &centroids, &mut labels);
		fill_empty(points, &centroids, &mut labels, self.k);

		let centroids = update_centroids(points, &labels, self.k);
		let inertia = (0..n)
			.map(|i| squared_distance(points.row(i), centroids.row(labels[i])))
			.sum();

		KmeansResult { labels, inertia }
	}
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
	a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// First centroid uniformly at random, the rest with probability proportional to D²
fn plus_plus_init(points: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
	let n = points.nrows();
	let mut chosen = Vec::with_capacity(k);
	chosen.push(rng.random_range(0..n));

	let mut closest: Vec<f64> = (0..n)
		.map(|i| squared_distance(points.row(i), points.row(chosen[0])))
		.collect();

	while chosen.len() < k {
		let total: f64 = closest.iter().sum();
		let next = if total > 0.0 {
			let target = rng.random_range(0.0..total);
			let mut cumulative = 0.0;
			let mut pick = n - 1;
			for (i, &d) in closest.iter().enumerate() {
				cumulative += d;
				if cumulative > target {
					pick = i;
					break;
				}
			}
			pick
		} else {
			rng.random_range(0..n)
		};

		chosen.push(next);
		for (i, d) in closest.iter_mut().enumerate() {
			*d = d.min(squared_distance(points.row(i), points.row(next)));
		}
	}

	let mut centroids = Array2::<f64>::zeros((k, points.ncols()));
	for (c, &i) in chosen.iter().enumerate() {
		centroids.row_mut(c).assign(&points.row(i));
	}
	centroids
}

fn assign(points: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize]) {
	for (i, label) in labels.iter_mut().enumerate() {
		let mut best = 0;
		let mut best_distance = f64::INFINITY;
		for c in 0..centroids.nrows() {
			let d = squared_distance(points.row(i), centroids.row(c));
			if d < best_distance {
				best_distance = d;
				best = c;
			}
		}
		*label = best;
	}
}

/// Move the worst-fitting point of a multi-member cluster into each empty cluster
fn fill_empty(points: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize], k: usize) {
	let mut sizes = vec![0usize; k];
	for &label in labels.iter() {
		sizes[label] += 1;
	}

	for empty in 0..k {
		if sizes[empty] > 0 {
			continue;
		}

		let mut donor: Option<(usize, f64)> = None;
		for (i, &label) in labels.iter().enumerate() {
			if sizes[label] < 2 {
				continue;
			}
			let d = squared_distance(points.row(i), centroids.row(label));
			match donor {
				Some((_, best)) if d <= best => {}
				_ => donor = Some((i, d)),
			}
		}

		if let Some((i, _)) = donor {
			sizes[labels[i]] -= 1;
			labels[i] = empty;
			sizes[empty] += 1;
		}
	}
}

fn update_centroids(points: &Array2<f64>, labels: &[usize], k: usize) -> Array2<f64> {
	let mut centroids = Array2::<f64>::zeros((k, points.ncols()));
	let mut sizes = vec![0usize; k];
	for (i, &label) in labels.iter().enumerate() {
		let mut row = centroids.row_mut(label);
		row += &points.row(i);
		sizes[label] += 1;
	}
	for (c, &size) in sizes.iter().enumerate() {
		if size > 0 {
			centroids.row_mut(c).mapv_inplace(|v| v / size as f64);
		}
	}
	centroids
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;
	use rand::SeedableRng;

	#[test]
	fn separates_two_groups() {
		let points = array![[0.0, 0.0], [0.1, 0.1], [10.0, 10.0], [10.1, 10.1]];
		let result = Kmeans::new(2).fit(&points, &mut StdRng::seed_from_u64(1));
		assert_eq!(result.labels[0], result.labels[1]);
		assert_eq!(result.labels[2], result.labels[3]);
		assert_ne!(result.labels[0], result.labels[2]);
	}

	#[test]
	fn identical_points_still_fill_every_cluster() {
		let points = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
		let result = Kmeans::new(3).fit(&points, &mut StdRng::seed_from_u64(3));
		let mut labels = result.labels.clone();
		labels.sort_unstable();
		assert_eq!(labels, vec![0, 1, 2]);
	}

	#[test]
	fn seeded_runs_agree() {
		let points = array![[0.0, 0.0], [0.2, 0.1], [3.0, 3.0], [3.1, 2.9], [6.0, 0.0], [6.2, 0.1]];
		let a = Kmeans::new(3).fit(&points, &mut StdRng::seed_from_u64(11));
		let b = Kmeans::new(3).fit(&points, &mut StdRng::seed_from_u64(11));
		assert_eq!(a.labels, b.labels);
	}
}
