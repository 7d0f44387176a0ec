//! Representative term per cluster

use ndarray::Array2;

use crate::core::{ClusterAssignment, Medoid};
use crate::error::{Error, Result, Stage};

/// One medoid per distinct label, ordered by label.
///
/// The medoid minimizes the mean distance to the other members of its own
/// cluster; the first member in index order wins ties. `distances` are the
/// node-to-node distances the affinity was built from, not the affinities.
pub fn find_medoids(distances: &Array2<f64>, assignment: &ClusterAssignment) -> Result<Vec<Medoid>> {
	let (rows, cols) = distances.dim();
	if rows != cols || rows != assignment.len() {
		return Err(Error::dimension(
			Stage::Medoids,
			format!("{}x{} distances for {} labels", rows, cols, assignment.len()),
		));
	}

	let medoids = assignment
		.distinct()
		.into_iter()
		.map(|label| {
			let members = assignment.members(label);
			let (index, mean_distance) = medoid_of(distances, &members);
			Medoid {
				label,
				index,
				mean_distance,
			}
		})
		.collect();

	Ok(medoids)
}

/// `members` is non-empty because it comes from a label that occurs
fn medoid_of(distances: &Array2<f64>, members: &[usize]) -> (usize, f64) {
	let others = members.len().saturating_sub(1).max(1) as f64;

	let mut best = (members[0], f64::INFINITY);
	for &i in members {
		let mean = members.iter().map(|&j| distances[[i, j]]).sum::<f64>() / others;
		if mean < best.1 {
			best = (i, mean);
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn picks_minimum_mean_distance() {
		let distances = array![
			[0.0, 1.0, 2.0, 9.0],
			[1.0, 0.0, 1.0, 9.0],
			[2.0, 1.0, 0.0, 9.0],
			[9.0, 9.0, 9.0, 0.0]
		];
		let assignment = ClusterAssignment::new(vec![0, 0, 0, 1]);
		let medoids = find_medoids(&distances, &assignment).unwrap();

		assert_eq!(medoids.len(), 2);
		assert_eq!(medoids[0].index, 1);
		assert_eq!(medoids[0].mean_distance, 1.0);
		assert_eq!(medoids[1].index, 3);
		assert_eq!(medoids[1].mean_distance, 0.0);
	}

	#[test]
	fn ties_go_to_first_member() {
		let distances = array![[0.0, 0.1, 0.9], [0.1, 0.0, 0.8], [0.9, 0.8, 0.0]];
		let assignment = ClusterAssignment::new(vec![0, 0, 1]);
		let medoids = find_medoids(&distances, &assignment).unwrap();
		assert_eq!(medoids[0].index, 0);
		assert_eq!(medoids[1].index, 2);
	}

	#[test]
	fn medoid_mean_is_minimal_within_cluster() {
		let distances = array![
			[0.0, 0.3, 0.5, 0.7, 0.2],
			[0.3, 0.0, 0.4, 0.1, 0.6],
			[0.5, 0.4, 0.0, 0.3, 0.9],
			[0.7, 0.1, 0.3, 0.0, 0.5],
			[0.2, 0.6, 0.9, 0.5, 0.0]
		];
		let assignment = ClusterAssignment::new(vec![1, 0, 1, 0, 1]);
		for medoid in find_medoids(&distances, &assignment).unwrap() {
			let members = assignment.members(medoid.label);
			for &i in &members {
				let mean = members.iter().map(|&j| distances[[i, j]]).sum::<f64>() / (members.len() - 1) as f64;
				assert!(medoid.mean_distance <= mean + 1e-12);
			}
		}
	}

	#[test]
	fn lone_term_is_its_own_medoid() {
		let medoids = find_medoids(&array![[0.0]], &ClusterAssignment::new(vec![0])).unwrap();
		assert_eq!(medoids, vec![Medoid { label: 0, index: 0, mean_distance: 0.0 }]);
	}

	#[test]
	fn size_mismatch_is_rejected() {
		let err = find_medoids(&array![[0.0, 1.0], [1.0, 0.0]], &ClusterAssignment::new(vec![0])).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { .. }));
	}
}
