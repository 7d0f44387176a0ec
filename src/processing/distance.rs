//! Distance matrix construction from pairwise similarity records

use std::collections::HashMap;

use ndarray::Array2;

use crate::core::{DistanceMatrix, SimilarityRecord, Term};
use crate::error::{Error, Result, Stage};
use crate::ui;

/// Two records for the same pair may differ by this much
const DUPLICATE_TOL: f64 = 1e-9;

/// Builds a symmetric distance matrix (1 - similarity) from similarity records.
///
/// Terms are indexed in first-seen order. Records are written by explicit
/// index, so input order does not matter, but every off-diagonal pair must be
/// present. Self-pairs only register the term.
#[derive(Debug, Default)]
pub struct DistanceMatrixBuilder {
	terms: Vec<Term>,
	index: HashMap<Term, usize>,
	entries: Vec<(usize, usize, f64)>,
}

impl DistanceMatrixBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register one record
	pub fn push(&mut self, record: &SimilarityRecord) -> Result<()> {
		if !record.similarity.is_finite() {
			return Err(Error::malformed(
				Stage::DistanceMatrix,
				format!("similarity for ({}, {}) is not finite", record.first, record.second),
			));
		}

		let i = self.intern(&record.first);
		let j = self.intern(&record.second);
		if i != j {
			self.entries.push((i, j, record.distance()));
		}
		Ok(())
	}

	pub fn extend<'a, I>(&mut self, records: I) -> Result<()>
	where
		I: IntoIterator<Item = &'a SimilarityRecord>,
	{
		for record in records {
			self.push(record)?;
		}
		Ok(())
	}

	fn intern(&mut self, term: &Term) -> usize {
		if let Some(&idx) = self.index.get(term) {
			return idx;
		}
		let idx = self.terms.len();
		self.terms.push(term.clone());
		self.index.insert(term.clone(), idx);
		idx
	}

	/// Number of distinct terms seen so far
	pub fn term_count(&self) -> usize {
		self.terms.len()
	}

	/// Assemble the matrix, failing on missing or conflicting pairs
	pub fn build(self) -> Result<DistanceMatrix> {
		let n = self.terms.len();
		if n == 0 {
			return Err(Error::malformed(Stage::DistanceMatrix, "no similarity records"));
		}

		ui::debug(&format!(
			"Building {}x{} distance matrix from {} pairs",
			n,
			n,
			self.entries.len()
		));

		let mut values = Array2::<f64>::from_elem((n, n), f64::NAN);
		for i in 0..n {
			values[[i, i]] = 0.0;
		}

		for &(i, j, distance) in &self.entries {
			let current = values[[i, j]];
			if !current.is_nan() && (current - distance).abs() > DUPLICATE_TOL {
				return Err(Error::malformed(
					Stage::DistanceMatrix,
					format!(
						"conflicting similarities for ({}, {}): {} vs {}",
						self.terms[i],
						self.terms[j],
						1.0 - current,
						1.0 - distance
					),
				));
			}
			values[[i, j]] = distance;
			values[[j, i]] = distance;
		}

		let missing = values.iter().filter(|v| v.is_nan()).count() / 2;
		if missing > 0 {
			let (i, j) = first_missing(&values).unwrap_or((0, 0));
			return Err(Error::malformed(
				Stage::DistanceMatrix,
				format!(
					"{} of {} term pairs missing, first is ({}, {})",
					missing,
					crate::core::condensed_len(n),
					self.terms[i],
					self.terms[j]
				),
			));
		}

		DistanceMatrix::new(self.terms, values)
	}
}

fn first_missing(values: &Array2<f64>) -> Option<(usize, usize)> {
	let n = values.nrows();
	(0..n)
		.flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
		.find(|&(i, j)| values[[i, j]].is_nan())
}

/// Build a distance matrix from a full set of records
pub fn build_distance_matrix(records: &[SimilarityRecord]) -> Result<DistanceMatrix> {
	let mut builder = DistanceMatrixBuilder::new();
	builder.extend(records)?;
	builder.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	fn records(rows: &[(&str, &str, f64)]) -> Vec<SimilarityRecord> {
		rows.iter().map(|&(a, b, s)| SimilarityRecord::new(a, b, s)).collect()
	}

	fn assert_close(actual: &Array2<f64>, expected: &Array2<f64>) {
		assert_eq!(actual.dim(), expected.dim());
		for (a, e) in actual.iter().zip(expected.iter()) {
			assert!((a - e).abs() < 1e-12, "{} != {}", a, e);
		}
	}

	#[test]
	fn three_terms_in_canonical_order() {
		let matrix = build_distance_matrix(&records(&[
			("A", "B", 0.9),
			("A", "C", 0.1),
			("B", "C", 0.2),
		]))
		.unwrap();

		let ids: Vec<&str> = matrix.terms().iter().map(|t| t.as_str()).collect();
		assert_eq!(ids, vec!["A", "B", "C"]);
		assert_close(
			matrix.values(),
			&array![[0.0, 0.1, 0.9], [0.1, 0.0, 0.8], [0.9, 0.8, 0.0]],
		);
	}

	#[test]
	fn order_of_records_does_not_matter() {
		let matrix = build_distance_matrix(&records(&[
			("B", "C", 0.2),
			("A", "C", 0.1),
			("B", "A", 0.9),
		]))
		.unwrap();

		let ids: Vec<&str> = matrix.terms().iter().map(|t| t.as_str()).collect();
		assert_eq!(ids, vec!["B", "C", "A"]);
		assert!((matrix.get(0, 2) - 0.1).abs() < 1e-12);
		assert!((matrix.get(1, 2) - 0.9).abs() < 1e-12);
	}

	#[test]
	fn missing_pair_is_malformed() {
		let err = build_distance_matrix(&records(&[("A", "B", 0.9), ("A", "C", 0.1)])).unwrap_err();
		match err {
			Error::MalformedInput { message, .. } => assert!(message.contains("(B, C)"), "{}", message),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn conflicting_duplicate_is_malformed() {
		let err = build_distance_matrix(&records(&[("A", "B", 0.9), ("B", "A", 0.5)])).unwrap_err();
		assert!(matches!(err, Error::MalformedInput { .. }));
	}

	#[test]
	fn consistent_duplicate_is_accepted() {
		let matrix = build_distance_matrix(&records(&[("A", "B", 0.9), ("B", "A", 0.9)])).unwrap();
		assert_eq!(matrix.len(), 2);
	}

	#[test]
	fn self_pair_registers_single_term() {
		let matrix = build_distance_matrix(&records(&[("A", "A", 1.0)])).unwrap();
		assert_eq!(matrix.len(), 1);
		assert_eq!(matrix.get(0, 0), 0.0);
	}

	#[test]
	fn non_finite_similarity_is_rejected() {
		let err = build_distance_matrix(&records(&[("A", "B", f64::NAN)])).unwrap_err();
		assert!(matches!(err, Error::MalformedInput { .. }));
	}

	#[test]
	fn empty_input_is_rejected() {
		assert!(build_distance_matrix(&[]).is_err());
	}
}
