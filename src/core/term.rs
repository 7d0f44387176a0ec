//! Ontology terms and pairwise similarity records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque ontology identifier such as `GO:0008150`. Compared by exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Term {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

/// One `<termA> <termB> <similarity>` line of the similarity table
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRecord {
	pub first: Term,
	pub second: Term,
	/// Conceptually in [0, 1], not enforced
	pub similarity: f64,
}

impl SimilarityRecord {
	pub fn new(first: impl Into<Term>, second: impl Into<Term>, similarity: f64) -> Self {
		Self {
			first: first.into(),
			second: second.into(),
			similarity,
		}
	}

	/// Semantic distance, 1 - similarity
	pub fn distance(&self) -> f64 {
		1.0 - self.similarity
	}
}
