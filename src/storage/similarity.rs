//! `<termA> <termB> <similarity>` tables

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::{SimilarityRecord, Term};
use crate::error::{Error, Result, Stage};

/// Parse a whitespace-delimited similarity table. Blank lines are skipped.
pub fn parse_similarities<R: BufRead>(reader: R) -> Result<Vec<SimilarityRecord>> {
	let mut records = Vec::new();

	for (index, line) in reader.lines().enumerate() {
		let line = line.map_err(|e| Error::io(Stage::Input, e))?;
		let number = index + 1;

		let tokens: Vec<&str> = line.split_whitespace().collect();
		match tokens.as_slice() {
			[] => continue,
			[first, second, value] => {
				let similarity: f64 = value.parse().map_err(|_| {
					Error::malformed(Stage::Input, format!("line {}: '{}' is not a number", number, value))
				})?;
				if !similarity.is_finite() {
					return Err(Error::malformed(
						Stage::Input,
						format!("line {}: similarity must be finite, got {}", number, value),
					));
				}
				records.push(SimilarityRecord::new(Term::new(*first), Term::new(*second), similarity));
			}
			_ => {
				return Err(Error::malformed(
					Stage::Input,
					format!("line {}: expected 3 fields, found {}", number, tokens.len()),
				))
			}
		}
	}

	Ok(records)
}

/// `-` reads standard input
pub fn read_similarities(path: &Path) -> Result<Vec<SimilarityRecord>> {
	if path.to_str() == Some("-") {
		return parse_similarities(std::io::stdin().lock());
	}
	let file = File::open(path).map_err(|e| Error::io(Stage::Input, e))?;
	parse_similarities(BufReader::new(file))
}
