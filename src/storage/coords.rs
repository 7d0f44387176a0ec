//! `<term>\t<x>\t<y>` coordinate files written between embedding and clustering

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use ndarray::Array2;

use super::output::write_atomic;
use crate::core::{CoordinateSet, Term};
use crate::error::{Error, Result, Stage};

/// Coordinates are written with 3 decimals
pub fn render_coordinates<W: Write + ?Sized>(coords: &CoordinateSet, out: &mut W) -> std::io::Result<()> {
	for (i, term) in coords.terms().iter().enumerate() {
		write!(out, "{}", term)?;
		for value in coords.point(i) {
			write!(out, "\t{:.3}", value)?;
		}
		writeln!(out)?;
	}
	Ok(())
}

pub fn write_coordinates(coords: &CoordinateSet, path: &Path) -> Result<()> {
	write_atomic(path, |out| render_coordinates(coords, out))
}

/// Every non-blank line needs a term and the same number of coordinates
pub fn parse_coordinates<R: BufRead>(reader: R) -> Result<CoordinateSet> {
	let mut terms = Vec::new();
	let mut values = Vec::new();
	let mut dims: Option<usize> = None;

	for (index, line) in reader.lines().enumerate() {
		let line = line.map_err(|e| Error::io(Stage::Input, e))?;
		let number = index + 1;

		let mut tokens = line.split_whitespace();
		let Some(term) = tokens.next() else {
			continue;
		};

		let point = tokens
			.map(|token| {
				token.parse::<f64>().map_err(|_| {
					Error::malformed(Stage::Input, format!("line {}: '{}' is not a number", number, token))
				})
			})
			.collect::<Result<Vec<f64>>>()?;

		if point.is_empty() {
			return Err(Error::malformed(Stage::Input, format!("line {}: no coordinates for {}", number, term)));
		}
		match dims {
			Some(d) if d != point.len() => {
				return Err(Error::malformed(
					Stage::Input,
					format!("line {}: expected {} coordinates, found {}", number, d, point.len()),
				))
			}
			_ => dims = Some(point.len()),
		}

		terms.push(Term::new(term));
		values.extend(point);
	}

	if terms.is_empty() {
		return Err(Error::malformed(Stage::Input, "no coordinates found"));
	}

	let rows = terms.len();
	let points = Array2::from_shape_vec((rows, values.len() / rows), values)
		.map_err(|e| Error::dimension(Stage::Input, e.to_string()))?;
	CoordinateSet::new(terms, points)
}

pub fn read_coordinates(path: &Path) -> Result<CoordinateSet> {
	if path.to_str() == Some("-") {
		return parse_coordinates(std::io::stdin().lock());
	}
	let file = File::open(path).map_err(|e| Error::io(Stage::Input, e))?;
	parse_coordinates(BufReader::new(file))
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	fn sample() -> CoordinateSet {
		CoordinateSet::new(
			vec![Term::from("GO:1"), Term::from("GO:2")],
			array![[0.12345, -1.0], [2.5, 0.0004]],
		)
		.unwrap()
	}

	#[test]
	fn renders_three_decimals() {
		let mut out = Vec::new();
		render_coordinates(&sample(), &mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "GO:1\t0.123\t-1.000\nGO:2\t2.500\t0.000\n");
	}

	#[test]
	fn written_file_reads_back_at_file_precision() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("coords.tsv");
		write_coordinates(&sample(), &path).unwrap();

		let coords = read_coordinates(&path).unwrap();
		assert_eq!(coords.terms(), sample().terms());
		assert_eq!(coords.points(), &array![[0.123, -1.0], [2.5, 0.0]]);
	}

	#[test]
	fn ragged_rows_are_rejected() {
		let err = parse_coordinates("A\t1\t2\nB\t3\n".as_bytes()).unwrap_err();
		assert!(err.to_string().contains("line 2"));
	}

	#[test]
	fn term_without_coordinates_is_rejected() {
		assert!(parse_coordinates("A\n".as_bytes()).is_err());
	}

	#[test]
	fn empty_file_is_rejected() {
		assert!(matches!(
			parse_coordinates("\n\n".as_bytes()).unwrap_err(),
			Error::MalformedInput { .. }
		));
	}
}
