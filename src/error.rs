//! Pipeline error taxonomy

use std::fmt;
use std::time::Duration;

/// Result alias for the clustering pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
	Input,
	DistanceMatrix,
	Embedding,
	Affinity,
	Eigengap,
	Spectral,
	Medoids,
	Output,
}

impl fmt::Display for Stage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Stage::Input => "input",
			Stage::DistanceMatrix => "distance matrix",
			Stage::Embedding => "embedding",
			Stage::Affinity => "affinity",
			Stage::Eigengap => "eigengap",
			Stage::Spectral => "spectral clustering",
			Stage::Medoids => "medoids",
			Stage::Output => "output",
		};
		f.write_str(name)
	}
}

/// Errors returned by the pipeline stages. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Wrong token count, unparsable number, missing or conflicting pairs.
	#[error("{stage}: malformed input: {message}")]
	MalformedInput { stage: Stage, message: String },

	/// Non-square or asymmetric matrix, or a cluster count outside [1, N].
	#[error("{stage}: dimension mismatch: {message}")]
	DimensionMismatch { stage: Stage, message: String },

	/// Non-finite values or a degenerate spectrum.
	#[error("{stage}: numeric degeneracy: {message}")]
	NumericDegeneracy { stage: Stage, message: String },

	#[error("{stage}: deadline of {:.1}s exceeded", .limit.as_secs_f64())]
	DeadlineExceeded { stage: Stage, limit: Duration },

	#[error("{stage}: {source}")]
	Io {
		stage: Stage,
		#[source]
		source: std::io::Error,
	},
}

impl Error {
	pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
		Error::MalformedInput { stage, message: message.into() }
	}

	pub fn dimension(stage: Stage, message: impl Into<String>) -> Self {
		Error::DimensionMismatch { stage, message: message.into() }
	}

	pub fn degenerate(stage: Stage, message: impl Into<String>) -> Self {
		Error::NumericDegeneracy { stage, message: message.into() }
	}

	pub fn io(stage: Stage, source: std::io::Error) -> Self {
		Error::Io { stage, source }
	}

	/// Stage the error was raised in
	pub fn stage(&self) -> Stage {
		match self {
			Error::MalformedInput { stage, .. }
			| Error::DimensionMismatch { stage, .. }
			| Error::NumericDegeneracy { stage, .. }
			| Error::DeadlineExceeded { stage, .. }
			| Error::Io { stage, .. } => *stage,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn message_names_the_stage() {
		let err = Error::dimension(Stage::Spectral, "cannot create 4 clusters from 3 terms");
		assert_eq!(
			err.to_string(),
			"spectral clustering: dimension mismatch: cannot create 4 clusters from 3 terms"
		);
		assert_eq!(err.stage(), Stage::Spectral);
	}

	#[test]
	fn deadline_message_reports_limit() {
		let err = Error::DeadlineExceeded {
			stage: Stage::Eigengap,
			limit: Duration::from_millis(1500),
		};
		assert_eq!(err.to_string(), "eigengap: deadline of 1.5s exceeded");
	}
}
