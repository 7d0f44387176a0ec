//! Pipeline configuration and constants

use std::time::Duration;

use serde::{Deserialize, Serialize};

// === Affinity Kernel ===
pub const DEFAULT_ALPHA: f64 = 1.0;
pub const DEFAULT_NEIGHBORS: usize = 10;
/// Lower bound for a local scale (duplicate points collapse it to zero)
pub const MIN_LOCAL_SCALE: f64 = 1e-12;

// === Cluster Count ===
pub const DEFAULT_MAX_K: usize = 20;
/// CLI sentinel for "estimate the cluster count"
pub const AUTO_CLUSTERS: usize = 0;

// === Reproducibility ===
pub const DEFAULT_SEED: u64 = 1;

// === MDS (SMACOF) ===
pub const MDS_COMPONENTS: usize = 2;
pub const MDS_N_INIT: usize = 4;
pub const MDS_MAX_ITER: usize = 300;
pub const MDS_EPS: f64 = 1e-3;

// === K-means discretization ===
pub const KMEANS_N_INIT: usize = 10;
pub const KMEANS_MAX_ITER: usize = 300;
pub const KMEANS_TOL: f64 = 1e-4;

// === Environment ===
pub const DEADLINE_ENV: &str = "GOCLUSTER_DEADLINE_SECS";

/// Kernel used to turn distances into affinities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AffinityMode {
	/// exp(-alpha * d) with one bandwidth for every pair
	Global,
	/// exp(-d^2 / (sigma_i * sigma_j)) on z-scored coordinates
	#[default]
	Local,
}

/// Parameters shared by every pipeline command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
	pub affinity: AffinityMode,
	pub alpha: f64,
	pub neighbors: usize,
	pub max_k: usize,
	/// `None` selects the count with the eigengap heuristic
	pub clusters: Option<usize>,
	pub seed: u64,
	/// Skip MDS and build the affinity from the similarity distances
	pub embed: bool,
	#[serde(skip)]
	pub deadline: Option<Duration>,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			affinity: AffinityMode::default(),
			alpha: DEFAULT_ALPHA,
			neighbors: DEFAULT_NEIGHBORS,
			max_k: DEFAULT_MAX_K,
			clusters: None,
			seed: DEFAULT_SEED,
			embed: true,
			deadline: None,
		}
	}
}

/// Map the CLI cluster count onto an explicit count or automatic selection
pub fn cluster_count(raw: usize) -> Option<usize> {
	if raw == AUTO_CLUSTERS {
		None
	} else {
		Some(raw)
	}
}

/// Deadline from the command line, falling back to GOCLUSTER_DEADLINE_SECS
pub fn resolve_deadline(cli_secs: Option<f64>) -> Option<Duration> {
	if let Some(secs) = cli_secs {
		return to_duration(secs);
	}

	match std::env::var(DEADLINE_ENV) {
		Ok(raw) => match raw.trim().parse::<f64>() {
			Ok(secs) => {
				crate::ui::debug(&format!("Using {}: {}s", DEADLINE_ENV, secs));
				to_duration(secs)
			}
			Err(_) => {
				crate::ui::warn(&format!("Ignoring {}: '{}' is not a number", DEADLINE_ENV, raw));
				None
			}
		},
		Err(_) => None,
	}
}

fn to_duration(secs: f64) -> Option<Duration> {
	if secs.is_finite() && secs > 0.0 {
		Some(Duration::from_secs_f64(secs))
	} else {
		None
	}
}
