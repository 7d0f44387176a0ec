use clap::builder::styling::{AnsiColor, Styles};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{
	cluster_count, resolve_deadline, AffinityMode, PipelineConfig, AUTO_CLUSTERS, DEFAULT_ALPHA, DEFAULT_MAX_K,
	DEFAULT_NEIGHBORS, DEFAULT_SEED,
};

fn parse_alpha(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val.is_finite() && val > 0.0 {
		Ok(val)
	} else {
		Err(format!("alpha must be a positive number, got {}", val))
	}
}

fn parse_seconds(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val.is_finite() && val > 0.0 {
		Ok(val)
	} else {
		Err(format!("deadline must be a positive number of seconds, got {}", val))
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Blue.on_default().bold())
		.usage(AnsiColor::Blue.on_default().bold())
		.literal(AnsiColor::Blue.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
		.valid(AnsiColor::Blue.on_default())
		.invalid(AnsiColor::Red.on_default())
}

#[derive(Parser, Debug)]
#[command(
	name = "gocluster",
	author,
	version,
	about = "Cluster Gene Ontology terms by semantic similarity",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {run}     {run_args}        {run_desc}
  {bin} {embed}   {embed_args}           {embed_desc}
  {bin} {cluster} {cluster_args}   {cluster_desc}
  {bin} {run}     {raw_args}  {raw_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "gocluster".bright_blue(),
		run = "run".yellow(),
		run_args = "-i sims.txt -o clusters.tsv",
		run_desc = "Full pipeline, automatic cluster count".dimmed(),
		embed = "embed".yellow(),
		embed_args = "-i sims.txt -o coords.tsv",
		embed_desc = "MDS coordinates only".dimmed(),
		cluster = "cluster".yellow(),
		cluster_args = "-i coords.tsv -o clusters.tsv -k 8",
		cluster_desc = "Cluster saved coordinates".dimmed(),
		raw_args = "-i sims.txt --no-embed -k 5",
		raw_desc = "Skip MDS, global kernel".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Embed terms in 2D with metric MDS
	Embed {
		/// Similarity table, `-` for stdin
		#[arg(short = 'i', long = "input", value_name = "PATH")]
		input: PathBuf,

		/// Coordinate file, `-` for stdout
		#[arg(short = 'o', long = "output", value_name = "PATH", default_value = "-")]
		output: PathBuf,

		/// Random seed for the MDS initializations
		#[arg(long = "seed", default_value_t = DEFAULT_SEED)]
		seed: u64,
	},

	/// Cluster terms from a coordinate file
	Cluster {
		/// Coordinate file, `-` for stdin
		#[arg(short = 'i', long = "input", value_name = "PATH")]
		input: PathBuf,

		#[command(flatten)]
		output: OutputArgs,

		#[command(flatten)]
		pipeline: PipelineArgs,
	},

	/// Similarities to clusters in one go
	Run {
		/// Similarity table, `-` for stdin
		#[arg(short = 'i', long = "input", value_name = "PATH")]
		input: PathBuf,

		/// Skip MDS and build the global kernel on the similarity distances
		#[arg(long = "no-embed")]
		no_embed: bool,

		#[command(flatten)]
		output: OutputArgs,

		#[command(flatten)]
		pipeline: PipelineArgs,
	},
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
	/// Cluster report, `-` for stdout
	#[arg(short = 'o', long = "output", value_name = "PATH", default_value = "-")]
	pub output: PathBuf,

	/// Also export clusters as JSON (`-` for stdout)
	#[arg(long = "export", value_name = "PATH")]
	pub export: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
	/// Affinity kernel: global or local scaling
	#[arg(short = 'a', long = "affinity", value_enum, default_value_t = AffinityMode::Local)]
	pub affinity: AffinityMode,

	/// Kernel bandwidth for the global kernel
	#[arg(long = "alpha", default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
	pub alpha: f64,

	/// Neighbour rank used for local scales
	#[arg(long = "nn", default_value_t = DEFAULT_NEIGHBORS)]
	pub neighbors: usize,

	/// Largest cluster count the eigengap search considers
	#[arg(long = "max-k", default_value_t = DEFAULT_MAX_K)]
	pub max_k: usize,

	/// Number of clusters (0 = estimate with the eigengap heuristic)
	#[arg(short = 'k', long = "clusters", default_value_t = AUTO_CLUSTERS)]
	pub clusters: usize,

	/// Random seed for MDS and k-means
	#[arg(long = "seed", default_value_t = DEFAULT_SEED)]
	pub seed: u64,

	/// Abort the eigen decompositions after this many seconds
	#[arg(long = "deadline", value_name = "SECS", value_parser = parse_seconds)]
	pub deadline: Option<f64>,
}

impl PipelineArgs {
	pub fn to_config(&self, embed: bool) -> PipelineConfig {
		PipelineConfig {
			affinity: self.affinity,
			alpha: self.alpha,
			neighbors: self.neighbors,
			max_k: self.max_k,
			clusters: cluster_count(self.clusters),
			seed: self.seed,
			embed,
			deadline: resolve_deadline(self.deadline),
		}
	}
}
