//! # gocluster
//!
//! Groups Gene Ontology terms by semantic similarity: a pairwise similarity
//! table is embedded with metric MDS, turned into an affinity graph and split
//! with spectral clustering. The cluster count comes from the eigengap
//! heuristic when none is given, and every cluster reports its medoid term.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod processing;
pub mod storage;
pub mod ui;

pub use config::{AffinityMode, PipelineConfig};
pub use error::{Error, Result, Stage};
pub use processing::Pipeline;
