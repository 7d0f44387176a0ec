//! Core domain types

pub mod cluster;
pub mod matrix;
pub mod term;

pub use cluster::{Cluster, ClusterAssignment, ClusterReport, Medoid};
pub use matrix::{condensed_len, AffinityMatrix, CoordinateSet, DistanceMatrix};
pub use term::{SimilarityRecord, Term};
