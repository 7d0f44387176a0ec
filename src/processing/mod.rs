//! Numeric pipeline stages

pub mod affinity;
pub mod deadline;
pub mod distance;
pub mod eigengap;
pub mod geometry;
pub mod kmeans;
pub mod laplacian;
pub mod mds;
pub mod medoid;
pub mod pipeline;
pub mod spectral;

pub use affinity::AffinityBuilder;
pub use distance::{build_distance_matrix, DistanceMatrixBuilder};
pub use eigengap::EigengapEstimator;
pub use mds::Embedder;
pub use medoid::find_medoids;
pub use pipeline::Pipeline;
pub use spectral::SpectralClusterer;
