//! Text formats read and written by the pipeline

pub mod coords;
pub mod output;
pub mod report;
pub mod similarity;

pub use coords::{parse_coordinates, read_coordinates, write_coordinates};
pub use output::{is_stdout, write_atomic};
pub use report::{write_json, write_report};
pub use similarity::{parse_similarities, read_similarities};
