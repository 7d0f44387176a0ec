//! # User Interface
//!
//! Colored terminal output for pipeline progress.

pub mod log;

pub use log::{debug, error, header, info, success, warn, Log};
