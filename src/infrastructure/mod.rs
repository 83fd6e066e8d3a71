//! Platform utilities.
//!
//! - [`paths`]: Config and data directory resolution, tilde expansion

pub mod paths;

pub use paths::{config_file, default_data_dir, expand_tilde};
