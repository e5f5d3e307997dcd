//! chapsplit CLI library
//!
//! Batch front end for `chapsplit-core`: resolves input documents, runs the
//! splitting pipeline over them and reports the results.

pub mod batch;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
