//! # NutriGraph CLI
//!
//! The `nutrigraph` binary: cleans the raw survey extract, writes the batch
//! report charts and runs the interactive dashboard.
//!
//! Argument parsing lives in [`cli`]; [`app`] holds one function per
//! subcommand so the binary's behavior can be exercised without a process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;

pub use cli::{Cli, Commands};
