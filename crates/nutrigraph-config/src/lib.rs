//! # NutriGraph Config
//!
//! Type-safe configuration for NutriGraph.
//!
//! This crate provides the TOML schema, defaults, validation and an atomic
//! loader/saver. Every field has a default so a missing file is not an error.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
