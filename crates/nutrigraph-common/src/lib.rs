//! # NutriGraph Common
//!
//! Shared error types, logging bootstrap, survey constants and string
//! utilities used by every crate in the NutriGraph workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

#[allow(missing_docs)]
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
#[allow(missing_docs)]
pub mod test_utils;

pub use error::{NutriGraphError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use types::*;
pub use utils::*;
