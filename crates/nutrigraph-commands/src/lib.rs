//! # NutriGraph Commands
//!
//! Interactive terminal dashboard over the cleaned survey table.
//!
//! A [`Dashboard`] holds one loaded table and the global [`Filters`]. Each
//! input line is parsed into a [`Command`]; filter and page changes re-render
//! the current [`View`] through a [`PageRenderer`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod context;
pub mod dashboard;
pub mod filters;
pub mod narrative;
pub mod pages;
pub mod view;

pub use command::{Command, CommandError, HELP_TEXT};
pub use context::DashboardContext;
pub use dashboard::{Dashboard, Flow};
pub use filters::{Filters, SelectionError};
pub use pages::{year_label, PageRenderer};
pub use view::View;
