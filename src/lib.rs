// src/lib.rs
//! Pulls the FOIS station-wise outstanding demand table out of a live,
//! possibly framed page and writes one workbook sheet per Station From code.
//!
//! Pipeline: [`locate`] → [`table`] → [`partition`] → [`workbook`], sequenced
//! by [`runner`]. The browser sits behind the [`browser::Document`] /
//! [`browser::Session`] traits and time behind [`Clock`](crate::core::Clock), so the whole
//! run can be driven by fakes.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod browser;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod file;
pub mod locate;
pub mod partition;
pub mod progress;
pub mod runner;
pub mod table;
pub mod workbook;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::DataSet;
pub use error::{Error, Result};
