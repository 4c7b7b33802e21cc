//! Error types for a railgazer run.

use std::fmt::Display;
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for railgazer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop (or, for frame probes, interrupt) an extraction run.
#[derive(Error, Debug)]
pub enum Error {
    /// No marker-matching table showed up before the deadline.
    #[error("Timeout after {waited:?} ({cycles} polls): could not find <table> with class containing '{marker}'")]
    LocatorTimeout {
        marker: String,
        waited: Duration,
        cycles: u32,
    },

    /// The located markup holds nothing that parses as a table.
    #[error("Table parsing error: {0}")]
    Parse(String),

    /// The key column is missing from the parsed table.
    #[error("Could not find '{0}' column in table")]
    ColumnNotFound(String),

    /// One nested document could not be searched. Recovered inside the locator.
    #[error("Frame {index} error: {reason}")]
    FrameAccess { index: usize, reason: String },

    /// The browser session failed (launch, navigation, waits, input).
    #[error("Browser error: {0}")]
    Browser(String),

    /// The xlsx writer rejected a sheet, cell or the final save.
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error when writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A run was configured with values it cannot work with.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap any displayable browser-side failure.
    pub fn browser(err: impl Display) -> Self {
        Error::Browser(err.to_string())
    }

    /// Whether the locator may swallow this error and keep polling.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::FrameAccess { .. } | Error::Browser(_))
    }
}
