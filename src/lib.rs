//! Gather a basic description of the current system and write it as a
//! human-readable report.
//!

#[macro_use]
extern crate serde;

mod error;
pub mod report;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::report::{write_report, SystemReport, REPORT_FILE_NAME};

/// Read the [`SystemReport`] for the current system.
pub fn collect() -> Result<SystemReport> {
    SystemReport::collect()
}
