use std::path::Path;
use std::process::Command;

use log::debug;

use crate::{Error, Result};

pub(crate) const ARCH_COMMAND: &str = "lscpu";

// The first four lines of lscpu output form the architecture summary block;
// the per-CPU detail below it is not part of the report.
const SUMMARY_LINES: usize = 4;

/// Source of the architecture summary block, so that the report can be
/// assembled without the real query command installed.
pub trait ArchSource {
    fn summary(&self) -> Result<Vec<String>>;
}

/// Live architecture query via `lscpu`.
pub struct Lscpu;

impl ArchSource for Lscpu {
    fn summary(&self) -> Result<Vec<String>> {
        debug!("invoking {ARCH_COMMAND}");

        let output = Command::new(ARCH_COMMAND)
            .output()
            .map_err(|e| Error::command(e, ARCH_COMMAND))?;

        if !output.status.success() {
            return Err(Error::command_failed(
                format!("exited with {}", output.status),
                ARCH_COMMAND,
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);

        summary_lines(&stdout, ARCH_COMMAND.as_ref())
    }
}

pub(crate) fn summary_lines(raw: &str, path: &Path) -> Result<Vec<String>> {
    let lines: Vec<String> = raw
        .lines()
        .take(SUMMARY_LINES)
        .map(|line| line.to_string())
        .collect();

    if lines.len() < SUMMARY_LINES {
        return Err(Error::malformed(
            format!(
                "expected at least {SUMMARY_LINES} lines of output, found {}",
                lines.len()
            ),
            path,
        ));
    }

    Ok(lines)
}
