use std::path::Path;

use super::util::*;
use crate::{Error, Result};

pub(crate) const KERNEL_VERSION_PATH: &str = "/proc/version";

/// The version descriptor is a single line of space-separated fields. The
/// layout is not self-describing, so extraction is strictly positional:
///
/// - field 0: the OS type label (e.g. `Linux`)
/// - fields 1 and 2: the version label and the kernel release string
/// - fields 6 and 7: the compiler version information
/// - fields 13 through 18: the six build timestamp fields
///
/// Lines with fewer than 19 fields are rejected rather than partially read.
const MIN_FIELDS: usize = 19;

const BUILD_TIME_FIELDS: std::ops::Range<usize> = 13..19;

#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KernelInfo {
    pub os_type: String,
    pub version_label: String,
    pub version: String,
    pub gcc_version: String,
    pub build_time: Vec<String>,
}

impl KernelInfo {
    pub fn new() -> Result<Self> {
        Self::from_file(KERNEL_VERSION_PATH)
    }

    pub(crate) fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = read_string(path)?;

        Self::parse(&raw, path)
    }

    pub(crate) fn parse(raw: &str, path: &Path) -> Result<Self> {
        let fields: Vec<&str> = raw.split(' ').collect();

        if fields.len() < MIN_FIELDS {
            return Err(Error::malformed(
                format!(
                    "expected at least {MIN_FIELDS} space-separated fields, found {}",
                    fields.len()
                ),
                path,
            ));
        }

        Ok(Self {
            os_type: fields[0].to_string(),
            // field 1 is the literal label preceding the release string; it
            // is carried through verbatim to match the historical report
            version_label: fields[1].to_string(),
            version: fields[2].to_string(),
            gcc_version: format!("{} {}", fields[6], fields[7]),
            build_time: fields[BUILD_TIME_FIELDS]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }
}
