use std::path::Path;

use super::util::*;
use crate::{Error, Result};

pub(crate) const LSB_RELEASE_PATH: &str = "/etc/lsb-release";

const DESCRIPTION_KEY: &str = "DISTRIB_DESCRIPTION";

/// Read the distribution description from the lsb-release metadata.
pub fn description() -> Result<String> {
    description_from(LSB_RELEASE_PATH)
}

pub(crate) fn description_from(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = read_string(path)?;

    parse_description(&raw, path)
}

/// The metadata is line-oriented `key=value` text. The description is found
/// by key. The value is returned verbatim, surrounding quotes included, as
/// the split is not quote-aware.
pub(crate) fn parse_description(raw: &str, path: &Path) -> Result<String> {
    for line in raw.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        if key == DESCRIPTION_KEY {
            return Ok(value.to_string());
        }
    }

    Err(Error::malformed(
        format!("no {DESCRIPTION_KEY} entry"),
        path,
    ))
}
