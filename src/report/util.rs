use std::path::Path;

use crate::{Error, Result};

pub(crate) fn read_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|e| Error::unreadable(e, path))?;
    let raw = raw.trim();

    Ok(raw.to_string())
}
