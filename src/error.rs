use core::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    path: Option<PathBuf>,
    source: ErrorSource,
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, source: ErrorSource, path: Option<PathBuf>) -> Self {
        Self { kind, source, path }
    }

    pub(crate) fn with_path(
        kind: ErrorKind,
        source: impl Into<ErrorSource>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(kind, source.into(), Some(path.into()))
    }

    /// A required input source could not be read.
    pub(crate) fn unreadable(error: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::with_path(ErrorKind::Unreadable, error, path)
    }

    /// An input source exists but does not match the expected shape.
    pub(crate) fn malformed(detail: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::with_path(ErrorKind::Malformed, ErrorSource::Detail(detail.into()), path)
    }

    /// The external query command could not be spawned.
    pub(crate) fn command(error: io::Error, program: impl Into<PathBuf>) -> Self {
        Self::with_path(ErrorKind::Command, error, program)
    }

    /// The external query command ran but reported failure.
    pub(crate) fn command_failed(detail: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self::with_path(ErrorKind::Command, ErrorSource::Detail(detail.into()), program)
    }

    /// The report destination could not be created or written.
    pub(crate) fn unwritable(error: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::with_path(ErrorKind::Unwritable, error, path)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Debug)]
pub(crate) enum ErrorSource {
    Io(io::Error),
    Detail(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A required input source is missing or unreadable.
    Unreadable,
    /// An input source does not have the expected token/line layout.
    Malformed,
    /// The external architecture query failed.
    Command,
    /// The report destination cannot be created or written.
    Unwritable,
}

impl From<io::Error> for ErrorSource {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Detail(d) => f.write_str(d),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        match self.kind {
            ErrorKind::Unreadable => write!(f, "unable to read {path}: {}", self.source),
            ErrorKind::Malformed => write!(f, "malformed content in {path}: {}", self.source),
            ErrorKind::Command => write!(f, "architecture query `{path}` failed: {}", self.source),
            ErrorKind::Unwritable => write!(f, "unable to write {path}: {}", self.source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            ErrorSource::Io(e) => Some(e),
            ErrorSource::Detail(_) => None,
        }
    }
}
