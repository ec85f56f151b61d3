//! Errors of a reduce task.

use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type returned by a user reducer.
pub type ReduceError = Box<dyn error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A partition could not be opened or read, or the output could not be written.
    IoFailure { path: PathBuf, source: io::Error },
    /// A partition's contents are not a valid record sequence.
    DecodeFailure { path: PathBuf, source: io::Error },
    /// The reducer failed for `key`.
    ReduceFailure { key: String, source: ReduceError },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::IoFailure {
            path: path.into(),
            source,
        }
    }

    /// Sorts an error coming out of a partition codec into decode or I/O failure. Codecs report
    /// malformed input, truncation included, as `InvalidData`.
    pub(crate) fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Error {
        match source.kind() {
            io::ErrorKind::InvalidData => Error::DecodeFailure {
                path: path.into(),
                source,
            },
            _ => Error::io(path, source),
        }
    }

    /// The key that was being reduced, if this is a reducer failure.
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::ReduceFailure { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IoFailure { path, source } => {
                write!(f, "I/O failure on {}: {}", path.display(), source)
            }
            Error::DecodeFailure { path, source } => {
                write!(f, "could not decode partition {}: {}", path.display(), source)
            }
            Error::ReduceFailure { key, source } => {
                write!(f, "reducer failed for key '{}': {}", key, source)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IoFailure { source, .. } | Error::DecodeFailure { source, .. } => Some(source),
            Error::ReduceFailure { source, .. } => Some(source.as_ref()),
        }
    }
}
