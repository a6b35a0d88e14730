//! Error type shared by every analyzer, transform and state operation.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures surfaced by the library. Nothing here is retried or downgraded;
/// the caller decides how to report them.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a file or directory failed (including "does not exist").
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tree provider rejected the source text.
    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A bundled or overridden data table is not valid JSON of the expected shape.
    #[error("invalid data table {name}: {source}")]
    Table {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// `package.json` could not be decoded.
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("migration state not initialized (expected {})", path.display())]
    StateNotInitialized { path: PathBuf },

    #[error("unknown phase: {0}")]
    UnknownPhase(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the error is an I/O failure of kind `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a whole UTF-8 file, tagging failures with the path.
pub(crate) fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
