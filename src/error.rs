use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving, staging or extracting a single entry.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A list line without both a structure and a chain identifier.
    #[error("line {line_no}: expected '<pdb id> <chain id>', got {line:?}")]
    MalformedLine {
        /// One-based line number in the list file
        line_no: usize,
        /// The offending line, verbatim
        line: String,
    },

    /// Structure identifiers are four alphanumeric characters.
    #[error("invalid PDB identifier {0:?}")]
    InvalidPdbId(String),

    /// Chain identifiers occupy a single column in the coordinate records.
    #[error("invalid chain identifier {0:?}")]
    InvalidChainId(String),

    /// No compressed archive at the expected location.
    #[error("archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    /// The archive exists but holds no text.
    #[error("archive decompressed to an empty file: {}", .0.display())]
    EmptyArchive(PathBuf),

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
