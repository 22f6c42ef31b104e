use std::{io, path::PathBuf};

/// A specialized `Result` type for asset lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// An error returned by an asset lookup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No embedded asset is stored under the path.
    #[error("asset '{0}' not found")]
    NotFound(String),
    /// Reading from the filesystem failed in raw mode.
    #[error("I/O error")]
    Io(#[from] io::Error),
    /// Walking a directory failed in raw mode.
    #[error("failed to walk asset directory")]
    Walk(#[from] walkdir::Error),
    /// An embedded payload is not valid zstd data.
    #[error("failed to decompress asset '{path}'")]
    Decompress {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),
}

impl Error {
    /// Returns `true` if the asset does not exist, embedded or on disk.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(err) => err.kind() == io::ErrorKind::NotFound,
            Self::Walk(err) => err
                .io_error()
                .is_some_and(|err| err.kind() == io::ErrorKind::NotFound),
            Self::Decompress { .. } | Self::NonUtf8Path(_) => false,
        }
    }
}
