//! Errors raised while reading or writing DDL files

use std::path::PathBuf;

/// Pass error types
///
/// Missing input files are not errors; the passes skip them.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file name for {} equals the DDL file name; check split.rename_from", .path.display())]
    SeedNameCollision { path: PathBuf },
}

impl PrepError {
    /// Path of the file that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::SeedNameCollision { path } => path,
        }
    }
}
